/// Verifies that a request has been issued by a human.
pub trait BotVerificationGateway {
    fn verify(&self, token: &str, remote_ip: Option<&str>) -> anyhow::Result<bool>;
}
