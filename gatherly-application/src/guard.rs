use gatherly_core::{
    content_policy::ContentPolicy,
    gateways::bot_verification::BotVerificationGateway,
    rate_limit::{RateLimit, RateLimitPresets, RateLimiter},
    usecases::Error as ParameterError,
};

use super::*;

/// Rate limiting, content policy and bot verification
/// shared by all flows of a process.
pub struct AbuseGuard {
    pub rate_limiter: RateLimiter,
    pub rate_limits: RateLimitPresets,
    pub content_policy: ContentPolicy,
    bot_verification: Box<dyn BotVerificationGateway + Send + Sync>,
}

impl AbuseGuard {
    pub fn new<G>(rate_limits: RateLimitPresets, content_policy: ContentPolicy, bot_gw: G) -> Self
    where
        G: BotVerificationGateway + Send + Sync + 'static,
    {
        Self {
            rate_limiter: RateLimiter::new(),
            rate_limits,
            content_policy,
            bot_verification: Box::new(bot_gw),
        }
    }

    pub(crate) fn enforce(&self, key: &str, limit: RateLimit) -> Result<()> {
        self.rate_limiter.enforce(key, limit)?;
        Ok(())
    }

    /// Fails if the bot verification rejects the token or
    /// cannot be reached.
    pub(crate) fn verify_human(&self, token: Option<&str>, remote_ip: &str) -> Result<()> {
        let verified = self
            .bot_verification
            .verify(token.unwrap_or_default(), Some(remote_ip))
            .map_err(|err| {
                warn!("Bot verification failed for {remote_ip}: {err}");
                ParameterError::Dependency(err.to_string())
            })?;
        if !verified {
            debug!("Rejected request from {remote_ip}: bot verification failed");
            return Err(ParameterError::BotVerification.into());
        }
        Ok(())
    }
}
