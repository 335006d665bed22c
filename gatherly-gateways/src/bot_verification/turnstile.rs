use anyhow::Result;
use serde::Deserialize;

use super::BotVerificationGateway;

pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Cloudflare Turnstile challenge verification.
#[derive(Debug, Clone)]
pub struct Turnstile {
    secret_key: String,
    url: String,
}

impl Turnstile {
    pub fn new(secret_key: String) -> Self {
        Self {
            secret_key,
            url: SITEVERIFY_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

fn evaluate(response: SiteVerifyResponse) -> bool {
    if !response.success {
        log::debug!("Bot verification failed: {:?}", response.error_codes);
    }
    response.success
}

impl BotVerificationGateway for Turnstile {
    fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool> {
        if token.trim().is_empty() {
            return Ok(false);
        }
        let mut params = vec![("secret", self.secret_key.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }
        let response = reqwest::blocking::Client::new()
            .post(&self.url)
            .form(&params)
            .send()?
            .error_for_status()?
            .json::<SiteVerifyResponse>()?;
        Ok(evaluate(response))
    }
}
