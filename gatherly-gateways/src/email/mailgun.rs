use anyhow::Result;
use gatherly_entities::email::*;
use itertools::Itertools;

use super::EmailGateway;

pub const DEFAULT_API_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Sends e-mails through mailgun.net.
#[derive(Debug, Clone)]
pub struct Mailgun {
    pub api_key: String,
    pub api_base_url: String,
    pub domain: String,
    pub from_email: EmailAddress,
}

impl Mailgun {
    fn send(&self, params: Vec<(&'static str, String)>) -> Result<()> {
        let Self {
            api_base_url,
            domain,
            api_key,
            ..
        } = &self;
        let url = format!("{}/{domain}/messages", api_base_url.trim_end_matches('/'));
        send_raw(&url, api_key, params)
    }
}

#[derive(Debug, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
struct JsonError {
    pub message: String,
}

#[cfg(not(test))]
fn send_raw(url: &str, api_key: &str, params: Vec<(&'static str, String)>) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(url)
        .form(&params)
        .basic_auth("api", Some(api_key))
        .send()?;
    if response.status().is_success() {
        log::debug!("Mail provider response: {:#?}", response);
        Ok(())
    } else {
        let json_error: JsonError = response.json()?;
        Err(json_error.into())
    }
}

/// Don't actually send e-mails while running the tests.
#[cfg(test)]
fn send_raw(url: &str, _: &str, params: Vec<(&'static str, String)>) -> Result<()> {
    log::debug!("Would send e-mail via {url}: {:?}", params);
    Ok(())
}

fn message_params(
    from: &EmailAddress,
    recipients: &[EmailAddress],
    email: &EmailContent,
) -> Vec<(&'static str, String)> {
    let recipients: String = recipients.iter().map(EmailAddress::as_str).join(",");
    vec![
        ("from", from.to_string()),
        ("to", recipients),
        ("subject", email.subject.clone()),
        ("html", email.body.clone()),
    ]
}

impl EmailGateway for Mailgun {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) -> Result<()> {
        if recipients.is_empty() {
            log::warn!("No valid email addresses specified");
            return Ok(());
        }
        log::debug!(
            "Sending e-mails from {} to: {:?}",
            self.from_email,
            recipients
        );
        self.send(message_params(&self.from_email, recipients, email))
    }
}
