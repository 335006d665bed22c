use std::collections::HashSet;

use anyhow::Result;
use gatherly_application::AbuseGuard;
use gatherly_core::{
    entities::{EmailAddress, EmailContent, Location},
    gateways::{email::EmailGateway, geocode::GeoCodingGateway, notify::NotificationType},
};
use gatherly_gateways::{
    bot_verification::{NoBotVerification, Turnstile},
    email::{mailgun::Mailgun, send_to_json_file::SendToJsonFile},
    geocoding::google::GoogleGeoCoding,
    notify::Notify,
};

use crate::config::{self, Config};

pub type GeoCoding = Box<dyn GeoCodingGateway + Send + Sync>;

const ALL_NOTIFICATION_TYPES: [NotificationType; 4] = [
    NotificationType::UserRegistered,
    NotificationType::UserResetPasswordRequested,
    NotificationType::ReportFiled,
    NotificationType::ContactTicketSubmitted,
];

pub fn notification_gateway(cfg: &config::Email) -> Result<Notify> {
    let notify_on: HashSet<_> = ALL_NOTIFICATION_TYPES.into_iter().collect();
    let support_inbox = cfg.support_inbox.clone();
    if support_inbox.is_none() {
        log::warn!("No support inbox configured: reports and contact tickets are not forwarded");
    }
    let notify = match cfg.gateway.clone() {
        Some(config::EmailGateway::MailGun {
            api_base_url,
            api_key,
            domain,
            sender_address,
        }) => {
            log::info!("Use Mailgun gateway");
            let gw = Mailgun {
                api_key,
                api_base_url,
                domain,
                from_email: sender_address,
            };
            Notify::new(gw, notify_on, support_inbox)
        }
        Some(config::EmailGateway::EmailToJsonFile { dir }) => {
            log::info!("Use JSON file email gateway ({})", dir.display());
            let gw = SendToJsonFile::try_new(dir)?;
            Notify::new(gw, notify_on, support_inbox)
        }
        None => {
            log::warn!("No e-mail gateway configured");
            Notify::new(DummyMailGw, notify_on, support_inbox)
        }
    };
    Ok(notify)
}

pub fn abuse_guard(cfg: &Config) -> AbuseGuard {
    let rate_limits = cfg.rate_limits;
    let content_policy = cfg.content_policy.clone();
    match &cfg.bot_verification.gateway {
        Some(config::BotVerificationGateway::Turnstile { secret_key }) => {
            log::info!("Use Turnstile bot verification");
            AbuseGuard::new(
                rate_limits,
                content_policy,
                Turnstile::new(secret_key.clone()),
            )
        }
        None => AbuseGuard::new(rate_limits, content_policy, NoBotVerification),
    }
}

pub fn geocoding_gateway(cfg: &config::Geocoding) -> GeoCoding {
    match &cfg.gateway {
        Some(config::GeocodingGateway::Google { api_key }) => {
            log::info!("Use Google geocoding gateway");
            Box::new(GoogleGeoCoding::new(api_key.clone()))
        }
        None => {
            log::warn!("No geocoding gateway configured: only resolved locations are accepted");
            Box::new(DummyGeoCodingGw)
        }
    }
}

struct DummyMailGw;

impl EmailGateway for DummyMailGw {
    fn compose_and_send(&self, _recipients: &[EmailAddress], _email: &EmailContent) -> Result<()> {
        log::debug!("Cannot send emails because no e-mail gateway was configured");
        Ok(())
    }
}

struct DummyGeoCodingGw;

impl GeoCodingGateway for DummyGeoCodingGw {
    fn resolve_location(&self, query: &str) -> Result<Option<Location>> {
        Err(anyhow::anyhow!(
            "Cannot resolve '{query}' because no geocoding gateway was configured"
        ))
    }
}
