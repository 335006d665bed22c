use anyhow::{anyhow, Result};
use gatherly_core::{
    content_policy::ContentPolicy,
    rate_limit::{RateLimit, RateLimitPresets},
};
use gatherly_entities::{email::EmailAddress, url::Url};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "gatherly.toml";

const ENV_NAME_TURNSTILE_SECRET_KEY: &str = "TURNSTILE_SECRET_KEY";
const ENV_NAME_SUPPORT_INBOX: &str = "SUPPORT_INBOX";

pub struct Config {
    pub rate_limits: RateLimitPresets,
    pub content_policy: ContentPolicy,
    pub comments: Comments,
    pub users: Users,
    pub email: Email,
    pub bot_verification: BotVerification,
    pub geocoding: Geocoding,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        apply_env_overrides(
            &mut raw_config,
            env::var(ENV_NAME_TURNSTILE_SECRET_KEY).ok(),
            env::var(ENV_NAME_SUPPORT_INBOX).ok(),
        );
        Self::try_from(raw_config)
    }
}

// Secrets are usually not part of the configuration file.
fn apply_env_overrides(
    cfg: &mut raw::Config,
    turnstile_secret_key: Option<String>,
    support_inbox: Option<String>,
) {
    if let Some(secret_key) = turnstile_secret_key.filter(|s| !s.trim().is_empty()) {
        let bot_verification = cfg.bot_verification.get_or_insert_with(Default::default);
        if bot_verification.gateway.is_none() {
            log::info!("{ENV_NAME_TURNSTILE_SECRET_KEY} is set => enable Turnstile bot verification");
            bot_verification.gateway = Some(raw::BotVerificationGateway::Turnstile);
        }
        cfg.gateway
            .get_or_insert_with(Default::default)
            .turnstile
            .get_or_insert_with(Default::default)
            .secret_key = Some(secret_key);
    }
    if let Some(inbox) = support_inbox.filter(|s| !s.trim().is_empty()) {
        cfg.email.get_or_insert_with(Default::default).support_inbox = Some(inbox);
    }
}

pub struct Comments {
    pub edit_window: Duration,
}

pub struct Users {
    pub verification_token_ttl: Duration,
    pub password_reset_token_ttl: Duration,
    /// Base of all links sent to users.
    pub base_url: Url,
}

pub struct Email {
    pub gateway: Option<EmailGateway>,
    /// Receives reports and contact tickets.
    pub support_inbox: Option<EmailAddress>,
}

#[derive(Clone)]
pub enum EmailGateway {
    MailGun {
        api_base_url: String,
        api_key: String,
        domain: String,
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct BotVerification {
    pub gateway: Option<BotVerificationGateway>,
}

pub enum BotVerificationGateway {
    Turnstile { secret_key: String },
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    Google { api_key: String },
}

fn rate_limit(
    preset: Option<raw::RateLimit>,
    default: Option<raw::RateLimit>,
) -> Result<RateLimit> {
    let raw::RateLimit {
        window,
        max_requests,
    } = preset
        .or(default)
        .ok_or_else(|| anyhow!("Missing rate limit preset"))?;
    if window.is_zero() {
        return Err(anyhow!("The window of a rate limit must not be empty"));
    }
    Ok(RateLimit::new(window, max_requests))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            rate_limits,
            content_policy,
            comments,
            users,
            email,
            bot_verification,
            geocoding,
            gateway,
        } = from;

        let defaults = raw::RateLimits::default();
        let raw::RateLimits {
            auth,
            create_event,
            comment,
            report,
            contact,
        } = rate_limits.unwrap_or_default();
        let rate_limits = RateLimitPresets {
            auth: rate_limit(auth, defaults.auth)?,
            create_event: rate_limit(create_event, defaults.create_event)?,
            comment: rate_limit(comment, defaults.comment)?,
            report: rate_limit(report, defaults.report)?,
            contact: rate_limit(contact, defaults.contact)?,
        };

        let raw::ContentPolicy {
            banned_terms,
            capitalization_min_length,
            max_uppercase_ratio,
        } = content_policy.unwrap_or_default();
        if !(0.0..=1.0).contains(&max_uppercase_ratio) {
            return Err(anyhow!(
                "The max. uppercase ratio must be between 0 and 1 (found {max_uppercase_ratio})"
            ));
        }
        let content_policy = ContentPolicy::try_new(
            banned_terms.as_slice(),
            capitalization_min_length,
            max_uppercase_ratio,
        )?;

        let raw::Comments { edit_window } = comments.unwrap_or_default();
        let comments = Comments { edit_window };

        let raw::Users {
            verification_token_ttl,
            password_reset_token_ttl,
            base_url,
        } = users.unwrap_or_default();
        let users = Users {
            verification_token_ttl,
            password_reset_token_ttl,
            base_url: base_url.parse()?,
        };

        let gateway = gateway.unwrap_or_default();
        let raw::Email {
            gateway: email_gateway,
            support_inbox,
        } = email.unwrap_or_default();

        let email_gateway = match email_gateway {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gw = match gw_name {
                    raw::EmailGateway::Mailgun => {
                        let raw::MailGun {
                            api_key,
                            api_base_url,
                            domain,
                            sender_address,
                        } = gateway.mailgun.clone().ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let sender_address = sender_address.parse()?;
                        let api_base_url = api_base_url.unwrap_or_else(|| {
                            gatherly_gateways::email::mailgun::DEFAULT_API_BASE_URL.to_string()
                        });
                        EmailGateway::MailGun {
                            api_base_url,
                            api_key,
                            domain,
                            sender_address,
                        }
                    }
                    raw::EmailGateway::EmailToJsonFile => {
                        let raw::EmailToJsonFile { dir } =
                            gateway.email_to_json_file.clone().ok_or_else(|| {
                                anyhow!("Missing '{toml_name}' gateway configuration")
                            })?;
                        EmailGateway::EmailToJsonFile { dir }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let support_inbox = support_inbox
            .map(|inbox| inbox.parse::<EmailAddress>())
            .transpose()
            .map_err(|_| anyhow!("Invalid support inbox address"))?;
        let email = Email {
            gateway: email_gateway,
            support_inbox,
        };

        let bot_gateway = match bot_verification.and_then(|b| b.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gw = match gw_name {
                    raw::BotVerificationGateway::Turnstile => {
                        let secret_key = gateway
                            .turnstile
                            .clone()
                            .and_then(|t| t.secret_key)
                            .filter(|s| !s.trim().is_empty())
                            .ok_or_else(|| {
                                anyhow!("Missing secret key of the '{toml_name}' gateway")
                            })?;
                        BotVerificationGateway::Turnstile { secret_key }
                    }
                };
                Some(gw)
            }
            None => {
                log::warn!("No bot verification configured: every verification will pass");
                None
            }
        };
        let bot_verification = BotVerification {
            gateway: bot_gateway,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gw = match gw_name {
                    raw::GeocodingGateway::Google => {
                        let raw::Google { api_key } = gateway.google.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        GeocodingGateway::Google { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        Ok(Self {
            rate_limits,
            content_policy,
            comments,
            users,
            email,
            bot_verification,
            geocoding,
        })
    }
}
