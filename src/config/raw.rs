use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("gatherly.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub rate_limits: Option<RateLimits>,
    pub content_policy: Option<ContentPolicy>,
    pub comments: Option<Comments>,
    pub users: Option<Users>,
    pub email: Option<Email>,
    pub bot_verification: Option<BotVerification>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RateLimits {
    pub auth: Option<RateLimit>,
    pub create_event: Option<RateLimit>,
    pub comment: Option<RateLimit>,
    pub report: Option<RateLimit>,
    pub contact: Option<RateLimit>,
}

impl Default for RateLimits {
    fn default() -> Self {
        Config::default()
            .rate_limits
            .expect("Rate limits configuration")
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RateLimit {
    #[serde(deserialize_with = "deserialize_duration")]
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentPolicy {
    pub banned_terms: Vec<String>,
    pub capitalization_min_length: usize,
    pub max_uppercase_ratio: f64,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Config::default()
            .content_policy
            .expect("Content policy configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Comments {
    #[serde(deserialize_with = "deserialize_duration")]
    pub edit_window: Duration,
}

impl Default for Comments {
    fn default() -> Self {
        Config::default().comments.expect("Comments configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Users {
    #[serde(deserialize_with = "deserialize_duration")]
    pub verification_token_ttl: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub password_reset_token_ttl: Duration,
    pub base_url: String,
}

impl Default for Users {
    fn default() -> Self {
        Config::default().users.expect("Users configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Email {
    pub gateway: Option<EmailGateway>,
    pub support_inbox: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailGateway {
    Mailgun,
    EmailToJsonFile,
}

impl EmailGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::Mailgun => "mailgun",
            Self::EmailToJsonFile => "email-to-json-file",
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotVerification {
    pub gateway: Option<BotVerificationGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BotVerificationGateway {
    Turnstile,
}

impl BotVerificationGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::Turnstile => "turnstile",
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Google,
}

impl GeocodingGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub mailgun: Option<MailGun>,
    pub email_to_json_file: Option<EmailToJsonFile>,
    pub turnstile: Option<Turnstile>,
    pub google: Option<Google>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailGun {
    pub api_key: String,
    pub domain: String,
    pub sender_address: String,
    pub api_base_url: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailToJsonFile {
    pub dir: PathBuf,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Turnstile {
    /// Usually provided by the environment.
    pub secret_key: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Google {
    pub api_key: String,
}
