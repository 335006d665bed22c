use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gatherly_application::Links;

mod config;
mod gateways;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration and show the effective settings
    CheckConfig,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let cfg = config::Config::try_load_from_file_or_default(args.config_file.as_ref())?;

    match args.command.unwrap_or(Command::CheckConfig) {
        Command::CheckConfig => check_config(&cfg),
    }
}

fn check_config(cfg: &config::Config) -> Result<()> {
    let guard = gateways::abuse_guard(cfg);
    let _notify = gateways::notification_gateway(&cfg.email)?;
    let _geocoding = gateways::geocoding_gateway(&cfg.geocoding);
    let links = Links::new(cfg.users.base_url.clone());

    let presets = guard.rate_limits;
    println!("Rate limits:");
    for (name, limit) in [
        ("auth", presets.auth),
        ("create-event", presets.create_event),
        ("comment", presets.comment),
        ("report", presets.report),
        ("contact", presets.contact),
    ] {
        println!(
            "  {name:<13} {} requests per {}s",
            limit.max_requests,
            limit.window.as_secs()
        );
    }
    println!("Comment edit window: {}s", cfg.comments.edit_window.as_secs());
    println!(
        "Verification token TTL: {}s, password reset token TTL: {}s",
        cfg.users.verification_token_ttl.as_secs(),
        cfg.users.password_reset_token_ttl.as_secs()
    );
    println!("Event links: {}", links.event("<slug>"));
    println!(
        "E-mail gateway: {}",
        match cfg.email.gateway {
            Some(config::EmailGateway::MailGun { .. }) => "mailgun",
            Some(config::EmailGateway::EmailToJsonFile { .. }) => "email-to-json-file",
            None => "none",
        }
    );
    println!(
        "Bot verification: {}",
        match cfg.bot_verification.gateway {
            Some(config::BotVerificationGateway::Turnstile { .. }) => "turnstile",
            None => "disabled (every verification passes)",
        }
    );
    println!(
        "Geocoding: {}",
        match cfg.geocoding.gateway {
            Some(config::GeocodingGateway::Google { .. }) => "google",
            None => "none",
        }
    );
    log::info!("Configuration is valid");
    Ok(())
}
