pub mod bot_verification;
pub mod email;
pub mod geocode;
pub mod notify;
