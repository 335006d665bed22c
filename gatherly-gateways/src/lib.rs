//! Adapters to the external services Gatherly depends on.

pub mod bot_verification;
pub mod email;
pub mod geocoding;
pub mod notify;

mod user_communication;
