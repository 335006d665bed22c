pub use gatherly_core::gateways::bot_verification::BotVerificationGateway;

mod disabled;
mod turnstile;

pub use self::{disabled::*, turnstile::*};
