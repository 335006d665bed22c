#[macro_use]
extern crate log;

mod accounts;
mod comments;
mod contact;
mod events;
mod export_ical;
mod guard;
mod links;
mod moderation;
mod organizations;
mod reactions;
mod rsvp;

pub mod prelude {
    pub use super::{
        accounts::*, comments::*, contact::*, events::*, export_ical::*, moderation::*,
        organizations::*, reactions::*, rsvp::*,
    };
}

pub mod error;

pub use self::{guard::AbuseGuard, links::Links};

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use gatherly_core::{
    authorization::Principal, entities::*, gateways::notify::*, repositories::*, usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub mod memory {
    pub use gatherly_db_memory::Connections;
}
