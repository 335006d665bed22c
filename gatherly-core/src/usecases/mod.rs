mod comments;
mod confirm_email;
mod contact;
mod create_new_user;
mod delete_event;
mod error;
mod get_event;
mod moderate;
mod moderation_stats;
mod organizations;
mod query_events;
mod reactions;
mod reports;
mod reset_password;
mod rsvp;
mod store_event;
mod update_user_settings;
mod user_tokens;

#[cfg(test)]
pub mod tests;

pub use self::{
    comments::*, confirm_email::*, contact::*, create_new_user::*, delete_event::*,
    error::{Error, ErrorKind},
    get_event::*, moderate::*, moderation_stats::*, organizations::*, query_events::*,
    reactions::*, reports::*, reset_password::*, rsvp::*, store_event::*,
    update_user_settings::*, user_tokens::*,
};

mod prelude {
    pub(crate) use super::error::NotFoundAs as _;
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        authorization::{policy, Principal},
        entities::*,
        repositories::*,
        RepoError,
    };
}
