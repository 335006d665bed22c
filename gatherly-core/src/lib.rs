//! # gatherly-core
//!
//! Business rules of Gatherly: repository and gateway interfaces,
//! the access control policy, abuse protection (rate limiting and
//! content policy) and all use cases.

pub mod authorization;
pub mod content_policy;
pub mod db;
pub mod gateways;
pub mod rate_limit;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use gatherly_entities::{
        comment::*, contact::*, email::*, event::*, geo::*, id::*, location::*, moderation::*,
        organization::*, password::*, reaction::*, report::*, rsvp::*, time::*, token::*,
        url::*, user::*,
    };
}

pub use self::repositories::Error as RepoError;
