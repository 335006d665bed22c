//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # gatherly-entities
//!
//! Reusable, agnostic domain entities for Gatherly.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod comment;
pub mod contact;
pub mod email;
pub mod event;
pub mod geo;
pub mod id;
pub mod location;
pub mod moderation;
pub mod organization;
pub mod password;
pub mod reaction;
pub mod report;
pub mod rsvp;
pub mod time;
pub mod token;
pub mod user;
pub mod url {
    pub use url::{ParseError, Url};
}

#[cfg(any(test, feature = "builders"))]
pub mod builders;
