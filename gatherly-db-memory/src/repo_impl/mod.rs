use gatherly_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::{Collections, DbConnection};

mod comment;
mod contact;
mod event;
mod org;
mod reaction;
mod report;
mod rsvp;
mod user;
mod verification_token;

type Result<T> = std::result::Result<T, repo::Error>;
