//! Who is asking and what they may do.

pub mod policy;

use crate::{entities::*, usecases::Error};

/// The authenticated identity behind a request.
///
/// Produced by the identity provider, never by the user.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id        : Id,
    pub role           : Role,
    pub email_verified : bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            email_verified: user.is_verified(),
        }
    }
}

pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, Error> {
    principal.ok_or(Error::Unauthenticated)
}

pub fn require_verified_principal(principal: Option<&Principal>) -> Result<&Principal, Error> {
    let principal = require_principal(principal)?;
    if !principal.email_verified {
        return Err(Error::EmailNotVerified);
    }
    Ok(principal)
}

pub fn require_moderator(principal: Option<&Principal>) -> Result<&Principal, Error> {
    let principal = require_principal(principal)?;
    if !policy::can_moderate(principal) {
        return Err(Error::Forbidden);
    }
    Ok(principal)
}
