use std::{fmt, str::FromStr};
use thiserror::Error;

/// A bcrypt password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LEN: usize = 8;
    pub const MAX_LEN: usize = 100;

    /// Wraps an already hashed password, e.g. loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn verify(&self, password: &str) -> bool {
        pwhash::bcrypt::verify(password, &self.0)
    }

    pub fn as_hash(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Error)]
pub enum PasswordParseError {
    #[error("Password must be between {min} and {max} characters", min = Password::MIN_LEN, max = Password::MAX_LEN)]
    Length,
    #[error(transparent)]
    Hash(#[from] pwhash::error::Error),
}

impl FromStr for Password {
    type Err = PasswordParseError;

    fn from_str(password: &str) -> Result<Self, Self::Err> {
        let len = password.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(PasswordParseError::Length);
        }
        let res = Self(pwhash::bcrypt::hash(password)?);
        debug_assert!(res.verify(password));
        Ok(res)
    }
}
