use strum::{AsRefStr, Display, EnumString};

use crate::{email::EmailAddress, id::Id, time::Timestamp};

/// A single-use token sent by e-mail.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub token      : String,
    pub email      : EmailAddress,
    pub kind       : TokenKind,
    pub expires_at : Timestamp,
    pub created_at : Timestamp,
}

impl VerificationToken {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    Email,
    Password,
}

/// Creates a random, URL-safe token string.
pub fn new_token_string() -> String {
    bs58::encode(Id::new().as_str()).into_string()
}
