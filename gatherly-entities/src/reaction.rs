use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::{id::*, time::*};

const ALLOWED_EMOJIS: [&str; 8] = [
    "❤️", "👍", "🎉", "😊", "🏳️‍🌈", "🏳️‍⚧️", "💪", "🙌",
];

/// One of the emojis that can be used as reaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Emoji(String);

impl Emoji {
    pub fn allowed() -> impl Iterator<Item = Emoji> {
        ALLOWED_EMOJIS.iter().map(|e| Emoji((*e).to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
#[error("Invalid emoji")]
pub struct EmojiParseError;

impl FromStr for Emoji {
    type Err = EmojiParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALLOWED_EMOJIS
            .iter()
            .find(|e| **e == s)
            .map(|e| Self((*e).to_owned()))
            .ok_or(EmojiParseError)
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// At most one reaction exists per (comment, user, emoji).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub comment_id : Id,
    pub user_id    : Id,
    pub emoji      : Emoji,
    pub created_at : Timestamp,
}
