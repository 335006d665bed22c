use strum::{AsRefStr, Display, EnumString};

use crate::{id::*, moderation::ModerationStatus, time::*};

pub const MAX_COMMENT_BODY_LEN: usize = 2000;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : Id,
    pub event_id   : Id,
    pub author_id  : Id,
    /// Only top-level comments may be referenced as parent.
    pub parent_id  : Option<Id>,
    pub body       : String,
    pub created_at : Timestamp,
    pub edited_at  : Option<Timestamp>,
    pub status     : CommentStatus,
}

impl Comment {
    pub const fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CommentStatus {
    #[default]
    Visible,
    Flagged,
    Removed,
}

impl ModerationStatus for CommentStatus {
    const BASELINE: Self = Self::Visible;
    const FLAGGED: Self = Self::Flagged;
    const REMOVED: Self = Self::Removed;
}

/// A visible top-level comment with its visible replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}
