use strum::{AsRefStr, Display, EnumString};

use crate::{id::*, time::*};

/// At most one RSVP exists per (event, user).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    pub event_id   : Id,
    pub user_id    : Id,
    pub status     : RsvpStatus,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Interested,
}

impl RsvpStatus {
    pub const fn is_going(self) -> bool {
        matches!(self, Self::Going)
    }
}

/// The change of the aggregate going-counter caused by
/// a transition from `prev` to `next`.
///
/// `None` stands for a missing (or deleted) RSVP.
pub const fn going_delta(prev: Option<RsvpStatus>, next: Option<RsvpStatus>) -> i32 {
    let was_going = matches!(prev, Some(RsvpStatus::Going));
    let is_going = matches!(next, Some(RsvpStatus::Going));
    match (was_going, is_going) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}
