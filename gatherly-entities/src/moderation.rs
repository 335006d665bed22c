use strum::{AsRefStr, Display, EnumString};

use crate::id::Id;

/// A moderator-triggered content status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModerationAction {
    Flag,
    Remove,
    Restore,
}

/// Content that can be moderated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationTarget {
    Event(Id),
    Comment(Id),
}

/// A status of moderated content with three states:
/// a baseline (visible) state, flagged and removed.
///
/// Every state is reachable from every other state and applying
/// the same action twice yields the same state.
pub trait ModerationStatus: Copy + Eq {
    const BASELINE: Self;
    const FLAGGED: Self;
    const REMOVED: Self;

    fn moderate(self, action: ModerationAction) -> Self {
        match action {
            ModerationAction::Flag => Self::FLAGGED,
            ModerationAction::Remove => Self::REMOVED,
            ModerationAction::Restore => Self::BASELINE,
        }
    }
}
