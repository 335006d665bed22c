use strum::{AsRefStr, Display, EnumString};

use crate::{id::*, time::*};

pub const MIN_REASON_LEN: usize = 10;
pub const MAX_REASON_LEN: usize = 1000;
pub const MAX_MODERATOR_NOTES_LEN: usize = 2000;

/// A tagged reference to the reported content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportTarget {
    Event(Id),
    Comment(Id),
    User(Id),
}

impl ReportTarget {
    pub const fn kind(&self) -> ReportTargetKind {
        match self {
            Self::Event(_) => ReportTargetKind::Event,
            Self::Comment(_) => ReportTargetKind::Comment,
            Self::User(_) => ReportTargetKind::User,
        }
    }

    pub const fn id(&self) -> &Id {
        match self {
            Self::Event(id) | Self::Comment(id) | Self::User(id) => id,
        }
    }

    pub fn new(kind: ReportTargetKind, id: Id) -> Self {
        match kind {
            ReportTargetKind::Event => Self::Event(id),
            ReportTargetKind::Comment => Self::Comment(id),
            ReportTargetKind::User => Self::User(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReportTargetKind {
    Event,
    Comment,
    User,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Open,
    Reviewed,
    Dismissed,
}

impl ReportStatus {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// The terminal outcome of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Resolution {
    Reviewed,
    Dismissed,
}

impl From<Resolution> for ReportStatus {
    fn from(from: Resolution) -> Self {
        match from {
            Resolution::Reviewed => Self::Reviewed,
            Resolution::Dismissed => Self::Dismissed,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id              : Id,
    pub target          : ReportTarget,
    pub reporter_id     : Id,
    pub reason          : String,
    pub status          : ReportStatus,
    pub moderator_notes : Option<String>,
    pub resolved_by     : Option<Id>,
    pub created_at      : Timestamp,
    pub resolved_at     : Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_target() {
        let t = ReportTarget::new(ReportTargetKind::Comment, "c1".into());
        assert_eq!(t, ReportTarget::Comment("c1".into()));
        assert_eq!(t.kind(), ReportTargetKind::Comment);
        assert_eq!(t.id().as_str(), "c1");
    }

    #[test]
    fn resolution_is_terminal() {
        assert!(!ReportStatus::from(Resolution::Reviewed).is_open());
        assert!(!ReportStatus::from(Resolution::Dismissed).is_open());
        assert!(ReportStatus::default().is_open());
    }
}
