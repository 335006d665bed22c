use strum::{AsRefStr, Display, EnumString};

use crate::{
    id::Id, location::Location, moderation::ModerationStatus, time::Timestamp, url::Url,
};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id                : Id,
    pub title             : String,
    pub slug              : String,
    pub organizer         : Organizer,
    pub starts_at         : Timestamp,
    pub ends_at           : Timestamp,
    pub timezone          : String,
    pub location          : Location,
    pub types             : Vec<String>,
    pub tags              : Vec<String>,
    pub short_description : String,
    pub long_description  : Option<String>,
    pub accessibility     : Accessibility,
    pub cover_image_url   : Option<Url>,
    pub capacity          : Option<u32>,
    pub rsvp_mode         : RsvpMode,
    pub rsvp_url          : Option<Url>,
    pub visibility        : Visibility,
    pub status            : EventStatus,
    pub metrics           : EventMetrics,
    pub created_by        : Id,
    pub created_at        : Timestamp,
    pub updated_at        : Timestamp,
}

impl Event {
    pub fn is_organized_by_user(&self, user_id: &Id) -> bool {
        matches!(&self.organizer, Organizer::Individual(id) if id == user_id)
    }

    pub fn is_listed(&self) -> bool {
        self.status == EventStatus::Active && self.visibility == Visibility::Public
    }
}

/// The individual user or organization that owns an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Organizer {
    Individual(Id),
    Organization(Id),
}

impl Organizer {
    pub const fn id(&self) -> &Id {
        match self {
            Self::Individual(id) | Self::Organization(id) => id,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Active,
    Flagged,
    Removed,
}

impl ModerationStatus for EventStatus {
    const BASELINE: Self = Self::Active;
    const FLAGGED: Self = Self::Flagged;
    const REMOVED: Self = Self::Removed;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RsvpMode {
    #[default]
    OnPlatform,
    External,
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Accessibility {
    pub asl        : bool,
    pub step_free  : bool,
    pub quiet_room : bool,
    pub notes      : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventMetrics {
    pub views : u64,
    /// Number of RSVPs with status `going`.
    pub rsvps : u32,
    pub saves : u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::ModerationAction::*;

    #[test]
    fn status_transitions() {
        use EventStatus::*;
        for s in [Active, Flagged, Removed] {
            assert_eq!(s.moderate(Flag), Flagged);
            assert_eq!(s.moderate(Remove), Removed);
            assert_eq!(s.moderate(Restore), Active);
        }
        assert_eq!(Active.moderate(Flag).moderate(Flag), Flagged);
    }

    #[test]
    fn organizer_id() {
        let id = Id::from("a");
        assert_eq!(Organizer::Organization(id.clone()).id(), &id);
        assert_eq!(Organizer::Individual(id.clone()).id(), &id);
    }

    #[test]
    fn parse_modes() {
        assert_eq!("on_platform".parse::<RsvpMode>().unwrap(), RsvpMode::OnPlatform);
        assert_eq!(Visibility::Unlisted.as_ref(), "unlisted");
    }
}
