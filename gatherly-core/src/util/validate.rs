use std::ops::RangeInclusive;

use gatherly_entities::event::{Event, RsvpMode};
use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

/// Counts characters, not bytes.
pub fn has_char_len(s: &str, range: RangeInclusive<usize>) -> bool {
    range.contains(&s.chars().count())
}

/// Trims the text and maps empty text to `None`.
pub fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Trims, drops empty entries and removes duplicates.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut labels: Vec<String> = labels
        .into_iter()
        .map(|l| l.trim().to_owned())
        .filter(|l| !l.is_empty())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 280;
pub const MAX_LONG_DESCRIPTION_LEN: usize = 5000;
pub const MAX_ROOM_NOTES_LEN: usize = 200;
pub const MAX_ACCESSIBILITY_NOTES_LEN: usize = 500;

impl AutoCorrect for Event {
    fn auto_correct(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.short_description = self.short_description.trim().to_owned();
        self.long_description = non_empty(self.long_description);
        self.location.room_notes = non_empty(self.location.room_notes);
        self.accessibility.notes = non_empty(self.accessibility.notes);
        self.types = normalize_labels(self.types);
        self.tags = normalize_labels(self.tags.into_iter().map(|t| t.to_lowercase()).collect());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventInvalidation {
    #[error("Invalid title")]
    Title,
    #[error("Invalid short description")]
    ShortDescription,
    #[error("Invalid long description")]
    LongDescription,
    #[error("The end date is before the start date")]
    EndDateBeforeStart,
    #[error("Missing event type")]
    EventTypes,
    #[error("Invalid capacity")]
    Capacity,
    #[error("Missing RSVP URL")]
    MissingRsvpUrl,
    #[error("Invalid room notes")]
    RoomNotes,
    #[error("Invalid accessibility notes")]
    AccessibilityNotes,
}

impl Validate for Event {
    type Error = EventInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !has_char_len(&self.title, 1..=MAX_TITLE_LEN) {
            return Err(Self::Error::Title);
        }
        if !has_char_len(&self.short_description, 1..=MAX_SHORT_DESCRIPTION_LEN) {
            return Err(Self::Error::ShortDescription);
        }
        if self
            .long_description
            .as_deref()
            .is_some_and(|d| !has_char_len(d, 0..=MAX_LONG_DESCRIPTION_LEN))
        {
            return Err(Self::Error::LongDescription);
        }
        if self.ends_at <= self.starts_at {
            return Err(Self::Error::EndDateBeforeStart);
        }
        if self.types.is_empty() {
            return Err(Self::Error::EventTypes);
        }
        if self.capacity == Some(0) {
            return Err(Self::Error::Capacity);
        }
        if self.rsvp_mode == RsvpMode::External && self.rsvp_url.is_none() {
            return Err(Self::Error::MissingRsvpUrl);
        }
        if self
            .location
            .room_notes
            .as_deref()
            .is_some_and(|n| !has_char_len(n, 0..=MAX_ROOM_NOTES_LEN))
        {
            return Err(Self::Error::RoomNotes);
        }
        if self
            .accessibility
            .notes
            .as_deref()
            .is_some_and(|n| !has_char_len(n, 0..=MAX_ACCESSIBILITY_NOTES_LEN))
        {
            return Err(Self::Error::AccessibilityNotes);
        }
        Ok(())
    }
}
