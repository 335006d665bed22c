// Low-level datastore access traits.
// Each repository is responsible for a single collection.
// Related documents are only referenced by their id and
// never modified or loaded by another repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The connection is read-only")]
    ReadOnly,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = self.offset.unwrap_or(0) as usize;
        let items = items.into_iter().skip(offset);
        match self.limit {
            Some(limit) => items.take(limit as usize).collect(),
            None => items.collect(),
        }
    }
}

/// Filter criteria for listed events.
///
/// Only active and public events are ever returned.
#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    /// Case-insensitive match on title, descriptions and tags.
    pub text: Option<String>,
    /// Lower bound (inclusive) of `starts_at`.
    pub from: Option<Timestamp>,
    /// Upper bound (inclusive) of `starts_at`.
    pub to: Option<Timestamp>,
    /// Events having at least one of these types.
    pub types: Vec<String>,
    /// Events having at least one of these tags.
    pub tags: Vec<String>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        if !event.is_listed() {
            return false;
        }
        if self.from.map_or(false, |from| event.starts_at < from) {
            return false;
        }
        if self.to.map_or(false, |to| event.starts_at > to) {
            return false;
        }
        if !self.types.is_empty() && !event.types.iter().any(|t| self.types.contains(t)) {
            return false;
        }
        if !self.tags.is_empty() && !event.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        match self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => {
                let text = text.to_lowercase();
                event.title.to_lowercase().contains(&text)
                    || event.short_description.to_lowercase().contains(&text)
                    || event
                        .long_description
                        .as_deref()
                        .map_or(false, |d| d.to_lowercase().contains(&text))
                    || event.tags.iter().any(|t| t.contains(&text))
            }
            None => true,
        }
    }
}

pub trait UserRepo {
    /// Fails with `AlreadyExists` if the (lowercase) email is taken.
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &Id) -> Result<User>;
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User>;
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;

    fn count_users(&self) -> Result<usize>;
}

pub trait EventRepo {
    /// Fails with `AlreadyExists` if the slug is taken.
    fn create_event(&self, event: Event) -> Result<()>;
    fn update_event(&self, event: &Event) -> Result<()>;

    fn get_event(&self, id: &Id) -> Result<Event>;
    fn get_event_by_slug(&self, slug: &str) -> Result<Event>;
    fn get_events(&self, ids: &[Id]) -> Result<Vec<Event>>;
    fn is_event_slug_taken(&self, slug: &str) -> Result<bool>;

    /// Returns one page of matching events sorted by start
    /// together with the total number of matches.
    fn query_events(&self, query: &EventQuery, pagination: &Pagination)
        -> Result<(Vec<Event>, u64)>;
    fn count_events_with_status(&self, status: EventStatus) -> Result<usize>;

    fn set_event_status(&self, id: &Id, status: EventStatus) -> Result<()>;

    /// Atomically adds `delta` to the going-counter and returns the new value.
    fn adjust_rsvp_count(&self, id: &Id, delta: i32) -> Result<u32>;

    /// Atomically increments the going-counter unless the capacity
    /// of the event is already exhausted.
    ///
    /// Returns `false` without any modification if no seat is left.
    fn try_reserve_rsvp_seat(&self, id: &Id) -> Result<bool>;

    fn set_rsvp_count(&self, id: &Id, count: u32) -> Result<()>;
}

pub trait CommentRepo {
    fn create_comment(&self, comment: Comment) -> Result<()>;
    fn update_comment(&self, comment: &Comment) -> Result<()>;

    fn get_comment(&self, id: &Id) -> Result<Comment>;
    /// All comments of an event regardless of their status.
    fn load_comments_of_event(&self, event_id: &Id) -> Result<Vec<Comment>>;
    fn count_comments_with_status(&self, status: CommentStatus) -> Result<usize>;
}

pub trait RsvpRepo {
    fn try_get_rsvp(&self, event_id: &Id, user_id: &Id) -> Result<Option<Rsvp>>;

    /// Creates or replaces the single RSVP of the user for the event
    /// and returns the status of the replaced record, if any.
    fn upsert_rsvp(&self, rsvp: &Rsvp) -> Result<Option<RsvpStatus>>;
    fn delete_rsvp(&self, event_id: &Id, user_id: &Id) -> Result<Rsvp>;

    fn count_going_rsvps(&self, event_id: &Id) -> Result<u32>;
    fn load_rsvps_of_user(&self, user_id: &Id) -> Result<Vec<Rsvp>>;
}

pub trait ReactionRepo {
    /// Fails with `AlreadyExists` for an existing (comment, user, emoji).
    fn add_reaction(&self, reaction: &Reaction) -> Result<()>;
    fn try_get_reaction(
        &self,
        comment_id: &Id,
        user_id: &Id,
        emoji: &Emoji,
    ) -> Result<Option<Reaction>>;
    fn delete_reaction(&self, comment_id: &Id, user_id: &Id, emoji: &Emoji) -> Result<()>;
    fn load_reactions_of_comment(&self, comment_id: &Id) -> Result<Vec<Reaction>>;
}

pub trait ReportRepo {
    /// Fails with `AlreadyExists` if the reporter has an open
    /// report against the same target.
    fn create_report(&self, report: Report) -> Result<()>;
    fn update_report(&self, report: &Report) -> Result<()>;

    fn get_report(&self, id: &Id) -> Result<Report>;
    fn try_get_open_report(&self, reporter_id: &Id, target: &ReportTarget)
        -> Result<Option<Report>>;
    /// Newest first.
    fn load_open_reports(&self, pagination: &Pagination) -> Result<Vec<Report>>;
    fn count_open_reports(&self) -> Result<usize>;
}

pub trait OrganizationRepo {
    /// Fails with `AlreadyExists` if the slug is taken.
    fn create_org(&self, org: Organization) -> Result<()>;
    fn get_org(&self, id: &Id) -> Result<Organization>;
    fn is_org_slug_taken(&self, slug: &str) -> Result<bool>;
}

pub trait VerificationTokenRepo {
    /// Replaces any previous token with the same email and kind.
    fn replace_verification_token(&self, token: VerificationToken) -> Result<()>;
    fn get_verification_token(&self, token: &str) -> Result<VerificationToken>;
    fn delete_verification_token(&self, token: &str) -> Result<()>;
    fn delete_expired_verification_tokens(&self, expired_before: Timestamp) -> Result<usize>;
}

pub trait ContactTicketRepo {
    fn create_contact_ticket(&self, ticket: ContactTicket) -> Result<()>;
    fn get_contact_ticket(&self, id: &Id) -> Result<ContactTicket>;
}
