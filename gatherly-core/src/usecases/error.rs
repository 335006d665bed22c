use crate::{
    authorization::policy::CommentEditDenied,
    content_policy::Violation,
    entities::{
        EmailAddressParseError, EmojiParseError, GeoPointError, PasswordParseError,
        ReportTargetKind, Timestamp,
    },
    rate_limit::LimitExceeded,
    repositories,
    util::validate::EventInvalidation,
};
use thiserror::Error;

/// Classification of errors as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    Validation,
    Conflict,
    RateLimited,
    Dependency,
    Internal,
}

#[derive(Debug, Error)]
pub enum Error {
    // Authentication & permissions
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Please verify your email first")]
    EmailNotVerified,
    #[error("You do not have permission to edit this event")]
    EventNotEditable,
    #[error("You do not have permission to delete this event")]
    EventNotDeletable,
    #[error("You can only edit your own comments")]
    NotCommentAuthor,
    #[error("Edit window has expired")]
    EditWindowExpired,
    #[error("You do not have permission to delete this comment")]
    CommentNotDeletable,
    #[error("You are not a member of this organization")]
    NotOrganizationMember,

    // Missing documents
    #[error("Event not found")]
    EventNotFound,
    #[error("Comment not found")]
    CommentNotFound,
    #[error("Parent comment not found")]
    ParentCommentNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Organization not found")]
    OrganizationNotFound,
    #[error("Report not found")]
    ReportNotFound,
    #[error("RSVP not found")]
    RsvpNotFound,
    #[error("Reaction not found")]
    ReactionNotFound,
    #[error("{0} not found")]
    TargetNotFound(ReportTargetKind),

    // Invalid input
    #[error("Title must be between 1 and 200 characters")]
    Title,
    #[error("Short description must be between 1 and 280 characters")]
    ShortDescription,
    #[error("Long description must not exceed 5000 characters")]
    LongDescription,
    #[error("Event title contains inappropriate content")]
    InappropriateTitle,
    #[error("Event description contains inappropriate content")]
    InappropriateDescription,
    #[error("The end date must be after the start date")]
    EndDateBeforeStart,
    #[error("At least one event type is required")]
    EventTypes,
    #[error("Capacity must be a positive number")]
    Capacity,
    #[error("External RSVP requires an RSVP URL")]
    MissingRsvpUrl,
    #[error("RSVP is handled externally")]
    ExternalRsvp,
    #[error("Invalid URL")]
    Url,
    #[error("Invalid position: {0}")]
    Position(#[from] GeoPointError),
    #[error("Location not found")]
    LocationNotFound,
    #[error("Room notes must not exceed 200 characters")]
    RoomNotes,
    #[error("Accessibility notes must not exceed 500 characters")]
    AccessibilityNotes,
    #[error("Name must be between 2 and 100 characters")]
    Name,
    #[error("Display name must not exceed 100 characters")]
    DisplayName,
    #[error("Pronouns must not exceed 50 characters")]
    Pronouns,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("Password must be between 8 and 100 characters")]
    Password,
    #[error("Comment must be between 1 and 2000 characters")]
    CommentBody,
    #[error("Maximum comment depth reached (2 levels)")]
    MaxDepthReached,
    #[error("{0}")]
    Content(#[from] Violation),
    #[error("Reason must be between 10 and 1000 characters")]
    ReportReason,
    #[error("Moderator notes must not exceed 2000 characters")]
    ModeratorNotes,
    #[error("Invalid emoji")]
    Emoji,
    #[error("Description must be between 10 and 1000 characters")]
    OrganizationDescription,
    #[error("Subject must be between 5 and 200 characters")]
    Subject,
    #[error("Message must be between 20 and 5000 characters")]
    Message,
    #[error("Invalid or expired verification token")]
    TokenInvalid,
    #[error("Verification token has expired")]
    TokenExpired,
    #[error("Invalid security verification. Please try again.")]
    BotVerification,

    // Conflicts
    #[error("An account with this email already exists")]
    UserExists,
    #[error("You have already reported this content")]
    DuplicateReport,
    #[error("Event is at capacity")]
    CapacityExceeded,
    #[error("Report already resolved")]
    ReportAlreadyResolved,

    #[error("Too many requests. Please try again later.")]
    RateLimited { reset_at: Timestamp },

    #[error("External service unavailable: {0}")]
    Dependency(String),

    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error as E;
        use ErrorKind as K;
        match self {
            E::Unauthenticated => K::Unauthenticated,
            E::Forbidden
            | E::EmailNotVerified
            | E::EventNotEditable
            | E::EventNotDeletable
            | E::NotCommentAuthor
            | E::EditWindowExpired
            | E::CommentNotDeletable
            | E::NotOrganizationMember => K::Forbidden,
            E::EventNotFound
            | E::CommentNotFound
            | E::ParentCommentNotFound
            | E::UserNotFound
            | E::OrganizationNotFound
            | E::ReportNotFound
            | E::RsvpNotFound
            | E::ReactionNotFound
            | E::TargetNotFound(_) => K::NotFound,
            E::UserExists | E::DuplicateReport | E::CapacityExceeded | E::ReportAlreadyResolved => {
                K::Conflict
            }
            E::RateLimited { .. } => K::RateLimited,
            E::Dependency(_) => K::Dependency,
            E::Repo(repositories::Error::NotFound) => K::NotFound,
            E::Repo(repositories::Error::AlreadyExists) => K::Conflict,
            E::Repo(_) => K::Internal,
            _ => K::Validation,
        }
    }

    /// Hint for when a rate limited request may be retried.
    pub const fn retry_after(&self) -> Option<Timestamp> {
        match self {
            Self::RateLimited { reset_at } => Some(*reset_at),
            _ => None,
        }
    }
}

pub(crate) trait NotFoundAs<T> {
    /// Replaces a generic `NotFound` by a more specific error.
    fn not_found_as(self, err: Error) -> Result<T, Error>;
}

impl<T> NotFoundAs<T> for Result<T, repositories::Error> {
    fn not_found_as(self, err: Error) -> Result<T, Error> {
        self.map_err(|repo_err| match repo_err {
            repositories::Error::NotFound => err,
            repo_err => Error::Repo(repo_err),
        })
    }
}

impl From<CommentEditDenied> for Error {
    fn from(err: CommentEditDenied) -> Self {
        match err {
            CommentEditDenied::NotAuthor => Self::NotCommentAuthor,
            CommentEditDenied::EditWindowExpired => Self::EditWindowExpired,
        }
    }
}

impl From<LimitExceeded> for Error {
    fn from(err: LimitExceeded) -> Self {
        Self::RateLimited {
            reset_at: err.reset_at,
        }
    }
}

impl From<EventInvalidation> for Error {
    fn from(err: EventInvalidation) -> Self {
        use EventInvalidation as E;
        match err {
            E::Title => Self::Title,
            E::ShortDescription => Self::ShortDescription,
            E::LongDescription => Self::LongDescription,
            E::EndDateBeforeStart => Self::EndDateBeforeStart,
            E::EventTypes => Self::EventTypes,
            E::Capacity => Self::Capacity,
            E::MissingRsvpUrl => Self::MissingRsvpUrl,
            E::RoomNotes => Self::RoomNotes,
            E::AccessibilityNotes => Self::AccessibilityNotes,
        }
    }
}

impl From<PasswordParseError> for Error {
    fn from(_: PasswordParseError) -> Self {
        Self::Password
    }
}

impl From<EmailAddressParseError> for Error {
    fn from(_: EmailAddressParseError) -> Self {
        Self::EmailAddress
    }
}

impl From<EmojiParseError> for Error {
    fn from(_: EmojiParseError) -> Self {
        Self::Emoji
    }
}

impl From<gatherly_entities::url::ParseError> for Error {
    fn from(_: gatherly_entities::url::ParseError) -> Self {
        Self::Url
    }
}
