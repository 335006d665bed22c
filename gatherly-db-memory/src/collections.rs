use std::collections::HashMap;

use gatherly_core::entities::*;

/// All documents together with their unique indexes.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub(crate) users: HashMap<Id, User>,
    pub(crate) user_emails: HashMap<String, Id>,

    pub(crate) events: HashMap<Id, Event>,
    pub(crate) event_slugs: HashMap<String, Id>,

    pub(crate) comments: HashMap<Id, Comment>,

    pub(crate) rsvps: HashMap<RsvpKey, Rsvp>,

    pub(crate) reactions: HashMap<ReactionKey, Reaction>,

    pub(crate) reports: HashMap<Id, Report>,
    pub(crate) open_reports: HashMap<OpenReportKey, Id>,

    pub(crate) orgs: HashMap<Id, Organization>,
    pub(crate) org_slugs: HashMap<String, Id>,

    pub(crate) tokens: HashMap<String, VerificationToken>,

    pub(crate) tickets: HashMap<Id, ContactTicket>,
}

/// (event, user)
pub(crate) type RsvpKey = (Id, Id);

/// (comment, user, emoji)
pub(crate) type ReactionKey = (Id, Id, Emoji);

/// (reporter, target)
pub(crate) type OpenReportKey = (Id, ReportTarget);
