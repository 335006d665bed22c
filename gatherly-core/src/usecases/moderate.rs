use super::prelude::*;
use crate::authorization::require_moderator;

/// The status of the moderated content after the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratedStatus {
    Event(EventStatus),
    Comment(CommentStatus),
}

pub fn moderate<R>(
    repo: &R,
    principal: Option<&Principal>,
    target: &ModerationTarget,
    action: ModerationAction,
) -> Result<ModeratedStatus>
where
    R: EventRepo + CommentRepo,
{
    let principal = require_moderator(principal)?;
    let status = match target {
        ModerationTarget::Event(id) => {
            let event = repo.get_event(id).not_found_as(Error::EventNotFound)?;
            let status = event.status.moderate(action);
            if status != event.status {
                repo.set_event_status(&event.id, status)?;
            }
            log::info!(
                "Event {}: {} -> {} ({} by {})",
                event.id,
                event.status,
                status,
                action,
                principal.user_id
            );
            ModeratedStatus::Event(status)
        }
        ModerationTarget::Comment(id) => {
            let mut comment = repo.get_comment(id).not_found_as(Error::CommentNotFound)?;
            let prev = comment.status;
            comment.status = prev.moderate(action);
            if comment.status != prev {
                repo.update_comment(&comment)?;
            }
            log::info!(
                "Comment {}: {} -> {} ({} by {})",
                comment.id,
                prev,
                comment.status,
                action,
                principal.user_id
            );
            ModeratedStatus::Comment(comment.status)
        }
    };
    Ok(status)
}
