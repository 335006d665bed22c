use super::prelude::*;
use crate::authorization::require_principal;

/// Soft-deletes an event by marking it as removed.
pub fn delete_event<R: EventRepo>(
    repo: &R,
    principal: Option<&Principal>,
    slug: &str,
) -> Result<()> {
    let principal = require_principal(principal)?;
    let event = repo
        .get_event_by_slug(slug)
        .not_found_as(Error::EventNotFound)?;
    if event.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    if !policy::can_delete_event(principal, &event) {
        return Err(Error::EventNotDeletable);
    }
    repo.set_event_status(&event.id, EventStatus::Removed)?;
    log::info!("Event {} deleted by {}", event.id, principal.user_id);
    Ok(())
}
