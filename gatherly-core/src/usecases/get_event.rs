use super::prelude::*;

/// Removed events are invisible to everyone.
pub fn get_event_by_slug<R: EventRepo>(repo: &R, slug: &str) -> Result<Event> {
    let event = repo
        .get_event_by_slug(slug)
        .not_found_as(Error::EventNotFound)?;
    if event.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    Ok(event)
}

pub fn get_event<R: EventRepo>(repo: &R, id: &Id) -> Result<Event> {
    let event = repo.get_event(id).not_found_as(Error::EventNotFound)?;
    if event.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    Ok(event)
}
