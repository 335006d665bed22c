use super::prelude::*;
use crate::authorization::{require_principal, require_verified_principal};

fn get_rsvp_target<R: EventRepo>(repo: &R, event_id: &Id) -> Result<Event> {
    let event = repo.get_event(event_id).not_found_as(Error::EventNotFound)?;
    if event.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    if event.rsvp_mode == RsvpMode::External {
        return Err(Error::ExternalRsvp);
    }
    Ok(event)
}

/// Creates or changes the RSVP of the principal.
///
/// Entering the "going" state reserves a seat atomically,
/// leaving it releases the seat again.
pub fn upsert_rsvp<R>(
    repo: &R,
    principal: Option<&Principal>,
    event_id: &Id,
    status: RsvpStatus,
    now: Timestamp,
) -> Result<Rsvp>
where
    R: EventRepo + RsvpRepo,
{
    let principal = require_verified_principal(principal)?;
    let event = get_rsvp_target(repo, event_id)?;
    let user_id = &principal.user_id;
    let existing = repo.try_get_rsvp(&event.id, user_id)?;
    let prev_status = existing.as_ref().map(|r| r.status);

    match going_delta(prev_status, Some(status)) {
        1 => {
            if !repo.try_reserve_rsvp_seat(&event.id)? {
                log::debug!("Event {} is at capacity", event.id);
                return Err(Error::CapacityExceeded);
            }
        }
        0 => {}
        delta => {
            repo.adjust_rsvp_count(&event.id, delta)?;
        }
    }

    let rsvp = Rsvp {
        event_id: event.id.clone(),
        user_id: user_id.clone(),
        status,
        created_at: existing.map_or(now, |r| r.created_at),
        updated_at: now,
    };
    repo.upsert_rsvp(&rsvp)?;
    log::debug!(
        "RSVP of {} for event {}: {:?} -> {}",
        user_id,
        event.id,
        prev_status,
        status
    );
    Ok(rsvp)
}

pub fn cancel_rsvp<R>(repo: &R, principal: Option<&Principal>, event_id: &Id) -> Result<()>
where
    R: EventRepo + RsvpRepo,
{
    let principal = require_principal(principal)?;
    let rsvp = repo
        .delete_rsvp(event_id, &principal.user_id)
        .not_found_as(Error::RsvpNotFound)?;
    let delta = going_delta(Some(rsvp.status), None);
    if delta != 0 {
        repo.adjust_rsvp_count(event_id, delta)?;
    }
    log::debug!("Cancelled RSVP of {} for event {}", principal.user_id, event_id);
    Ok(())
}

pub fn rsvp_status_of<R: RsvpRepo>(
    repo: &R,
    event_id: &Id,
    user_id: &Id,
) -> Result<Option<RsvpStatus>> {
    Ok(repo.try_get_rsvp(event_id, user_id)?.map(|r| r.status))
}

/// The events the principal RSVP'd to, sorted by start.
///
/// Removed events are skipped.
pub fn list_rsvps_of_user<R>(
    repo: &R,
    principal: Option<&Principal>,
) -> Result<Vec<(Event, RsvpStatus)>>
where
    R: EventRepo + RsvpRepo,
{
    let principal = require_principal(principal)?;
    let rsvps = repo.load_rsvps_of_user(&principal.user_id)?;
    let ids: Vec<_> = rsvps.iter().map(|r| r.event_id.clone()).collect();
    let events = repo.get_events(&ids)?;
    let mut result: Vec<_> = rsvps
        .into_iter()
        .filter_map(|r| {
            events
                .iter()
                .find(|e| e.id == r.event_id)
                .filter(|e| e.status != EventStatus::Removed)
                .map(|e| (e.clone(), r.status))
        })
        .collect();
    result.sort_by_key(|(e, _)| e.starts_at);
    Ok(result)
}

/// Recomputes the going-counter of an event from its RSVPs.
pub fn reconcile_rsvp_count<R>(repo: &R, event_id: &Id) -> Result<u32>
where
    R: EventRepo + RsvpRepo,
{
    let event = repo.get_event(event_id).not_found_as(Error::EventNotFound)?;
    let count = repo.count_going_rsvps(&event.id)?;
    if count != event.metrics.rsvps {
        log::warn!(
            "Correcting RSVP count of event {}: {} -> {}",
            event.id,
            event.metrics.rsvps,
            count
        );
        repo.set_rsvp_count(&event.id, count)?;
    }
    Ok(count)
}
