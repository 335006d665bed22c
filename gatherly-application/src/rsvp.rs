use super::*;

pub fn rsvp(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    event_id: &Id,
    status: RsvpStatus,
) -> Result<Rsvp> {
    let now = Timestamp::now();
    // Reading the counter and reserving a seat happen
    // within the same exclusive transaction.
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::upsert_rsvp(conn, principal, event_id, status, now))?)
}

pub fn cancel_rsvp(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    event_id: &Id,
) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::cancel_rsvp(conn, principal, event_id))?)
}

pub fn rsvp_status(
    connections: &memory::Connections,
    principal: &Principal,
    event_id: &Id,
) -> Result<Option<RsvpStatus>> {
    Ok(usecases::rsvp_status_of(
        &connections.shared()?,
        event_id,
        &principal.user_id,
    )?)
}

pub fn my_rsvps(
    connections: &memory::Connections,
    principal: Option<&Principal>,
) -> Result<Vec<(Event, RsvpStatus)>> {
    Ok(usecases::list_rsvps_of_user(
        &connections.shared()?,
        principal,
    )?)
}

pub fn reconcile_rsvp_count(connections: &memory::Connections, event_id: &Id) -> Result<u32> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::reconcile_rsvp_count(conn, event_id))?)
}
