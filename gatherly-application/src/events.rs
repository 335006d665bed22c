use gatherly_core::{authorization::require_principal, gateways::geocode::GeoCodingGateway};
use usecases::{EventPage, EventUpdate, NewEvent};

use super::*;

pub fn create_event(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    geocoding: &dyn GeoCodingGateway,
    principal: Option<&Principal>,
    remote_ip: &str,
    bot_token: Option<&str>,
    mut new_event: NewEvent,
) -> Result<Event> {
    let user_id = &require_principal(principal)?.user_id;
    guard.enforce(
        &format!("event:{user_id}:{remote_ip}"),
        guard.rate_limits.create_event,
    )?;
    guard.verify_human(bot_token, remote_ip)?;

    // External lookups must not block the exclusive connection.
    new_event.location = usecases::resolve_location(geocoding, new_event.location)?;

    let now = Timestamp::now();
    let event = connections.exclusive()?.transaction(|conn| {
        usecases::create_new_event(conn, &guard.content_policy, principal, new_event, now)
            .map_err(|err| {
                warn!("Failed to create new event: {err}");
                err
            })
    })?;
    Ok(event)
}

pub fn update_event(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    geocoding: &dyn GeoCodingGateway,
    principal: Option<&Principal>,
    slug: &str,
    mut update: EventUpdate,
) -> Result<Event> {
    require_principal(principal)?;
    if let Some(location) = update.location.take() {
        update.location = Some(usecases::resolve_location(geocoding, location)?);
    }
    let now = Timestamp::now();
    let event = connections.exclusive()?.transaction(|conn| {
        usecases::update_event(conn, &guard.content_policy, principal, slug, update, now)
    })?;
    info!("Updated event {} ({})", event.id, event.slug);
    Ok(event)
}

pub fn delete_event(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    slug: &str,
) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::delete_event(conn, principal, slug))?)
}

pub fn get_event(connections: &memory::Connections, slug: &str) -> Result<Event> {
    Ok(usecases::get_event_by_slug(&connections.shared()?, slug)?)
}

pub fn query_events(
    connections: &memory::Connections,
    query: EventQuery,
    pagination: Pagination,
) -> Result<EventPage> {
    Ok(usecases::query_events(
        &connections.shared()?,
        query,
        pagination,
    )?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn create_event_with_location_query() {
        let fixture = BackendFixture::new();
        let user = fixture.create_user("host@example.org", Role::Member);
        let principal = Principal::from(&user);
        let mut new_event = fixture.new_event("Trans Joy Picnic");
        new_event.location = usecases::LocationInput::Query("Campus Martius".into());
        let event = flows::create_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            Some(&principal),
            "10.0.0.1",
            Some("token"),
            new_event,
        )
        .unwrap();
        assert_eq!(event.slug, "trans-joy-picnic");
        assert_eq!(event.location.formatted_address, "Campus Martius, Detroit");
        assert_eq!(
            flows::get_event(&fixture.db_connections, "trans-joy-picnic")
                .unwrap()
                .id,
            event.id
        );
    }

    #[test]
    fn unknown_location() {
        let fixture = BackendFixture::new();
        let user = fixture.create_user("host@example.org", Role::Member);
        let mut new_event = fixture.new_event("Picnic");
        new_event.location = usecases::LocationInput::Query("Atlantis".into());
        let err = flows::create_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            Some(&Principal::from(&user)),
            "10.0.0.1",
            Some("token"),
            new_event,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::LocationNotFound))
        ));
        assert_eq!(fixture.event_count(), 0);
    }

    #[test]
    fn reject_bots() {
        let fixture = BackendFixture::new();
        let user = fixture.create_user("host@example.org", Role::Member);
        let err = flows::create_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            Some(&Principal::from(&user)),
            "10.0.0.1",
            None,
            fixture.new_event("Picnic"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::BotVerification))
        ));
        assert_eq!(fixture.event_count(), 0);
    }

    #[test]
    fn anonymous_users_cannot_create_events() {
        let fixture = BackendFixture::new();
        let err = flows::create_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            None,
            "10.0.0.1",
            Some("token"),
            fixture.new_event("Picnic"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), usecases::ErrorKind::Unauthenticated);
    }

    #[test]
    fn update_and_delete_event() {
        let fixture = BackendFixture::new();
        let host = fixture.create_user("host@example.org", Role::Member);
        let host = Principal::from(&host);
        let other = Principal::from(&fixture.create_user("other@example.org", Role::Member));
        let event = fixture.create_event(&host, fixture.new_event("Book Club"));

        let update = usecases::EventUpdate {
            title: Some("Queer Book Club".into()),
            ..Default::default()
        };
        let err = flows::update_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            Some(&other),
            &event.slug,
            update.clone(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), usecases::ErrorKind::Forbidden);

        let updated = flows::update_event(
            &fixture.db_connections,
            &fixture.guard,
            &fixture.geocoding,
            Some(&host),
            &event.slug,
            update,
        )
        .unwrap();
        assert_eq!(updated.title, "Queer Book Club");
        assert_eq!(updated.slug, event.slug);

        flows::delete_event(&fixture.db_connections, Some(&host), &event.slug).unwrap();
        let err = flows::get_event(&fixture.db_connections, &event.slug).unwrap_err();
        assert_eq!(err.kind(), usecases::ErrorKind::NotFound);
    }

    #[test]
    fn query_listed_events() {
        let fixture = BackendFixture::new();
        let host = Principal::from(&fixture.create_user("host@example.org", Role::Member));
        let mut picnic = fixture.new_event("Picnic");
        picnic.tags = vec!["outdoor".into()];
        fixture.create_event(&host, picnic);
        fixture.create_event(&host, fixture.new_event("Movie Night"));
        let mut hidden = fixture.new_event("Secret Picnic");
        hidden.visibility = Visibility::Unlisted;
        fixture.create_event(&host, hidden);

        let page = flows::query_events(
            &fixture.db_connections,
            EventQuery {
                text: Some("picnic".into()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.events[0].title, "Picnic");
    }
}
