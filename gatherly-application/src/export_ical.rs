use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use super::*;

const CALENDAR_NAME: &str = "Gatherly";

fn to_utc(ts: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.as_secs(), 0)
}

fn ical_event(event: &Event, links: &Links) -> Option<icalendar::Event> {
    let (Some(starts), Some(ends)) = (to_utc(event.starts_at), to_utc(event.ends_at)) else {
        warn!("Event {} is out of the calendar range", event.id);
        return None;
    };
    let description = event
        .long_description
        .as_deref()
        .unwrap_or(&event.short_description);
    Some(
        icalendar::Event::new()
            .uid(event.id.as_str())
            .summary(&event.title)
            .description(description)
            .location(&event.location.formatted_address)
            .url(&links.event(&event.slug))
            .starts(starts)
            .ends(ends)
            .done(),
    )
}

/// Renders the events as an iCalendar (RFC 5545) document.
pub fn events_to_ical<'a>(events: impl IntoIterator<Item = &'a Event>, links: &Links) -> String {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);
    for event in events {
        if let Some(event) = ical_event(event, links) {
            calendar.push(event);
        }
    }
    calendar.done().to_string()
}

pub fn export_event_ical(
    connections: &memory::Connections,
    links: &Links,
    slug: &str,
) -> Result<String> {
    let event = usecases::get_event_by_slug(&connections.shared()?, slug)?;
    Ok(events_to_ical([&event], links))
}

/// All events the principal is going to or interested in.
pub fn export_my_rsvps_ical(
    connections: &memory::Connections,
    links: &Links,
    principal: Option<&Principal>,
) -> Result<String> {
    let rsvps = usecases::list_rsvps_of_user(&connections.shared()?, principal)?;
    Ok(events_to_ical(rsvps.iter().map(|(event, _)| event), links))
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn export_single_event() {
        let starts_at = Timestamp::try_from_secs(1_700_000_000).unwrap();
        let event = Event::build()
            .title("Picnic")
            .slug("picnic")
            .starts_at(starts_at)
            .ends_at(starts_at + time::Duration::hours(2))
            .finish();
        let links = Links::new("https://gatherly.test".parse().unwrap());
        let ical = flows::events_to_ical([&event], &links);
        assert!(ical.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0"));
        assert!(ical.ends_with("END:VCALENDAR\r\n"));
        assert!(ical.contains(&format!("UID:{}\r\n", event.id)));
        assert!(ical.contains("SUMMARY:Picnic\r\n"));
        assert!(ical.contains("DESCRIPTION:Come along\r\n"));
        assert!(ical.contains("LOCATION:1 Main St\r\n"));
        assert!(ical.contains("URL:https://gatherly.test/events/picnic\r\n"));
        assert!(ical.contains("DTSTART:20231114T221320Z\r\n"));
        assert!(ical.contains("DTEND:20231115T001320Z\r\n"));
    }

    #[test]
    fn export_my_rsvps() {
        let fixture = BackendFixture::new();
        let host = Principal::from(&fixture.create_user("host@example.org", Role::Member));
        let guest = Principal::from(&fixture.create_user("guest@example.org", Role::Member));
        let e1 = fixture.create_event(&host, fixture.new_event("Brunch"));
        let e2 = fixture.create_event(&host, fixture.new_event("Movie Night"));
        fixture.create_event(&host, fixture.new_event("Choir Practice"));
        let db = &fixture.db_connections;
        flows::rsvp(db, Some(&guest), &e1.id, RsvpStatus::Going).unwrap();
        flows::rsvp(db, Some(&guest), &e2.id, RsvpStatus::Interested).unwrap();

        let ical = flows::export_my_rsvps_ical(db, &fixture.links, Some(&guest)).unwrap();
        assert_eq!(ical.matches("BEGIN:VEVENT").count(), 2);
        assert!(ical.contains("SUMMARY:Brunch\r\n"));
        assert!(ical.contains("SUMMARY:Movie Night\r\n"));
        assert!(!ical.contains("Choir Practice"));

        let ical = flows::export_event_ical(db, &fixture.links, &e1.slug).unwrap();
        assert_eq!(ical.matches("BEGIN:VEVENT").count(), 1);
    }
}
