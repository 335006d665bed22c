use super::prelude::*;
use crate::{
    authorization::{require_principal, require_verified_principal},
    content_policy::ContentPolicy,
    gateways::geocode::GeoCodingGateway,
    util::{
        slug,
        validate::{non_empty, AutoCorrect, Validate},
    },
};

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Where an event takes place.
///
/// Queries must be resolved with [`resolve_location`] before
/// the event is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    Resolved(Location),
    Query(String),
}

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title             : String,
    /// Organize the event on behalf of an organization
    /// instead of the requesting user.
    pub organization_id   : Option<Id>,
    pub starts_at         : Timestamp,
    pub ends_at           : Timestamp,
    pub timezone          : Option<String>,
    pub location          : LocationInput,
    pub types             : Vec<String>,
    pub tags              : Vec<String>,
    pub short_description : String,
    pub long_description  : Option<String>,
    pub accessibility     : Accessibility,
    pub cover_image_url   : Option<String>,
    pub capacity          : Option<u32>,
    pub rsvp_mode         : RsvpMode,
    pub rsvp_url          : Option<String>,
    pub visibility        : Visibility,
}

/// Only the provided fields are changed.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title             : Option<String>,
    pub starts_at         : Option<Timestamp>,
    pub ends_at           : Option<Timestamp>,
    pub timezone          : Option<String>,
    pub location          : Option<LocationInput>,
    pub types             : Option<Vec<String>>,
    pub tags              : Option<Vec<String>>,
    pub short_description : Option<String>,
    pub long_description  : Option<String>,
    pub accessibility     : Option<Accessibility>,
    pub cover_image_url   : Option<String>,
    pub capacity          : Option<Option<u32>>,
    pub rsvp_mode         : Option<RsvpMode>,
    pub rsvp_url          : Option<String>,
    pub visibility        : Option<Visibility>,
}

/// Resolves a free-text location query with the places gateway.
pub fn resolve_location(
    gateway: &dyn GeoCodingGateway,
    input: LocationInput,
) -> Result<LocationInput> {
    match input {
        LocationInput::Resolved(_) => Ok(input),
        LocationInput::Query(query) => {
            let query = query.trim();
            if query.is_empty() {
                return Err(Error::LocationNotFound);
            }
            let location = gateway
                .resolve_location(query)
                .map_err(|err| {
                    log::warn!("Failed to resolve location '{query}': {err}");
                    Error::Dependency(err.to_string())
                })?
                .ok_or(Error::LocationNotFound)?;
            Ok(LocationInput::Resolved(location))
        }
    }
}

fn resolved(input: LocationInput) -> Result<Location> {
    match input {
        LocationInput::Resolved(location) => Ok(location),
        LocationInput::Query(query) => {
            log::warn!("Unresolved location query: {query}");
            Err(Error::LocationNotFound)
        }
    }
}

fn parse_url(url: Option<String>) -> Result<Option<Url>> {
    Ok(non_empty(url).map(|u| u.parse::<Url>()).transpose()?)
}

fn check_content(policy: &ContentPolicy, event: &Event, old: Option<&Event>) -> Result<()> {
    if old.map_or(true, |old| old.title != event.title) && !policy.is_clean(&event.title) {
        return Err(Error::InappropriateTitle);
    }
    if old.map_or(true, |old| old.short_description != event.short_description)
        && !policy.is_clean(&event.short_description)
    {
        return Err(Error::InappropriateDescription);
    }
    Ok(())
}

pub fn create_new_event<R>(
    repo: &R,
    content_policy: &ContentPolicy,
    principal: Option<&Principal>,
    e: NewEvent,
    now: Timestamp,
) -> Result<Event>
where
    R: EventRepo + OrganizationRepo,
{
    let principal = require_verified_principal(principal)?;
    let NewEvent {
        title,
        organization_id,
        starts_at,
        ends_at,
        timezone,
        location,
        types,
        tags,
        short_description,
        long_description,
        accessibility,
        cover_image_url,
        capacity,
        rsvp_mode,
        rsvp_url,
        visibility,
    } = e;
    let organizer = match organization_id {
        Some(org_id) => {
            let org = repo
                .get_org(&org_id)
                .not_found_as(Error::OrganizationNotFound)?;
            if !org.is_owner_or_member(&principal.user_id) {
                return Err(Error::NotOrganizationMember);
            }
            Organizer::Organization(org.id)
        }
        None => Organizer::Individual(principal.user_id.clone()),
    };
    let event = Event {
        id: Id::new(),
        title,
        slug: String::new(),
        organizer,
        starts_at,
        ends_at,
        timezone: non_empty(timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned()),
        location: resolved(location)?,
        types,
        tags,
        short_description,
        long_description,
        accessibility,
        cover_image_url: parse_url(cover_image_url)?,
        capacity,
        rsvp_mode,
        rsvp_url: parse_url(rsvp_url)?,
        visibility,
        status: EventStatus::Active,
        metrics: EventMetrics::default(),
        created_by: principal.user_id.clone(),
        created_at: now,
        updated_at: now,
    };
    let mut event = event.auto_correct();
    event.validate()?;
    check_content(content_policy, &event, None)?;
    event.slug = slug::unique_slug(slug::slugify(&event.title, "event"), |s| {
        repo.is_event_slug_taken(s)
    })?;
    repo.create_event(event.clone())?;
    log::info!("Created event {} ({})", event.id, event.slug);
    Ok(event)
}

pub fn update_event<R: EventRepo>(
    repo: &R,
    content_policy: &ContentPolicy,
    principal: Option<&Principal>,
    slug: &str,
    update: EventUpdate,
    now: Timestamp,
) -> Result<Event> {
    let principal = require_principal(principal)?;
    let old = repo
        .get_event_by_slug(slug)
        .not_found_as(Error::EventNotFound)?;
    if old.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    if !policy::can_edit_event(principal, &old) {
        return Err(Error::EventNotEditable);
    }
    let EventUpdate {
        title,
        starts_at,
        ends_at,
        timezone,
        location,
        types,
        tags,
        short_description,
        long_description,
        accessibility,
        cover_image_url,
        capacity,
        rsvp_mode,
        rsvp_url,
        visibility,
    } = update;
    let mut event = old.clone();
    if let Some(title) = title {
        event.title = title;
    }
    if let Some(starts_at) = starts_at {
        event.starts_at = starts_at;
    }
    if let Some(ends_at) = ends_at {
        event.ends_at = ends_at;
    }
    if let Some(timezone) = non_empty(timezone) {
        event.timezone = timezone;
    }
    if let Some(location) = location {
        event.location = resolved(location)?;
    }
    if let Some(types) = types {
        event.types = types;
    }
    if let Some(tags) = tags {
        event.tags = tags;
    }
    if let Some(short_description) = short_description {
        event.short_description = short_description;
    }
    if let Some(long_description) = long_description {
        event.long_description = Some(long_description);
    }
    if let Some(accessibility) = accessibility {
        event.accessibility = accessibility;
    }
    if let Some(url) = cover_image_url {
        event.cover_image_url = parse_url(Some(url))?;
    }
    if let Some(capacity) = capacity {
        event.capacity = capacity;
    }
    if let Some(rsvp_mode) = rsvp_mode {
        event.rsvp_mode = rsvp_mode;
    }
    if let Some(url) = rsvp_url {
        event.rsvp_url = parse_url(Some(url))?;
    }
    if let Some(visibility) = visibility {
        event.visibility = visibility;
    }
    event.updated_at = now;
    let event = event.auto_correct();
    event.validate()?;
    check_content(content_policy, &event, Some(&old))?;
    debug_assert_eq!(event.slug, old.slug);
    repo.update_event(&event)?;
    log::info!("Updated event {} ({})", event.id, event.slug);
    Ok(event)
}
