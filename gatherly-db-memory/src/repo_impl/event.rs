use super::*;

fn create_event(data: &mut Collections, event: Event) -> Result<()> {
    if data.events.contains_key(&event.id) || data.event_slugs.contains_key(&event.slug) {
        return Err(repo::Error::AlreadyExists);
    }
    data.event_slugs.insert(event.slug.clone(), event.id.clone());
    data.events.insert(event.id.clone(), event);
    Ok(())
}

fn update_event(data: &mut Collections, event: &Event) -> Result<()> {
    let old_slug = data
        .events
        .get(&event.id)
        .map(|e| e.slug.clone())
        .ok_or(repo::Error::NotFound)?;
    if old_slug != event.slug {
        if data.event_slugs.contains_key(&event.slug) {
            return Err(repo::Error::AlreadyExists);
        }
        data.event_slugs.remove(&old_slug);
        data.event_slugs.insert(event.slug.clone(), event.id.clone());
    }
    data.events.insert(event.id.clone(), event.clone());
    Ok(())
}

fn modify_event<T>(
    data: &mut Collections,
    id: &Id,
    f: impl FnOnce(&mut Event) -> T,
) -> Result<T> {
    data.events
        .get_mut(id)
        .map(f)
        .ok_or(repo::Error::NotFound)
}

fn query_events(
    data: &Collections,
    query: &EventQuery,
    pagination: &Pagination,
) -> (Vec<Event>, u64) {
    let mut events: Vec<_> = data
        .events
        .values()
        .filter(|e| query.matches(e))
        .cloned()
        .collect();
    events.sort_by(|a, b| {
        a.starts_at
            .cmp(&b.starts_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    let total = events.len() as u64;
    (pagination.apply(events), total)
}

impl EventRepo for DbConnection<'_> {
    fn create_event(&self, event: Event) -> Result<()> {
        self.write(|data| create_event(data, event))
    }
    fn update_event(&self, event: &Event) -> Result<()> {
        self.write(|data| update_event(data, event))
    }

    fn get_event(&self, id: &Id) -> Result<Event> {
        self.read(|data| data.events.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn get_event_by_slug(&self, slug: &str) -> Result<Event> {
        self.read(|data| {
            data.event_slugs
                .get(slug)
                .and_then(|id| data.events.get(id))
                .cloned()
        })
        .ok_or(repo::Error::NotFound)
    }
    fn get_events(&self, ids: &[Id]) -> Result<Vec<Event>> {
        Ok(self.read(|data| {
            ids.iter()
                .filter_map(|id| data.events.get(id))
                .cloned()
                .collect()
        }))
    }
    fn is_event_slug_taken(&self, slug: &str) -> Result<bool> {
        Ok(self.read(|data| data.event_slugs.contains_key(slug)))
    }

    fn query_events(
        &self,
        query: &EventQuery,
        pagination: &Pagination,
    ) -> Result<(Vec<Event>, u64)> {
        Ok(self.read(|data| query_events(data, query, pagination)))
    }
    fn count_events_with_status(&self, status: EventStatus) -> Result<usize> {
        Ok(self.read(|data| data.events.values().filter(|e| e.status == status).count()))
    }

    fn set_event_status(&self, id: &Id, status: EventStatus) -> Result<()> {
        self.write(|data| modify_event(data, id, |e| e.status = status))
    }

    fn adjust_rsvp_count(&self, id: &Id, delta: i32) -> Result<u32> {
        self.write(|data| {
            modify_event(data, id, |e| {
                let count = e.metrics.rsvps.checked_add_signed(delta);
                if count.is_none() {
                    log::warn!("RSVP counter of event {} out of range: {} {delta:+}", e.id, e.metrics.rsvps);
                }
                e.metrics.rsvps = count.unwrap_or_default();
                e.metrics.rsvps
            })
        })
    }

    fn try_reserve_rsvp_seat(&self, id: &Id) -> Result<bool> {
        self.write(|data| {
            modify_event(data, id, |e| {
                if e.capacity.is_some_and(|capacity| e.metrics.rsvps >= capacity) {
                    return false;
                }
                e.metrics.rsvps += 1;
                true
            })
        })
    }

    fn set_rsvp_count(&self, id: &Id, count: u32) -> Result<()> {
        self.write(|data| modify_event(data, id, |e| e.metrics.rsvps = count))
    }
}
