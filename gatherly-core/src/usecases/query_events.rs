use super::prelude::*;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total: u64,
}

/// Lists active public events sorted by start.
pub fn query_events<R: EventRepo>(
    repo: &R,
    mut query: EventQuery,
    pagination: Pagination,
) -> Result<EventPage> {
    query.text = query
        .text
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty());
    query.tags = query.tags.into_iter().map(|t| t.to_lowercase()).collect();
    let pagination = Pagination {
        offset: pagination.offset,
        limit: Some(
            pagination
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        ),
    };
    log::debug!("Query events: {query:?} {pagination:?}");
    let (events, total) = repo.query_events(&query, &pagination)?;
    Ok(EventPage { events, total })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use gatherly_entities::builders::*;

    #[test]
    fn list_upcoming_public_events() {
        let db = MockDb::default();
        let now = Timestamp::now();
        let day = time::Duration::days(1);
        db.add_event(Event::build().title("Later").starts_at(now + day * 3).ends_at(now + day * 4).finish());
        db.add_event(Event::build().title("Sooner").starts_at(now + day).ends_at(now + day * 2).finish());
        db.add_event(Event::build().title("Unlisted").visibility(Visibility::Unlisted).finish());
        db.add_event(Event::build().title("Removed").status(EventStatus::Removed).finish());

        let page = query_events(&db, EventQuery::default(), Pagination::default()).unwrap();
        assert_eq!(page.total, 2);
        let titles: Vec<_> = page.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[test]
    fn paginate_results() {
        let db = MockDb::default();
        for i in 0..5 {
            db.add_event(Event::build().title(&format!("Event {i}")).finish());
        }
        let page = query_events(
            &db,
            EventQuery::default(),
            Pagination { offset: Some(3), limit: Some(10) },
        )
        .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.events.len(), 2);

        let page = query_events(&db, EventQuery::default(), Pagination { offset: None, limit: Some(0) }).unwrap();
        assert_eq!(page.events.len(), 1);
    }

    #[test]
    fn search_by_tag_case_insensitive() {
        let db = MockDb::default();
        db.add_event(Event::build().title("Drag brunch").tags(vec!["drag"]).finish());
        db.add_event(Event::build().title("Book club").tags(vec!["books"]).finish());
        let query = EventQuery {
            tags: vec!["DRAG".into()],
            ..Default::default()
        };
        let page = query_events(&db, query, Pagination::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.events[0].title, "Drag brunch");
    }
}
