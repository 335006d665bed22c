use std::cell::RefCell;

use super::{prelude::*, LocationInput, NewEvent};

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Event {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Comment {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Report {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Organization {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for VerificationToken {
    fn key(&self) -> &str {
        &self.token
    }
}

impl Key for ContactTicket {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub events: RefCell<Vec<Event>>,
    pub comments: RefCell<Vec<Comment>>,
    pub rsvps: RefCell<Vec<Rsvp>>,
    pub reactions: RefCell<Vec<Reaction>>,
    pub reports: RefCell<Vec<Report>>,
    pub orgs: RefCell<Vec<Organization>>,
    pub tokens: RefCell<Vec<VerificationToken>>,
    pub tickets: RefCell<Vec<ContactTicket>>,
}

impl MockDb {
    pub fn add_user(&self, user: User) -> User {
        self.users.borrow_mut().push(user.clone());
        user
    }

    pub fn add_event(&self, event: Event) -> Event {
        self.events.borrow_mut().push(event.clone());
        event
    }

    pub fn add_comment(&self, comment: Comment) -> Comment {
        self.comments.borrow_mut().push(comment.clone());
        comment
    }

    fn modify_event<T>(&self, id: &Id, f: impl FnOnce(&mut Event) -> T) -> RepoResult<T> {
        let mut events = self.events.borrow_mut();
        let event = events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or(RepoError::NotFound)?;
        Ok(f(event))
    }
}

pub fn new_event(title: &str) -> NewEvent {
    let starts_at = Timestamp::now() + time::Duration::days(7);
    NewEvent {
        title: title.into(),
        organization_id: None,
        starts_at,
        ends_at: starts_at + time::Duration::hours(3),
        timezone: None,
        location: LocationInput::Resolved(Location {
            place_id: "place-1".into(),
            formatted_address: "1 Main St".into(),
            pos: GeoPoint::try_from_lat_lng(42.33, -83.05).unwrap(),
            room_notes: None,
        }),
        types: vec!["social".into()],
        tags: vec![],
        short_description: "A friendly get-together".into(),
        long_description: None,
        accessibility: Accessibility::default(),
        cover_image_url: None,
        capacity: None,
        rsvp_mode: RsvpMode::OnPlatform,
        rsvp_url: None,
        visibility: Visibility::Public,
    }
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    match objects.iter().find(|x| x.key() == id) {
        Some(x) => Ok(x.clone()),
        None => Err(RepoError::NotFound),
    }
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    if let Some(pos) = objects.iter().position(|x| x.key() == e.key()) {
        objects[pos] = e.clone();
    } else {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        if self.users.borrow().iter().any(|u| u.email == user.email) {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.users.borrow_mut(), user.clone())
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }
    fn get_user(&self, id: &Id) -> RepoResult<User> {
        get(&self.users.borrow(), id.as_str())
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> RepoResult<User> {
        self.try_get_user_by_email(email)?
            .ok_or(RepoError::NotFound)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }
    fn count_users(&self) -> RepoResult<usize> {
        Ok(self.users.borrow().len())
    }
}

impl EventRepo for MockDb {
    fn create_event(&self, event: Event) -> RepoResult<()> {
        if self.is_event_slug_taken(&event.slug)? {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.events.borrow_mut(), event)
    }
    fn update_event(&self, event: &Event) -> RepoResult<()> {
        update(&mut self.events.borrow_mut(), event)
    }
    fn get_event(&self, id: &Id) -> RepoResult<Event> {
        get(&self.events.borrow(), id.as_str())
    }
    fn get_event_by_slug(&self, slug: &str) -> RepoResult<Event> {
        self.events
            .borrow()
            .iter()
            .find(|e| e.slug == slug)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn get_events(&self, ids: &[Id]) -> RepoResult<Vec<Event>> {
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }
    fn is_event_slug_taken(&self, slug: &str) -> RepoResult<bool> {
        Ok(self.events.borrow().iter().any(|e| e.slug == slug))
    }
    fn query_events(
        &self,
        query: &EventQuery,
        pagination: &Pagination,
    ) -> RepoResult<(Vec<Event>, u64)> {
        let mut events: Vec<_> = self
            .events
            .borrow()
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.starts_at);
        let total = events.len() as u64;
        Ok((pagination.apply(events), total))
    }
    fn count_events_with_status(&self, status: EventStatus) -> RepoResult<usize> {
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.status == status)
            .count())
    }
    fn set_event_status(&self, id: &Id, status: EventStatus) -> RepoResult<()> {
        self.modify_event(id, |e| e.status = status)
    }
    fn adjust_rsvp_count(&self, id: &Id, delta: i32) -> RepoResult<u32> {
        self.modify_event(id, |e| {
            e.metrics.rsvps = e.metrics.rsvps.saturating_add_signed(delta);
            e.metrics.rsvps
        })
    }
    fn try_reserve_rsvp_seat(&self, id: &Id) -> RepoResult<bool> {
        self.modify_event(id, |e| {
            if e.capacity.is_some_and(|c| e.metrics.rsvps >= c) {
                return false;
            }
            e.metrics.rsvps += 1;
            true
        })
    }
    fn set_rsvp_count(&self, id: &Id, count: u32) -> RepoResult<()> {
        self.modify_event(id, |e| e.metrics.rsvps = count)
    }
}

impl CommentRepo for MockDb {
    fn create_comment(&self, comment: Comment) -> RepoResult<()> {
        create(&mut self.comments.borrow_mut(), comment)
    }
    fn update_comment(&self, comment: &Comment) -> RepoResult<()> {
        update(&mut self.comments.borrow_mut(), comment)
    }
    fn get_comment(&self, id: &Id) -> RepoResult<Comment> {
        get(&self.comments.borrow(), id.as_str())
    }
    fn load_comments_of_event(&self, event_id: &Id) -> RepoResult<Vec<Comment>> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| &c.event_id == event_id)
            .cloned()
            .collect())
    }
    fn count_comments_with_status(&self, status: CommentStatus) -> RepoResult<usize> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.status == status)
            .count())
    }
}

impl RsvpRepo for MockDb {
    fn try_get_rsvp(&self, event_id: &Id, user_id: &Id) -> RepoResult<Option<Rsvp>> {
        Ok(self
            .rsvps
            .borrow()
            .iter()
            .find(|r| &r.event_id == event_id && &r.user_id == user_id)
            .cloned())
    }
    fn upsert_rsvp(&self, rsvp: &Rsvp) -> RepoResult<Option<RsvpStatus>> {
        let mut rsvps = self.rsvps.borrow_mut();
        match rsvps
            .iter_mut()
            .find(|r| r.event_id == rsvp.event_id && r.user_id == rsvp.user_id)
        {
            Some(existing) => {
                let prev = existing.status;
                *existing = rsvp.clone();
                Ok(Some(prev))
            }
            None => {
                rsvps.push(rsvp.clone());
                Ok(None)
            }
        }
    }
    fn delete_rsvp(&self, event_id: &Id, user_id: &Id) -> RepoResult<Rsvp> {
        let mut rsvps = self.rsvps.borrow_mut();
        let pos = rsvps
            .iter()
            .position(|r| &r.event_id == event_id && &r.user_id == user_id)
            .ok_or(RepoError::NotFound)?;
        Ok(rsvps.swap_remove(pos))
    }
    fn count_going_rsvps(&self, event_id: &Id) -> RepoResult<u32> {
        Ok(self
            .rsvps
            .borrow()
            .iter()
            .filter(|r| &r.event_id == event_id && r.status.is_going())
            .count() as u32)
    }
    fn load_rsvps_of_user(&self, user_id: &Id) -> RepoResult<Vec<Rsvp>> {
        Ok(self
            .rsvps
            .borrow()
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl ReactionRepo for MockDb {
    fn add_reaction(&self, reaction: &Reaction) -> RepoResult<()> {
        if self.try_get_reaction(&reaction.comment_id, &reaction.user_id, &reaction.emoji)?.is_some() {
            return Err(RepoError::AlreadyExists);
        }
        self.reactions.borrow_mut().push(reaction.clone());
        Ok(())
    }
    fn try_get_reaction(
        &self,
        comment_id: &Id,
        user_id: &Id,
        emoji: &Emoji,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .reactions
            .borrow()
            .iter()
            .find(|r| &r.comment_id == comment_id && &r.user_id == user_id && &r.emoji == emoji)
            .cloned())
    }
    fn delete_reaction(&self, comment_id: &Id, user_id: &Id, emoji: &Emoji) -> RepoResult<()> {
        let mut reactions = self.reactions.borrow_mut();
        let pos = reactions
            .iter()
            .position(|r| &r.comment_id == comment_id && &r.user_id == user_id && &r.emoji == emoji)
            .ok_or(RepoError::NotFound)?;
        reactions.remove(pos);
        Ok(())
    }
    fn load_reactions_of_comment(&self, comment_id: &Id) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .reactions
            .borrow()
            .iter()
            .filter(|r| &r.comment_id == comment_id)
            .cloned()
            .collect())
    }
}

impl ReportRepo for MockDb {
    fn create_report(&self, report: Report) -> RepoResult<()> {
        if self
            .try_get_open_report(&report.reporter_id, &report.target)?
            .is_some()
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.reports.borrow_mut(), report)
    }
    fn update_report(&self, report: &Report) -> RepoResult<()> {
        update(&mut self.reports.borrow_mut(), report)
    }
    fn get_report(&self, id: &Id) -> RepoResult<Report> {
        get(&self.reports.borrow(), id.as_str())
    }
    fn try_get_open_report(
        &self,
        reporter_id: &Id,
        target: &ReportTarget,
    ) -> RepoResult<Option<Report>> {
        Ok(self
            .reports
            .borrow()
            .iter()
            .find(|r| r.status.is_open() && &r.reporter_id == reporter_id && &r.target == target)
            .cloned())
    }
    fn load_open_reports(&self, pagination: &Pagination) -> RepoResult<Vec<Report>> {
        let mut reports: Vec<_> = self
            .reports
            .borrow()
            .iter()
            .filter(|r| r.status.is_open())
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pagination.apply(reports))
    }
    fn count_open_reports(&self) -> RepoResult<usize> {
        Ok(self
            .reports
            .borrow()
            .iter()
            .filter(|r| r.status.is_open())
            .count())
    }
}

impl OrganizationRepo for MockDb {
    fn create_org(&self, org: Organization) -> RepoResult<()> {
        if self.is_org_slug_taken(&org.slug)? {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut self.orgs.borrow_mut(), org)
    }
    fn get_org(&self, id: &Id) -> RepoResult<Organization> {
        get(&self.orgs.borrow(), id.as_str())
    }
    fn is_org_slug_taken(&self, slug: &str) -> RepoResult<bool> {
        Ok(self.orgs.borrow().iter().any(|o| o.slug == slug))
    }
}

impl VerificationTokenRepo for MockDb {
    fn replace_verification_token(&self, token: VerificationToken) -> RepoResult<()> {
        let mut tokens = self.tokens.borrow_mut();
        tokens.retain(|t| !(t.email == token.email && t.kind == token.kind));
        tokens.push(token);
        Ok(())
    }
    fn get_verification_token(&self, token: &str) -> RepoResult<VerificationToken> {
        get(&self.tokens.borrow(), token)
    }
    fn delete_verification_token(&self, token: &str) -> RepoResult<()> {
        let len_before = self.tokens.borrow().len();
        self.tokens.borrow_mut().retain(|t| t.token != token);
        if self.tokens.borrow().len() == len_before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
    fn delete_expired_verification_tokens(&self, expired_before: Timestamp) -> RepoResult<usize> {
        let len_before = self.tokens.borrow().len();
        self.tokens
            .borrow_mut()
            .retain(|t| t.expires_at >= expired_before);
        let len_after = self.tokens.borrow().len();
        debug_assert!(len_before >= len_after);
        Ok(len_before - len_after)
    }
}

impl ContactTicketRepo for MockDb {
    fn create_contact_ticket(&self, ticket: ContactTicket) -> RepoResult<()> {
        create(&mut self.tickets.borrow_mut(), ticket)
    }
    fn get_contact_ticket(&self, id: &Id) -> RepoResult<ContactTicket> {
        get(&self.tickets.borrow(), id.as_str())
    }
}
