pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{comment_builder::*, event_builder::*, user_builder::*};

pub mod user_builder {

    use super::*;
    use crate::{email::*, id::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.user.name = name.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = email.parse().unwrap();
            self
        }
        pub fn verified(mut self) -> Self {
            self.user.email_verified = Some(Timestamp::now());
            self
        }
        pub fn unverified(mut self) -> Self {
            self.user.email_verified = None;
            self
        }
        pub fn role(mut self, role: Role) -> Self {
            self.user.role = role;
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> UserBuild {
            let id = Id::new();
            UserBuild {
                user: User {
                    email: EmailAddress::new_unchecked(format!("{id}@example.org")),
                    id,
                    name: "Jo".into(),
                    display_name: None,
                    email_verified: Some(Timestamp::now()),
                    password: None,
                    pronouns: None,
                    role: Role::Member,
                    org_ids: vec![],
                    settings: UserSettings::default(),
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod event_builder {

    use super::*;
    use crate::{event::*, geo::*, id::*, location::*, time::*};

    #[derive(Debug)]
    pub struct EventBuild {
        event: Event,
    }

    impl EventBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.event.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.event.title = title.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.event.slug = slug.into();
            self
        }
        pub fn organized_by(mut self, user_id: &Id) -> Self {
            self.event.organizer = Organizer::Individual(user_id.clone());
            self.event.created_by = user_id.clone();
            self
        }
        pub fn organization(mut self, org_id: &Id) -> Self {
            self.event.organizer = Organizer::Organization(org_id.clone());
            self
        }
        pub fn starts_at(mut self, ts: Timestamp) -> Self {
            self.event.starts_at = ts;
            self
        }
        pub fn ends_at(mut self, ts: Timestamp) -> Self {
            self.event.ends_at = ts;
            self
        }
        pub fn capacity(mut self, capacity: Option<u32>) -> Self {
            self.event.capacity = capacity;
            self
        }
        pub fn rsvp_mode(mut self, mode: RsvpMode) -> Self {
            self.event.rsvp_mode = mode;
            self
        }
        pub fn visibility(mut self, visibility: Visibility) -> Self {
            self.event.visibility = visibility;
            self
        }
        pub fn status(mut self, status: EventStatus) -> Self {
            self.event.status = status;
            self
        }
        pub fn types(mut self, types: Vec<&str>) -> Self {
            self.event.types = types.into_iter().map(Into::into).collect();
            self
        }
        pub fn tags(mut self, tags: Vec<&str>) -> Self {
            self.event.tags = tags.into_iter().map(Into::into).collect();
            self
        }
        pub fn finish(self) -> Event {
            self.event
        }
    }

    impl Builder for Event {
        type Build = EventBuild;
        fn build() -> EventBuild {
            let now = Timestamp::now();
            let id = Id::new();
            EventBuild {
                event: Event {
                    slug: id.to_string(),
                    id,
                    title: "An event".into(),
                    organizer: Organizer::Individual(Id::new()),
                    starts_at: now + time::Duration::days(1),
                    ends_at: now + time::Duration::days(1) + time::Duration::hours(2),
                    timezone: "UTC".into(),
                    location: Location {
                        place_id: "place-1".into(),
                        formatted_address: "1 Main St".into(),
                        pos: GeoPoint::try_from_lat_lng(42.33, -83.05).unwrap(),
                        room_notes: None,
                    },
                    types: vec!["social".into()],
                    tags: vec![],
                    short_description: "Come along".into(),
                    long_description: None,
                    accessibility: Accessibility::default(),
                    cover_image_url: None,
                    capacity: None,
                    rsvp_mode: RsvpMode::OnPlatform,
                    rsvp_url: None,
                    visibility: Visibility::Public,
                    status: EventStatus::Active,
                    metrics: EventMetrics::default(),
                    created_by: Id::new(),
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod comment_builder {

    use super::*;
    use crate::{comment::*, id::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.comment.id = id.into();
            self
        }
        pub fn event(mut self, event_id: &Id) -> Self {
            self.comment.event_id = event_id.clone();
            self
        }
        pub fn author(mut self, author_id: &Id) -> Self {
            self.comment.author_id = author_id.clone();
            self
        }
        pub fn parent(mut self, parent_id: &Id) -> Self {
            self.comment.parent_id = Some(parent_id.clone());
            self
        }
        pub fn body(mut self, body: &str) -> Self {
            self.comment.body = body.into();
            self
        }
        pub fn created_at(mut self, ts: Timestamp) -> Self {
            self.comment.created_at = ts;
            self
        }
        pub fn status(mut self, status: CommentStatus) -> Self {
            self.comment.status = status;
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Builder for Comment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            CommentBuild {
                comment: Comment {
                    id: Id::new(),
                    event_id: Id::new(),
                    author_id: Id::new(),
                    parent_id: None,
                    body: "Nice!".into(),
                    created_at: Timestamp::now(),
                    edited_at: None,
                    status: CommentStatus::Visible,
                },
            }
        }
    }

    #[test]
    fn reply_is_not_top_level() {
        let parent = Comment::build().finish();
        let reply = Comment::build().parent(&parent.id).finish();
        assert!(parent.is_top_level());
        assert!(!reply.is_top_level());
    }
}
