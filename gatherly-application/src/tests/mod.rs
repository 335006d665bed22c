pub mod prelude {

    use std::cell::{Cell, RefCell};

    pub use std::time::Duration;

    pub use gatherly_core::{
        authorization::Principal,
        entities::*,
        gateways::{
            bot_verification::BotVerificationGateway,
            geocode::GeoCodingGateway,
            notify::{NotificationEvent, NotificationGateway, NotificationType},
        },
        rate_limit::RateLimitPresets,
        repositories::{Error as RepoError, *},
        usecases,
    };
    pub use gatherly_entities::builders::*;

    pub use crate::{
        error::{AppError, BError},
        memory, prelude as flows, AbuseGuard, Links,
    };

    /// Accepts every non-empty token.
    pub struct DummyBotVerificationGW;

    impl BotVerificationGateway for DummyBotVerificationGW {
        fn verify(&self, token: &str, _: Option<&str>) -> anyhow::Result<bool> {
            Ok(!token.is_empty())
        }
    }

    pub struct DummyGeoCodingGW;

    impl GeoCodingGateway for DummyGeoCodingGW {
        fn resolve_location(&self, query: &str) -> anyhow::Result<Option<Location>> {
            if query != "Campus Martius" {
                return Ok(None);
            }
            Ok(Some(Location {
                place_id: "campus-martius".into(),
                formatted_address: "Campus Martius, Detroit".into(),
                pos: GeoPoint::try_from_lat_lng(42.3315, -83.0466)?,
                room_notes: None,
            }))
        }
    }

    /// Records all notifications instead of sending them.
    #[derive(Default)]
    pub struct DummyNotifyGW {
        sent: RefCell<Vec<(NotificationType, Option<String>)>>,
        failing: Cell<bool>,
    }

    impl DummyNotifyGW {
        pub fn fail_all(&self) {
            self.failing.set(true);
        }

        pub fn sent(&self) -> Vec<NotificationType> {
            self.sent.borrow().iter().map(|(kind, _)| *kind).collect()
        }

        fn last_url_of(&self, kind: NotificationType) -> Option<String> {
            self.sent
                .borrow()
                .iter()
                .rev()
                .find(|(k, _)| *k == kind)
                .and_then(|(_, url)| url.clone())
        }

        pub fn last_confirmation_url(&self) -> Option<String> {
            self.last_url_of(NotificationType::UserRegistered)
        }

        pub fn last_reset_url(&self) -> Option<String> {
            self.last_url_of(NotificationType::UserResetPasswordRequested)
        }
    }

    impl NotificationGateway for DummyNotifyGW {
        fn notify(&self, event: NotificationEvent) -> anyhow::Result<()> {
            if self.failing.get() {
                anyhow::bail!("E-mail service unavailable");
            }
            let url = match &event {
                NotificationEvent::UserRegistered {
                    confirmation_url, ..
                } => Some(confirmation_url.to_string()),
                NotificationEvent::UserResetPasswordRequested { reset_url, .. } => {
                    Some(reset_url.to_string())
                }
                _ => None,
            };
            self.sent.borrow_mut().push((event.kind(), url));
            Ok(())
        }
    }

    pub struct BackendFixture {
        pub db_connections: memory::Connections,
        pub guard: AbuseGuard,
        pub geocoding: DummyGeoCodingGW,
        pub notify: DummyNotifyGW,
        pub links: Links,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            Self {
                db_connections: memory::Connections::new(),
                guard: AbuseGuard::new(
                    RateLimitPresets::default(),
                    Default::default(),
                    DummyBotVerificationGW,
                ),
                geocoding: DummyGeoCodingGW,
                notify: DummyNotifyGW::default(),
                links: Links::new("https://gatherly.test".parse().unwrap()),
            }
        }

        /// Creates a verified user.
        pub fn create_user(&self, email: &str, role: Role) -> User {
            let user = User::build().email(email).role(role).verified().finish();
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| conn.create_user(&user))
                .unwrap();
            user
        }

        pub fn user(&self, id: &Id) -> User {
            self.db_connections.shared().unwrap().get_user(id).unwrap()
        }

        pub fn event(&self, id: &Id) -> Event {
            self.db_connections.shared().unwrap().get_event(id).unwrap()
        }

        pub fn event_count(&self) -> usize {
            let db = self.db_connections.shared().unwrap();
            [EventStatus::Active, EventStatus::Flagged, EventStatus::Removed]
                .into_iter()
                .map(|status| db.count_events_with_status(status).unwrap())
                .sum()
        }

        pub fn new_event(&self, title: &str) -> usecases::NewEvent {
            let starts_at = Timestamp::now() + time::Duration::days(7);
            usecases::NewEvent {
                title: title.into(),
                organization_id: None,
                starts_at,
                ends_at: starts_at + time::Duration::hours(3),
                timezone: Some("America/Detroit".into()),
                location: usecases::LocationInput::Resolved(Location {
                    place_id: "place-1".into(),
                    formatted_address: "1 Main St, Detroit".into(),
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

        /// Stores the event without rate limiting or bot verification.
        pub fn create_event(&self, principal: &Principal, new_event: usecases::NewEvent) -> Event {
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| {
                    usecases::create_new_event(
                        conn,
                        &self.guard.content_policy,
                        Some(principal),
                        new_event,
                        Timestamp::now(),
                    )
                })
                .unwrap()
        }

        pub fn create_comment(&self, principal: &Principal, event: &Event, body: &str) -> Comment {
            self.db_connections
                .exclusive()
                .unwrap()
                .transaction(|conn| {
                    usecases::create_comment(
                        conn,
                        &self.guard.content_policy,
                        Some(principal),
                        usecases::NewComment {
                            event_id: event.id.clone(),
                            parent_id: None,
                            body: body.into(),
                        },
                        Timestamp::now(),
                    )
                })
                .unwrap()
        }
    }
}
