//! Fixed-window request counters.

use std::{collections::HashMap, time::Duration};

use parking_lot::Mutex;
use thiserror::Error;

use crate::entities::Timestamp;

/// At most `max_requests` per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub window: Duration,
    pub max_requests: u32,
}

impl RateLimit {
    pub const fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
        }
    }
}

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);

/// Minimum time between two sweeps over all windows.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Limits per kind of action.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPresets {
    pub auth         : RateLimit,
    pub create_event : RateLimit,
    pub comment      : RateLimit,
    pub report       : RateLimit,
    pub contact      : RateLimit,
}

impl Default for RateLimitPresets {
    fn default() -> Self {
        Self {
            auth: RateLimit::new(15 * MINUTE, 5),
            create_event: RateLimit::new(HOUR, 10),
            comment: RateLimit::new(MINUTE, 20),
            report: RateLimit::new(HOUR, 5),
            contact: RateLimit::new(HOUR, 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Error)]
#[error("Too many requests. Please try again later.")]
pub struct LimitExceeded {
    pub reset_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Timestamp,
}

#[derive(Debug, Default)]
struct Windows {
    by_identifier: HashMap<String, Window>,
    last_purge: Option<Timestamp>,
}

impl Windows {
    fn purge_expired(&mut self, now: Timestamp) -> usize {
        let count_before = self.by_identifier.len();
        self.by_identifier.retain(|_, w| w.reset_at > now);
        self.last_purge = Some(now);
        count_before - self.by_identifier.len()
    }

    fn purge_due(&self, now: Timestamp) -> bool {
        self.last_purge
            .map_or(true, |last| now >= last + PURGE_INTERVAL)
    }
}

/// In-memory rate limiter.
///
/// Counters are not persisted and a restart clears them.
/// The counter of an identifier is read and incremented
/// while holding a single lock. Expired windows are swept
/// at most once per [`PURGE_INTERVAL`] during a check.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, identifier: &str, limit: RateLimit) -> Decision {
        self.check_at(identifier, limit, Timestamp::now())
    }

    pub fn check_at(&self, identifier: &str, limit: RateLimit, now: Timestamp) -> Decision {
        let mut windows = self.windows.lock();
        if windows.purge_due(now) {
            let purged = windows.purge_expired(now);
            if purged > 0 {
                log::debug!("Purged {purged} expired rate limit windows");
            }
        }
        let window = windows
            .by_identifier
            .entry(identifier.to_owned())
            .and_modify(|w| {
                if now >= w.reset_at {
                    *w = Window {
                        count: 1,
                        reset_at: now + limit.window,
                    };
                } else {
                    w.count = w.count.saturating_add(1);
                }
            })
            .or_insert_with(|| Window {
                count: 1,
                reset_at: now + limit.window,
            });
        Decision {
            allowed: window.count <= limit.max_requests,
            remaining: limit.max_requests.saturating_sub(window.count),
            reset_at: window.reset_at,
        }
    }

    /// Like [`RateLimiter::check_at`] but fails if the request is not allowed.
    pub fn enforce_at(
        &self,
        identifier: &str,
        limit: RateLimit,
        now: Timestamp,
    ) -> Result<Decision, LimitExceeded> {
        let decision = self.check_at(identifier, limit, now);
        if !decision.allowed {
            log::info!("Rate limit exceeded for {identifier}");
            return Err(LimitExceeded {
                reset_at: decision.reset_at,
            });
        }
        Ok(decision)
    }

    pub fn enforce(&self, identifier: &str, limit: RateLimit) -> Result<Decision, LimitExceeded> {
        self.enforce_at(identifier, limit, Timestamp::now())
    }

    /// Drops all windows that have expired and returns their number.
    pub fn purge_expired(&self, now: Timestamp) -> usize {
        self.windows.lock().purge_expired(now)
    }

    pub fn len(&self) -> usize {
        self.windows.lock().by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn t0() -> Timestamp {
        Timestamp::try_from_secs(1_700_000_000).unwrap()
    }

    #[test]
    fn fourth_request_within_window_is_rejected() {
        let limiter = RateLimiter::new();
        let limit = RateLimit::new(Duration::from_secs(60), 3);
        let now = t0();
        for i in 0..3 {
            let d = limiter.check_at("ip:1", limit, now + Duration::from_secs(i));
            assert!(d.allowed);
            assert_eq!(d.remaining, 2 - i as u32);
            assert_eq!(d.reset_at, now + Duration::from_secs(60));
        }
        let d = limiter.check_at("ip:1", limit, now + Duration::from_secs(59));
        assert!(!d.allowed);
        assert_eq!(d.remaining, 0);

        // after the window has elapsed
        let d = limiter.check_at("ip:1", limit, now + Duration::from_secs(60));
        assert!(d.allowed);
        assert_eq!(d.remaining, 2);
    }

    #[test]
    fn identifiers_are_independent() {
        let limiter = RateLimiter::new();
        let limit = RateLimit::new(Duration::from_secs(60), 1);
        assert!(limiter.check_at("a", limit, t0()).allowed);
        assert!(!limiter.check_at("a", limit, t0()).allowed);
        assert!(limiter.check_at("b", limit, t0()).allowed);
    }

    #[test]
    fn enforce_reports_reset_time() {
        let limiter = RateLimiter::new();
        let limit = RateLimit::new(Duration::from_secs(60), 1);
        assert!(limiter.enforce_at("a", limit, t0()).is_ok());
        let err = limiter.enforce_at("a", limit, t0()).unwrap_err();
        assert_eq!(err.reset_at, t0() + Duration::from_secs(60));
    }

    #[test]
    fn purge_expired_windows() {
        let limiter = RateLimiter::new();
        let short = RateLimit::new(Duration::from_secs(10), 1);
        let long = RateLimit::new(Duration::from_secs(100), 1);
        limiter.check_at("a", short, t0());
        limiter.check_at("b", long, t0());
        assert_eq!(limiter.purge_expired(t0() + Duration::from_secs(10)), 1);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn sweep_expired_windows_while_checking() {
        let limiter = RateLimiter::new();
        let limit = RateLimit::new(Duration::from_secs(60), 5);
        for i in 0..1000 {
            limiter.check_at(&format!("signup:10.0.{}.{}", i / 256, i % 256), limit, t0());
        }
        assert_eq!(limiter.len(), 1000);

        // no sweep before the purge interval has elapsed
        limiter.check_at("signup:10.1.0.1", limit, t0() + Duration::from_secs(120));
        assert_eq!(limiter.len(), 1001);

        limiter.check_at("signup:10.1.0.2", limit, t0() + HOUR);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn sweeping_keeps_active_windows() {
        let limiter = RateLimiter::new();
        let limit = RateLimit::new(Duration::from_secs(60), 1);
        let long = RateLimit::new(HOUR, 1);
        limiter.check_at("a", limit, t0());
        limiter.check_at("b", long, t0());
        let later = t0() + PURGE_INTERVAL;
        assert!(!limiter.check_at("b", long, later).allowed);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn concurrent_requests_never_exceed_the_limit() {
        let limiter = Arc::new(RateLimiter::new());
        let limit = RateLimit::new(Duration::from_secs(3600), 10);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || {
                    (0..10)
                        .filter(|_| limiter.check("shared", limit).allowed)
                        .count()
                })
            })
            .collect();
        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 10);
    }

    #[test]
    fn default_presets() {
        let p = RateLimitPresets::default();
        assert_eq!(p.auth, RateLimit::new(Duration::from_secs(900), 5));
        assert_eq!(p.contact.max_requests, 3);
    }
}
