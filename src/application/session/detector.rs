//! Live session detection.
//!
//! Decides whether any scheduled session is live now, gating the expensive
//! live-data fetches. The verdict is cached under the `active_session`
//! namespace so repeated checks inside the TTL neither recompute nor
//! refetch the schedule.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::cache::{namespace, FreshnessCache};
use crate::domain::{SessionRecord, SessionWindow};
use crate::error::CacheError;
use crate::port::Clock;

/// Parse `sessions` in order, skipping entries that cannot be parsed.
fn windows(sessions: &[SessionRecord]) -> impl Iterator<Item = SessionWindow> + '_ {
    sessions
        .iter()
        .filter_map(|record| match SessionWindow::try_from(record) {
            Ok(window) => Some(window),
            Err(e) => {
                warn!(
                    session = record.session_name.as_deref().unwrap_or("unknown"),
                    error = %e,
                    "skipping malformed session window"
                );
                None
            }
        })
}

/// First session that is live at `now`, if any.
#[must_use]
pub fn find_live(sessions: &[SessionRecord], now: DateTime<Utc>) -> Option<SessionWindow> {
    windows(sessions).find(|window| window.is_live_at(now))
}

/// Whether any session is live at `now`.
///
/// Malformed windows are skipped and never abort the scan.
#[must_use]
pub fn is_live_now(sessions: &[SessionRecord], now: DateTime<Utc>) -> bool {
    find_live(sessions, now).is_some()
}

/// Cache-backed liveness checks.
#[derive(Debug, Clone)]
pub struct SessionDetector {
    cache: Arc<FreshnessCache<Value>>,
}

impl SessionDetector {
    pub fn new(cache: Arc<FreshnessCache<Value>>) -> Self {
        Self { cache }
    }

    fn now(&self) -> DateTime<Utc> {
        self.cache.clock().now()
    }

    /// Cached liveness verdict.
    ///
    /// `sessions` is only called when no fresh verdict is cached.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownNamespace`] if `active_session` has no
    /// configured TTL.
    pub fn is_live<F>(&self, sessions: F) -> Result<bool, CacheError>
    where
        F: FnOnce() -> Vec<SessionRecord>,
    {
        self.is_live_or_try(|| Ok::<_, CacheError>(sessions()))
    }

    /// Cached liveness verdict with a fallible schedule supplier.
    ///
    /// A supplier error is returned and no verdict is cached. A missing
    /// `active_session` TTL is reported before the supplier runs.
    pub fn is_live_or_try<F, E>(&self, sessions: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<Vec<SessionRecord>, E>,
        E: From<CacheError>,
    {
        self.cache.ttl_for(&namespace::ACTIVE_SESSION.into())?;
        if let Some(verdict) = self.cached_verdict() {
            return Ok(verdict);
        }
        let sessions = sessions()?;
        Ok(self.store_verdict(&sessions)?)
    }

    /// Cached liveness verdict with an async schedule fetch.
    pub async fn is_live_with<F, Fut, E>(&self, fetch: F) -> Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<SessionRecord>, E>>,
        E: From<CacheError>,
    {
        self.cache.ttl_for(&namespace::ACTIVE_SESSION.into())?;
        if let Some(verdict) = self.cached_verdict() {
            return Ok(verdict);
        }
        let sessions = fetch().await?;
        Ok(self.store_verdict(&sessions)?)
    }

    /// The session currently live, cached under `live_session`.
    ///
    /// Only a found session is cached; "nothing live" is recomputed on the
    /// next call.
    pub fn current_session<F>(&self, sessions: F) -> Result<Option<SessionWindow>, CacheError>
    where
        F: FnOnce() -> Vec<SessionRecord>,
    {
        self.cache.ttl_for(&namespace::LIVE_SESSION.into())?;
        if let Some(window) = self
            .cache
            .get(namespace::LIVE_SESSION)
            .and_then(|value| serde_json::from_value::<SessionWindow>(value).ok())
        {
            return Ok(Some(window));
        }

        let sessions = sessions();
        let Some(window) = find_live(&sessions, self.now()) else {
            debug!("no live session");
            return Ok(None);
        };

        match serde_json::to_value(&window) {
            Ok(value) => self.cache.set(namespace::LIVE_SESSION, value)?,
            Err(e) => warn!(error = %e, "failed to encode live session for caching"),
        }
        Ok(Some(window))
    }

    fn cached_verdict(&self) -> Option<bool> {
        self.cache
            .get(namespace::ACTIVE_SESSION)
            .and_then(|value| value.as_bool())
    }

    fn store_verdict(&self, sessions: &[SessionRecord]) -> Result<bool, CacheError> {
        let live = find_live(sessions, self.now());
        match &live {
            Some(window) => info!(session = window.label(), "active session found"),
            None => debug!(sessions = sessions.len(), "no active session"),
        }
        let verdict = live.is_some();
        self.cache
            .set(namespace::ACTIVE_SESSION, Value::Bool(verdict))?;
        Ok(verdict)
    }
}
