use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::api::CloudBackend;
use crate::config::{CreatorDefaults, CONSOLE_SESSION_TTL_SECS, MAX_CONSOLE_SESSIONS};
use crate::views::{InstanceListView, NodeCreator};

/// View state owned by one browser, keyed by its `console_id` cookie.
#[derive(Debug)]
pub struct ConsoleSession {
    pub listing: InstanceListView,
    pub creator: NodeCreator,
    pub flash_messages: Vec<String>,
    last_page: Option<&'static str>,
    last_seen: Instant,
}

impl ConsoleSession {
    pub fn new(defaults: &CreatorDefaults) -> Self {
        Self {
            listing: InstanceListView::new(),
            creator: NodeCreator::new(defaults),
            flash_messages: Vec::new(),
            last_page: None,
            last_seen: Instant::now(),
        }
    }

    /// Record that the browser is on `page`. Returns true when it arrived
    /// from another page (or nowhere), i.e. the page is freshly displayed.
    pub fn visit(&mut self, page: &'static str) -> bool {
        self.last_page.replace(page) != Some(page)
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CloudBackend>,
    pub consoles: Arc<Mutex<HashMap<String, ConsoleSession>>>,
    pub api_base_url: String,
    pub creator_defaults: CreatorDefaults,
    pub custom_css: Option<String>,
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(backend: Arc<dyn CloudBackend>, api_base_url: String, creator_defaults: CreatorDefaults) -> Self {
        Self {
            backend,
            consoles: Arc::new(Mutex::new(HashMap::new())),
            api_base_url,
            creator_defaults,
            custom_css: None,
            session_ttl: Duration::from_secs(CONSOLE_SESSION_TTL_SECS),
            max_sessions: MAX_CONSOLE_SESSIONS,
        }
    }

    pub fn with_session_limits(mut self, max_sessions: usize, session_ttl: Duration) -> Self {
        self.max_sessions = max_sessions.max(1);
        self.session_ttl = session_ttl;
        self
    }

    /// Lock the session map. Never hold the guard across an `.await`.
    pub fn lock_consoles(&self) -> MutexGuard<'_, HashMap<String, ConsoleSession>> {
        self.consoles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session_count(&self) -> usize {
        self.lock_consoles().len()
    }

    /// Run `f` against the session `console_id`, creating it when missing.
    ///
    /// Creating a session first drops sessions idle for longer than
    /// `session_ttl`, then the least recently seen ones beyond `max_sessions`.
    pub fn with_console<R>(&self, console_id: &str, f: impl FnOnce(&mut ConsoleSession) -> R) -> R {
        let mut consoles = self.lock_consoles();
        if !consoles.contains_key(console_id) {
            self.evict(&mut consoles);
        }
        let session = consoles
            .entry(console_id.to_string())
            .or_insert_with(|| ConsoleSession::new(&self.creator_defaults));
        session.last_seen = Instant::now();
        f(session)
    }

    fn evict(&self, consoles: &mut HashMap<String, ConsoleSession>) {
        let before = consoles.len();
        consoles.retain(|_, s| s.idle_for() < self.session_ttl);
        while consoles.len() >= self.max_sessions {
            let oldest = consoles
                .iter()
                .max_by_key(|(_, s)| s.idle_for())
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    consoles.remove(&id);
                }
                None => break,
            }
        }
        let evicted = before - consoles.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = consoles.len(), "Evicted console sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;

    fn state() -> AppState {
        let client = ApiClient::new(reqwest::Client::new(), "http://localhost:5000", "");
        AppState::new(Arc::new(client), "http://localhost:5000".into(), CreatorDefaults::default())
    }

    #[test]
    fn sessions_are_bounded() {
        let state = state().with_session_limits(3, Duration::from_secs(3600));
        for i in 0..10 {
            state.with_console(&format!("c{}", i), |_| ());
        }
        assert_eq!(state.session_count(), 3);
        assert!(state.lock_consoles().contains_key("c9"));
    }

    #[test]
    fn idle_sessions_are_dropped() {
        let state = state().with_session_limits(100, Duration::ZERO);
        state.with_console("one", |_| ());
        state.with_console("two", |_| ());
        assert_eq!(state.session_count(), 1);
        assert!(state.lock_consoles().contains_key("two"));
    }

    #[test]
    fn existing_session_is_reused() {
        let state = state().with_session_limits(1, Duration::from_secs(3600));
        state.with_console("one", |s| s.flash_messages.push("kept".into()));
        let flashes = state.with_console("one", |s| s.flash_messages.clone());
        assert_eq!(flashes, vec!["kept".to_string()]);
    }

    #[test]
    fn visit_reports_fresh_displays() {
        let mut session = ConsoleSession::new(&CreatorDefaults::default());
        assert!(session.visit("instances"));
        assert!(!session.visit("instances"));
        assert!(session.visit("create"));
        assert!(session.visit("instances"));
    }
}
