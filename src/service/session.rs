//! Per-user session state.
//!
//! A session holds the model the user picked. Sessions are keyed by a random
//! identifier carried in a cookie and never share state with each other.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::ml::ModelKind;
use crate::service::ModelSelection;

/// Session identifier.
pub type SessionId = Uuid;

/// State of one user session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    selection: ModelSelection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected model, if any.
    pub fn selection(&self) -> ModelSelection {
        self.selection
    }

    /// Replace the selection. The last choice wins.
    pub fn select(&mut self, kind: ModelKind) {
        self.selection = Some(kind);
    }
}

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: DateTime<Utc>,
}

/// In-memory map of live sessions.
///
/// Sessions idle for longer than the TTL are dropped the next time a session
/// is created.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a new session with no selection.
    pub fn create(&self) -> SessionId {
        let removed = self.purge_idle();
        if removed > 0 {
            log::debug!("Purged {removed} idle sessions");
        }

        let id = Uuid::new_v4();
        self.sessions.write().insert(
            id,
            Entry {
                session: Session::new(),
                last_seen: Utc::now(),
            },
        );
        log::debug!("Created session {id}");
        id
    }

    /// Look up a session and mark it as seen.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Utc::now();
        Some(entry.session.clone())
    }

    /// Record a model choice. Returns `false` if the session does not exist.
    pub fn select(&self, id: &SessionId, kind: ModelKind) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(id) {
            Some(entry) => {
                entry.session.select(kind);
                entry.last_seen = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were removed.
    pub fn purge_idle(&self) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let cutoff = Utc::now()
            .checked_sub_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.purge_before(cutoff)
    }

    fn purge_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff);
        before - sessions.len()
    }
}
