//! The canonical in-memory session set.

use tracing::{debug, info};

use crate::session::Session;

/// Owns the session list every derived view is computed from. Mutation
/// happens through the two operations below and nowhere else.
///
/// Mutation is sequential and user-triggered, so no interior locking is
/// needed. A refresh replaces the whole set or nothing: partial fetch
/// results are never merged in, and when two refreshes race the later
/// installer wins.
#[derive(Debug, Default)]
pub struct Registry {
    sessions: Vec<Session>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Install a complete fetch result, replacing whatever was here.
    pub fn replace_all(&mut self, sessions: Vec<Session>) {
        info!(count = sessions.len(), "installing refreshed session set");
        self.sessions = sessions;
    }

    /// Apply a representative assignment to the local copy. This is the
    /// optimistic half of the update: it runs as soon as the remote request
    /// is issued, because the transport never confirms delivery. Returns
    /// whether any session matched the id.
    pub fn assign(&mut self, id: i64, representative: &str) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                debug!(id, representative, "applying assignment locally");
                session.representative = representative.to_owned();
                true
            }
            None => false,
        }
    }
}
