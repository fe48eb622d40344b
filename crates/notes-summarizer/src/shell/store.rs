//! In-memory session registry with TTL and capacity eviction

use dashmap::DashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::SessionConfig;

use super::session::InteractionState;

struct SessionEntry {
    state: InteractionState,
    last_seen: Instant,
}

/// Interaction state per browser session
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionEntry>,
    max_sessions: usize,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: config.max_sessions.max(1),
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }

    /// Snapshot of a live session's state
    pub fn get(&self, id: &Uuid) -> Option<InteractionState> {
        let mut entry = self.sessions.get_mut(id)?;
        if entry.last_seen.elapsed() > self.ttl {
            drop(entry);
            self.sessions.remove(id);
            tracing::debug!("Session {} expired", id);
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.state.clone())
    }

    /// State for `id`, or a fresh session when it is missing or expired
    pub fn load(&self, id: Option<Uuid>) -> (Uuid, InteractionState) {
        if let Some(id) = id {
            if let Some(state) = self.get(&id) {
                return (id, state);
            }
        }
        let id = Uuid::new_v4();
        self.save(id, InteractionState::default());
        (id, InteractionState::default())
    }

    /// Store the state for a session
    pub fn save(&self, id: Uuid, state: InteractionState) {
        if !self.sessions.contains_key(&id) {
            self.make_room();
        }
        self.sessions.insert(
            id,
            SessionEntry {
                state,
                last_seen: Instant::now(),
            },
        );
    }

    pub fn remove(&self, id: &Uuid) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop expired sessions, then the least recently used until below capacity
    fn make_room(&self) {
        let ttl = self.ttl;
        self.sessions.retain(|_, entry| entry.last_seen.elapsed() <= ttl);

        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.last_seen)
                .map(|entry| *entry.key());
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    tracing::debug!("Evicted session {}", id);
                }
                None => break,
            }
        }
    }
}
