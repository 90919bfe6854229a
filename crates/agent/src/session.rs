//! Per-session agent loops for multi-user front ends.
//!
//! Each session id maps to its own [`AgentLoop`], so contexts never mix.
//! The store is bounded: when full, the least recently used session is dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::loop_runner::AgentLoop;

/// Builds a fresh loop for a new session id.
pub type AgentFactory = Arc<dyn Fn(&str) -> AgentLoop + Send + Sync>;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;

struct Entry {
    agent: Arc<Mutex<AgentLoop>>,
    last_used: u64,
}

/// A bounded map of session id to agent loop.
#[derive(Clone)]
pub struct SessionStore {
    factory: AgentFactory,
    max_sessions: usize,
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(factory: AgentFactory, max_sessions: usize) -> Self {
        Self {
            factory,
            max_sessions: max_sessions.max(1),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(AtomicU64::new(0)),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Return the session's loop, creating it if needed.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<AgentLoop>> {
        let now = self.tick();
        let mut sessions = self.sessions.write().await;

        if let Some(entry) = sessions.get_mut(id) {
            entry.last_used = now;
            return Arc::clone(&entry.agent);
        }

        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                sessions.remove(&key);
                info!(session_id = %key, "Evicted least recently used session");
            }
        }

        debug!(session_id = %id, "Creating session");
        let agent = Arc::new(Mutex::new((self.factory)(id)));
        sessions.insert(
            id.to_string(),
            Entry {
                agent: Arc::clone(&agent),
                last_used: now,
            },
        );
        agent
    }

    /// Return the session's loop without creating one.
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<AgentLoop>>> {
        let now = self.tick();
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(id).map(|entry| {
            entry.last_used = now;
            Arc::clone(&entry.agent)
        })
    }

    /// Clear a session's context. Returns false if the session does not exist.
    pub async fn reset(&self, id: &str) -> bool {
        match self.get(id).await {
            Some(agent) => {
                agent.lock().await.reset_context();
                true
            }
            None => false,
        }
    }

    /// Drop a session entirely.
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Session ids, sorted.
    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
