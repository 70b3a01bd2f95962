//! Session Store — in-memory map of interview sessions keyed by session id.
//!
//! Each session sits behind its own `tokio::sync::Mutex`, held for the whole
//! turn: at most one turn is ever in flight per session, while distinct
//! sessions proceed concurrently. Sessions share no mutable state and there
//! is no process-wide singleton — the store is plain data in `AppState`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::interview::engine::InterviewSession;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a session and returns its id.
    pub async fn insert(&self, session: InterviewSession) -> Uuid {
        let id = session.id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Looks up a session handle. Lock the returned mutex to read or process
    /// a turn against it.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<InterviewSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateProfile;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            years_experience: 7,
            desired_positions: "Backend Engineer".to_string(),
            location: "London".to_string(),
            tech_stack: "Python, SQL".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let store = SessionStore::new();
        let id = store.insert(InterviewSession::new(profile())).await;

        let handle = store.get(id).await.expect("session should exist");
        assert_eq!(handle.lock().await.id, id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.insert(InterviewSession::new(profile())).await;
        let b = store.insert(InterviewSession::new(profile())).await;

        store.get(a).await.unwrap().lock().await.started = true;

        assert!(!store.get(b).await.unwrap().lock().await.started);
    }
}
