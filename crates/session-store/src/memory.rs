use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::SessionId;
use domain::CheckoutSession;
use tokio::sync::RwLock;

use crate::{
    Result, SessionStoreError,
    store::{SessionStore, UpdateOptions},
};

/// In-memory session store.
///
/// The reference design keeps all sessions in a single long-lived map with
/// no eviction and no persistence across restarts.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, CheckoutSession>>>,
}

impl InMemorySessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clears all sessions.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: CheckoutSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&session.id) {
            return Err(SessionStoreError::IdCollision(session.id));
        }

        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<CheckoutSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn update(
        &self,
        session: CheckoutSession,
        options: UpdateOptions,
    ) -> Result<CheckoutSession> {
        let mut sessions = self.sessions.write().await;

        let stored = sessions
            .get(&session.id)
            .ok_or_else(|| SessionStoreError::SessionNotFound(session.id.clone()))?;

        if let Some(expected) = options.expected_status
            && stored.status != expected
        {
            return Err(SessionStoreError::StatusConflict {
                id: session.id.clone(),
                expected,
                actual: stored.status,
            });
        }

        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{LineItem, Money, SessionStatus};

    fn test_session(id: &str) -> CheckoutSession {
        CheckoutSession {
            id: SessionId::new(id),
            status: SessionStatus::Incomplete,
            line_items: vec![LineItem::new("latte", "Latte", 1)],
            total: Money::new(550, "USD").unwrap(),
            payment_capabilities: vec![],
            expires_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = InMemorySessionStore::new();
        let session = test_session("cs_1");

        store.insert(session.clone()).await.unwrap();

        let stored = store.get(&session.id).await.unwrap();
        assert_eq!(stored, Some(session));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let store = InMemorySessionStore::new();
        let stored = store.get(&SessionId::new("cs_missing")).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn insert_detects_id_collision() {
        let store = InMemorySessionStore::new();
        let session = test_session("cs_1");

        store.insert(session.clone()).await.unwrap();
        let result = store.insert(session.clone()).await;

        assert_eq!(result, Err(SessionStoreError::IdCollision(session.id)));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn update_unknown_id_fails() {
        let store = InMemorySessionStore::new();
        let session = test_session("cs_1");

        let result = store.update(session.clone(), UpdateOptions::new()).await;
        assert_eq!(result, Err(SessionStoreError::SessionNotFound(session.id)));
    }

    #[tokio::test]
    async fn update_replaces_stored_record() {
        let store = InMemorySessionStore::new();
        let mut session = test_session("cs_1");
        store.insert(session.clone()).await.unwrap();

        session.status = SessionStatus::Complete;
        store
            .update(session.clone(), UpdateOptions::new())
            .await
            .unwrap();

        let stored = store.get(&session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Complete);
    }

    #[tokio::test]
    async fn update_with_status_check_succeeds_on_match() {
        let store = InMemorySessionStore::new();
        let mut session = test_session("cs_1");
        store.insert(session.clone()).await.unwrap();

        session.status = SessionStatus::Complete;
        let result = store
            .update(
                session.clone(),
                UpdateOptions::expect_status(SessionStatus::Incomplete),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_with_status_check_fails_on_conflict() {
        let store = InMemorySessionStore::new();
        let mut session = test_session("cs_1");
        session.status = SessionStatus::Complete;
        store.insert(session.clone()).await.unwrap();

        let result = store
            .update(
                session.clone(),
                UpdateOptions::expect_status(SessionStatus::Incomplete),
            )
            .await;

        assert_eq!(
            result,
            Err(SessionStoreError::StatusConflict {
                id: session.id,
                expected: SessionStatus::Incomplete,
                actual: SessionStatus::Complete,
            })
        );
    }

    #[tokio::test]
    async fn clear_removes_all_sessions() {
        let store = InMemorySessionStore::new();
        store.insert(test_session("cs_1")).await.unwrap();
        store.insert(test_session("cs_2")).await.unwrap();

        store.clear().await;
        assert_eq!(store.session_count().await, 0);
    }
}
