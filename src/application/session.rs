// Session store - single source of the identity provider's access token
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: None,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The live session, or `None` when signed out or expired
    async fn current_session(&self) -> Option<Session>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    pub async fn replace(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub async fn clear(&self) {
        *self.session.write().await = None;
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn current_session(&self) -> Option<Session> {
        let guard = self.session.read().await;
        guard
            .as_ref()
            .filter(|s| !s.access_token.is_empty() && !s.is_expired(Utc::now()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_replace_and_clear() {
        let store = InMemorySessionStore::default();
        assert!(store.current_session().await.is_none());

        store.replace(Session::new("token-1")).await;
        assert_eq!(store.current_session().await.unwrap().access_token, "token-1");

        store.clear().await;
        assert!(store.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let mut session = Session::new("stale");
        session.expires_at = Some(Utc::now() - Duration::minutes(5));
        let store = InMemorySessionStore::new(Some(session));
        assert!(store.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_absent() {
        let store = InMemorySessionStore::new(Some(Session::new("")));
        assert!(store.current_session().await.is_none());
    }
}
