//! Session resolution from the external auth provider's state stream.
//!
//! The provider owns the identity; this module only derives a `Session`
//! (bearer id plus the admin flag from the profile store) each time the
//! auth state changes, and hands it to consumers as an explicit value
//! rather than ambient global state.

use std::sync::Arc;

use eigalog_models::{Session, UserId};
use eigalog_store::ProfileStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Resolve the admin flag for a signed-in user from their profile document.
///
/// A missing document and a failed lookup both resolve to a regular user;
/// the page never fails because the profile read did. The failure is
/// logged so it stays observable.
pub async fn resolve_session(user_id: UserId, profiles: &dyn ProfileStore) -> Session {
    let admin = match profiles.profile(&user_id).await {
        Ok(Some(profile)) => profile.admin,
        Ok(None) => false,
        Err(e) => {
            warn!("Profile lookup failed for {}: {}", user_id, e);
            false
        }
    };
    Session { user_id, admin }
}

/// Subscription to auth-state changes that keeps a resolved session
/// current on a watch channel.
///
/// Dropping the resolver ends the subscription: the background task is
/// aborted and no further updates are delivered.
pub struct SessionResolver {
    rx: watch::Receiver<Option<Session>>,
    task: JoinHandle<()>,
}

impl SessionResolver {
    pub fn spawn(
        mut auth_rx: watch::Receiver<Option<UserId>>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            loop {
                let current = auth_rx.borrow_and_update().clone();
                let session = match current {
                    Some(user_id) => Some(resolve_session(user_id, profiles.as_ref()).await),
                    None => None,
                };
                if tx.send(session).is_err() {
                    break;
                }
                if auth_rx.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Receiver for consumers that want to follow session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.rx.clone()
    }

    /// Most recently resolved session, if any.
    pub fn current(&self) -> Option<Session> {
        self.rx.borrow().clone()
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eigalog_models::UserProfile;
    use eigalog_store::{MemoryStore, StoreError};

    struct FailingProfiles;

    #[async_trait]
    impl ProfileStore for FailingProfiles {
        async fn profile(&self, _user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
            Err(StoreError::Malformed("profile backend down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_resolve_session_reads_admin_flag() {
        let store = MemoryStore::new();
        store
            .put_profile(UserId("mod".to_string()), UserProfile { admin: true })
            .await;

        let session = resolve_session(UserId("mod".to_string()), &store).await;
        assert!(session.admin);

        let session = resolve_session(UserId("alice".to_string()), &store).await;
        assert!(!session.admin);
    }

    #[tokio::test]
    async fn test_resolve_session_defaults_to_non_admin_on_error() {
        let session = resolve_session(UserId("mod".to_string()), &FailingProfiles).await;
        assert_eq!(session.user_id, UserId("mod".to_string()));
        assert!(!session.admin);
    }

    #[tokio::test]
    async fn test_resolver_follows_auth_state_changes() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_profile(UserId("mod".to_string()), UserProfile { admin: true })
            .await;

        let (auth_tx, auth_rx) = watch::channel(None);
        let resolver = SessionResolver::spawn(auth_rx, store);
        let mut rx = resolver.subscribe();

        // Initial state resolves to "no identity".
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), None);

        auth_tx.send(Some(UserId("mod".to_string()))).unwrap();
        rx.changed().await.unwrap();
        let session = rx.borrow().clone().unwrap();
        assert_eq!(session.user_id, UserId("mod".to_string()));
        assert!(session.admin);

        auth_tx.send(None).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), None);
    }

    #[tokio::test]
    async fn test_dropping_resolver_ends_subscription() {
        let store = Arc::new(MemoryStore::new());
        let (_auth_tx, auth_rx) = watch::channel(None);

        let resolver = SessionResolver::spawn(auth_rx, store);
        let mut rx = resolver.subscribe();
        rx.changed().await.unwrap();

        drop(resolver);

        // The publishing side is torn down with the task; the subscription
        // delivers nothing further.
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), None);
    }
}
