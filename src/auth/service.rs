use std::sync::Arc;

use tracing::warn;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{User, UserStore};
use crate::error::ApiError;

/// Mediates the password-related invariants; everything else is a
/// pass-through to the store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Lookup-then-create. The check and the insert are not wrapped in a
    /// transaction and the schema has no unique constraint, so two
    /// concurrent registrations of the same name can both land.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        if username.is_empty() {
            return Err(ApiError::Validation("username must not be empty".into()));
        }
        if self.store.get_by_username(username).await?.is_some() {
            return Err(ApiError::DuplicateUsername);
        }
        let hash = hash_password(password).map_err(ApiError::Store)?;
        self.store.create(username, &hash).await?;
        Ok(())
    }

    /// Unknown user, store failure, malformed stored hash and a wrong
    /// password are all indistinguishable `false`.
    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        let user = match self.store.get_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "user lookup failed during authentication");
                return false;
            }
        };
        verify_password(password, &user.password_hash).unwrap_or(false)
    }

    pub async fn get(&self, id: i32) -> Result<User, ApiError> {
        self.store.get_by_id(id).await?.ok_or(ApiError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.store.list().await?)
    }

    /// Replaces username and password in place; the password is re-hashed so
    /// the store never sees a plaintext credential.
    pub async fn update(&self, id: i32, username: &str, password: &str) -> Result<(), ApiError> {
        if username.is_empty() {
            return Err(ApiError::Validation("username must not be empty".into()));
        }
        let hash = hash_password(password).map_err(ApiError::Store)?;
        if !self.store.update(id, username, &hash).await? {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if !self.store.delete(id).await? {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::InMemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserStore::default()))
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let svc = service();
        svc.register("alice", "pw123").await.expect("register");

        let users = svc.list().await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
        assert_ne!(users[0].password_hash, "pw123");
        assert!(!users[0].password_hash.is_empty());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let svc = service();
        svc.register("alice", "pw").await.expect("first register");
        let err = svc.register("alice", "other").await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUsername));

        // The failed attempt left no second row behind.
        let users = svc.list().await.expect("list");
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_empty_username() {
        let err = service().register("", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn authenticate_truth_table() {
        let svc = service();
        svc.register("alice", "pw123").await.expect("register");

        assert!(svc.authenticate("alice", "pw123").await);
        assert!(!svc.authenticate("alice", "wrong").await);
        assert!(!svc.authenticate("unknown", "pw123").await);
        assert!(!svc.authenticate("", "pw123").await);
        assert!(!svc.authenticate("alice", "").await);
    }

    #[tokio::test]
    async fn authenticate_swallows_malformed_stored_hash() {
        let store = Arc::new(InMemoryUserStore::default());
        store.create("broken", "not-a-hash").await.unwrap();
        let svc = UserService::new(store);
        assert!(!svc.authenticate("broken", "anything").await);
    }

    #[tokio::test]
    async fn update_rehashes_and_delete_removes() {
        let svc = service();
        svc.register("alice", "pw").await.expect("register");
        let id = svc.list().await.expect("list")[0].id;

        svc.update(id, "alice2", "pw2").await.expect("update");
        assert!(svc.authenticate("alice2", "pw2").await);
        assert!(!svc.authenticate("alice", "pw").await);
        let stored = svc.get(id).await.expect("get");
        assert_ne!(stored.password_hash, "pw2");

        svc.delete(id).await.expect("delete");
        assert!(matches!(svc.get(id).await.unwrap_err(), ApiError::NotFound));
        assert!(matches!(
            svc.delete(id).await.unwrap_err(),
            ApiError::NotFound
        ));
        assert!(matches!(
            svc.update(id, "x", "y").await.unwrap_err(),
            ApiError::NotFound
        ));
    }
}
