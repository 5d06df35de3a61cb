//! In-memory user repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use domain::{DomainError, DomainResult, Uid, UserEntity, UserInfo, UserRole, FIRST_UID};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Assign the next uid and store the user under both indices.
    ///
    /// Fails with `DuplicateUser` if the username is taken; no uid is
    /// consumed in that case.
    async fn allocate_and_insert(&self, info: UserInfo) -> DomainResult<UserEntity>;

    /// Find user by uid
    async fn find_by_id(&self, uid: Uid) -> DomainResult<Option<UserEntity>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<UserEntity>>;

    /// Change a stored user's role in place
    async fn update_role(&self, uid: Uid, role: UserRole) -> DomainResult<UserEntity>;

    /// Number of stored users
    async fn count(&self) -> DomainResult<usize>;
}

#[derive(Debug)]
struct Registry {
    next_uid: Uid,
    by_id: HashMap<Uid, UserEntity>,
    by_username: HashMap<String, Uid>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            next_uid: FIRST_UID,
            by_id: HashMap::new(),
            by_username: HashMap::new(),
        }
    }
}

/// Process-local user store.
///
/// The uid counter and both indices sit behind a single lock, so an insert
/// is observed either completely or not at all.
#[derive(Debug, Default)]
pub struct UserStore {
    registry: RwLock<Registry>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn allocate_and_insert(&self, info: UserInfo) -> DomainResult<UserEntity> {
        let mut registry = self.registry.write().await;

        if registry.by_username.contains_key(&info.username) {
            return Err(DomainError::duplicate_user(info.username));
        }

        let uid = registry.next_uid;
        registry.next_uid += 1;

        let entity = UserEntity::new(uid, info);
        registry.by_username.insert(entity.info.username.clone(), uid);
        registry.by_id.insert(uid, entity.clone());

        Ok(entity)
    }

    async fn find_by_id(&self, uid: Uid) -> DomainResult<Option<UserEntity>> {
        let registry = self.registry.read().await;
        Ok(registry.by_id.get(&uid).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<UserEntity>> {
        let registry = self.registry.read().await;
        Ok(registry
            .by_username
            .get(username)
            .and_then(|uid| registry.by_id.get(uid))
            .cloned())
    }

    async fn update_role(&self, uid: Uid, role: UserRole) -> DomainResult<UserEntity> {
        let mut registry = self.registry.write().await;
        let entity = registry
            .by_id
            .get_mut(&uid)
            .ok_or_else(|| DomainError::not_found(format!("user {}", uid)))?;

        entity.info.role = role;
        Ok(entity.clone())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.registry.read().await.by_id.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use domain::Password;

    fn info(username: &str) -> UserInfo {
        UserInfo::new(
            username.to_string(),
            username.to_uppercase(),
            NaiveDateTime::default(),
            UserRole::Regular,
            Password::from_hash(format!("hash-of-{}", username)),
        )
    }

    #[tokio::test]
    async fn test_uids_start_at_one_and_increase() {
        let store = UserStore::new();

        let first = store.allocate_and_insert(info("alice")).await.unwrap();
        let second = store.allocate_and_insert(info("bob")).await.unwrap();

        assert_eq!(first.uid, 1);
        assert_eq!(second.uid, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_does_not_consume_uid() {
        let store = UserStore::new();

        store.allocate_and_insert(info("alice")).await.unwrap();
        let err = store.allocate_and_insert(info("alice")).await.unwrap_err();
        let bob = store.allocate_and_insert(info("bob")).await.unwrap();

        assert_eq!(err, DomainError::duplicate_user("alice"));
        assert_eq!(bob.uid, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_both_indices() {
        let store = UserStore::new();
        let alice = store.allocate_and_insert(info("alice")).await.unwrap();

        assert_eq!(store.find_by_id(alice.uid).await.unwrap(), Some(alice.clone()));
        assert_eq!(store.find_by_username("alice").await.unwrap(), Some(alice));
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
        assert_eq!(store.find_by_username("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_role_is_visible_through_both_indices() {
        let store = UserStore::new();
        let alice = store.allocate_and_insert(info("alice")).await.unwrap();

        let updated = store.update_role(alice.uid, UserRole::Admin).await.unwrap();
        assert_eq!(updated.info.role, UserRole::Admin);

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.info.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_update_role_unknown_uid() {
        let store = UserStore::new();
        let err = store.update_role(9, UserRole::Admin).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
