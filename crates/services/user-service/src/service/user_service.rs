//! User service - Registration, lookup, authentication and promotion.
//!
//! Authorization is not decided here; see `crate::access`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use domain::{
    DomainError, DomainResult, NewUser, Password, PasswordPolicySet, PlainPassword, Uid,
    UserEntity, UserInfo, UserRole,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user.
    ///
    /// The password must satisfy every configured policy (`InvalidPassword`
    /// otherwise) and the username must be free (`DuplicateUser`).
    async fn register(&self, new_user: NewUser) -> DomainResult<UserEntity>;

    /// Look a user up by uid
    async fn get_by_id(&self, uid: Uid) -> DomainResult<Option<UserEntity>>;

    /// Look a user up by username
    async fn get_by_username(&self, username: &str) -> DomainResult<Option<UserEntity>>;

    /// Check credentials. Unknown username and wrong password both yield
    /// `Unauthorized`.
    async fn authenticate(
        &self,
        username: &str,
        password: &PlainPassword,
    ) -> DomainResult<UserEntity>;

    /// Promote a user to admin. Unknown uids are a `BadRequest`.
    async fn grant_admin(&self, uid: Uid) -> DomainResult<()>;

    /// Number of registered users
    async fn user_count(&self) -> DomainResult<usize>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    policies: PasswordPolicySet,
}

impl UserManager {
    /// Create new user service instance with repository and password policies
    pub fn new(repo: Arc<dyn UserRepository>, policies: PasswordPolicySet) -> Self {
        Self { repo, policies }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, new_user: NewUser) -> DomainResult<UserEntity> {
        if let Err(e) = self.policies.validate(&new_user.password) {
            warn!(username = %new_user.username, "Registration rejected: {}", e);
            return Err(e);
        }

        // Cheap early exit before hashing; the store re-checks under its lock
        if self.repo.find_by_username(&new_user.username).await?.is_some() {
            warn!(username = %new_user.username, "Registration rejected: username taken");
            return Err(DomainError::duplicate_user(new_user.username));
        }

        let password = Password::hash(&new_user.password)?;
        let info = UserInfo::new(
            new_user.username,
            new_user.name,
            new_user.birthdate,
            new_user.role,
            password,
        );

        let entity = self.repo.allocate_and_insert(info).await?;
        info!(
            uid = entity.uid,
            username = %entity.username(),
            role = %entity.role(),
            "User registered"
        );

        Ok(entity)
    }

    async fn get_by_id(&self, uid: Uid) -> DomainResult<Option<UserEntity>> {
        debug!(uid, "Lookup by id");
        self.repo.find_by_id(uid).await
    }

    async fn get_by_username(&self, username: &str) -> DomainResult<Option<UserEntity>> {
        debug!(username, "Lookup by username");
        self.repo.find_by_username(username).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &PlainPassword,
    ) -> DomainResult<UserEntity> {
        match self.repo.find_by_username(username).await? {
            Some(user) if user.info.verify_password(password) => Ok(user),
            Some(_) => {
                warn!(username, "Authentication failed");
                Err(DomainError::Unauthorized)
            }
            None => {
                Password::verify_dummy(password);
                warn!(username, "Authentication failed");
                Err(DomainError::Unauthorized)
            }
        }
    }

    async fn grant_admin(&self, uid: Uid) -> DomainResult<()> {
        match self.repo.update_role(uid, UserRole::Admin).await {
            Ok(entity) => {
                info!(uid, username = %entity.username(), "User promoted to admin");
                Ok(())
            }
            Err(DomainError::NotFound(_)) => {
                Err(DomainError::bad_request(format!("Unknown user id {}", uid)))
            }
            Err(e) => Err(e),
        }
    }

    async fn user_count(&self) -> DomainResult<usize> {
        self.repo.count().await
    }
}
