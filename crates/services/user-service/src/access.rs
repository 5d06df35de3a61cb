//! Access rules for protected operations.
//!
//! Callers reach these functions already authenticated. Admins may look up
//! anyone; regular users only themselves. Only admins may promote.

use std::sync::Arc;

use tracing::warn;

use domain::{DomainError, DomainResult, Uid, UserEntity};

use crate::service::UserService;

/// Which user a lookup is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Uid(Uid),
    Username(String),
}

impl LookupTarget {
    /// Exactly one of the two selectors must be present.
    pub fn from_query(uid: Option<Uid>, username: Option<String>) -> DomainResult<Self> {
        match (uid, username) {
            (Some(uid), None) => Ok(LookupTarget::Uid(uid)),
            (None, Some(username)) => Ok(LookupTarget::Username(username)),
            (None, None) => Err(DomainError::bad_request(
                "Either id or username must be specified",
            )),
            (Some(_), Some(_)) => Err(DomainError::bad_request(
                "Only one of id or username may be specified",
            )),
        }
    }

    /// True if this target names the given user
    pub fn refers_to(&self, entity: &UserEntity) -> bool {
        match self {
            LookupTarget::Uid(uid) => *uid == entity.uid,
            LookupTarget::Username(username) => username == entity.username(),
        }
    }
}

impl std::fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupTarget::Uid(uid) => write!(f, "user id {}", uid),
            LookupTarget::Username(username) => write!(f, "user '{}'", username),
        }
    }
}

/// Decide whether `caller` may look up `target`.
pub fn authorize_lookup(caller: &UserEntity, target: &LookupTarget) -> DomainResult<()> {
    if caller.is_admin() || target.refers_to(caller) {
        Ok(())
    } else {
        warn!(caller = caller.uid, target = %target, "Lookup denied");
        Err(DomainError::Forbidden)
    }
}

/// Decide whether `caller` may promote other users.
pub fn authorize_promotion(caller: &UserEntity) -> DomainResult<()> {
    if caller.is_admin() {
        Ok(())
    } else {
        warn!(caller = caller.uid, "Promotion denied");
        Err(DomainError::Forbidden)
    }
}

/// Protected operations: access check first, then the service call.
#[derive(Clone)]
pub struct AccessGate {
    users: Arc<dyn UserService>,
}

impl AccessGate {
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }

    /// Look up a user on behalf of `caller`.
    ///
    /// `Forbidden` is decided before existence, so regular users cannot
    /// probe for other accounts.
    pub async fn lookup(
        &self,
        caller: &UserEntity,
        target: &LookupTarget,
    ) -> DomainResult<UserEntity> {
        authorize_lookup(caller, target)?;

        let found = match target {
            LookupTarget::Uid(uid) => self.users.get_by_id(*uid).await?,
            LookupTarget::Username(username) => self.users.get_by_username(username).await?,
        };

        found.ok_or_else(|| DomainError::not_found(target.to_string()))
    }

    /// Promote `uid` to admin on behalf of `caller`.
    pub async fn promote(&self, caller: &UserEntity, uid: Uid) -> DomainResult<()> {
        authorize_promotion(caller)?;
        self.users.grant_admin(uid).await
    }
}
