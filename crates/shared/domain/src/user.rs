//! User domain entity and related types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::password::{Password, PlainPassword};

/// System-assigned user identifier
pub type Uid = u64;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    #[default]
    #[serde(rename = "user")]
    Regular,
    #[serde(rename = "admin")]
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Regular,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Regular => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Registration input: everything a caller provides, password still in plain text.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    #[serde(default)]
    pub role: UserRole,
    pub password: PlainPassword,
}

impl NewUser {
    /// New regular user
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        birthdate: NaiveDateTime,
        password: impl Into<PlainPassword>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            birthdate,
            role: UserRole::Regular,
            password: password.into(),
        }
    }

    /// Override the initial role (used for seeded administrators)
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Stored user data. The password can be verified but never read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub role: UserRole,
    password: Password,
}

impl UserInfo {
    pub fn new(
        username: String,
        name: String,
        birthdate: NaiveDateTime,
        role: UserRole,
        password: Password,
    ) -> Self {
        Self {
            username,
            name,
            birthdate,
            role,
            password,
        }
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, candidate: &PlainPassword) -> bool {
        self.password.verify(candidate)
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    pub uid: Uid,
    pub info: UserInfo,
}

impl UserEntity {
    pub fn new(uid: Uid, info: UserInfo) -> Self {
        Self { uid, info }
    }

    pub fn username(&self) -> &str {
        &self.info.username
    }

    pub fn role(&self) -> UserRole {
        self.info.role
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.info.role.is_admin()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// System-assigned identifier
    pub uid: Uid,
    /// Unique login name
    pub username: String,
    /// Display name
    pub name: String,
    /// Date of birth
    pub birthdate: NaiveDateTime,
    /// User role
    pub role: UserRole,
}

impl From<&UserEntity> for UserResponse {
    fn from(entity: &UserEntity) -> Self {
        Self {
            uid: entity.uid,
            username: entity.info.username.clone(),
            name: entity.info.name.clone(),
            birthdate: entity.info.birthdate,
            role: entity.info.role,
        }
    }
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        Self {
            uid: entity.uid,
            username: entity.info.username,
            name: entity.info.name,
            birthdate: entity.info.birthdate,
            role: entity.info.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birthdate() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2002-04-22T20:30:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn entity() -> UserEntity {
        let password = Password::from_hash("$argon2id$placeholder".to_string());
        UserEntity::new(
            7,
            UserInfo::new(
                "alice".to_string(),
                "Alice".to_string(),
                birthdate(),
                UserRole::Regular,
                password,
            ),
        )
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Regular).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let parsed: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn test_role_from_str_defaults_to_regular() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("user"), UserRole::Regular);
        assert_eq!(UserRole::from("root"), UserRole::Regular);
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_new_user_role_defaults_to_regular() {
        let json = r#"{"username":"alice","name":"Alice","birthdate":"2002-04-22T20:30:00","password":"longenough1"}"#;
        let new_user: NewUser = serde_json::from_str(json).unwrap();
        assert_eq!(new_user.role, UserRole::Regular);
        assert_eq!(new_user.birthdate, birthdate());
        assert_eq!(new_user.password.expose(), "longenough1");
    }

    #[test]
    fn test_response_has_no_password() {
        let response = UserResponse::from(&entity());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["uid"], 7);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "user");
        assert_eq!(json["birthdate"], "2002-04-22T20:30:00");
        assert!(json.get("password").is_none());
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_debug_output_hides_password() {
        let new_user = NewUser::new("alice", "Alice", birthdate(), "longenough1");
        assert!(!format!("{:?}", new_user).contains("longenough1"));
    }
}
