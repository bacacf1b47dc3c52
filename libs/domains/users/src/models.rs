use axum_helpers::SessionUser;
use chrono::{DateTime, Utc};
use core_config::{ConfigError, env_optional};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Site user - only administrators log in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", with = "database::mongodb::uuid_as_string")]
    pub id: Uuid,
    /// Login name (unique)
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Submitted login form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Administrator account created at startup
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminSeed {
    /// Read `ADMIN_USERNAME` and `ADMIN_PASSWORD`; `None` unless both are set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match (env_optional("ADMIN_USERNAME"), env_optional("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Ok(Some(Self { username, password })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar("ADMIN_USERNAME".to_string())),
        }
    }
}
