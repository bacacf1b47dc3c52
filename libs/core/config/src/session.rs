use crate::{env_or_default, env_parse_or, ConfigError, Environment, FromEnv};

/// Session cookie configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,
    /// Days of inactivity before a session expires
    pub ttl_days: i64,
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl SessionConfig {
    pub fn new(cookie_name: impl Into<String>, ttl_days: i64, secure: bool) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl_days,
            secure,
        }
    }
}

impl FromEnv for SessionConfig {
    /// Reads from environment variables with defaults:
    /// - SESSION_COOKIE_NAME: defaults to "hotels.sid"
    /// - SESSION_TTL_DAYS: defaults to 7
    /// - secure cookies follow APP_ENV (production only)
    fn from_env() -> Result<Self, ConfigError> {
        let cookie_name = env_or_default("SESSION_COOKIE_NAME", "hotels.sid");
        let ttl_days = env_parse_or("SESSION_TTL_DAYS", 7)?;

        Ok(Self {
            cookie_name,
            ttl_days,
            secure: Environment::from_env().use_https(),
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "hotels.sid".to_string(),
            ttl_days: 7,
            secure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        temp_env::with_vars(
            [
                ("SESSION_COOKIE_NAME", None::<&str>),
                ("SESSION_TTL_DAYS", None::<&str>),
                ("APP_ENV", None::<&str>),
            ],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert_eq!(config.cookie_name, "hotels.sid");
                assert_eq!(config.ttl_days, 7);
                assert!(!config.secure);
            },
        );
    }

    #[test]
    fn test_session_config_secure_in_production() {
        temp_env::with_vars(
            [("APP_ENV", Some("production")), ("SESSION_TTL_DAYS", Some("1"))],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert!(config.secure);
                assert_eq!(config.ttl_days, 1);
            },
        );
    }

    #[test]
    fn test_session_config_invalid_ttl() {
        temp_env::with_var("SESSION_TTL_DAYS", Some("a week"), || {
            let err = SessionConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_DAYS"));
        });
    }
}
