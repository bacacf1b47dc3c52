use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig, session::SessionConfig};
use database::mongodb::MongoConfig;
use domain_hotels::CloudinaryConfig;
use domain_users::AdminSeed;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub environment: Environment,
    /// Image uploads are disabled when unset
    pub cloudinary: Option<CloudinaryConfig>,
    /// First administrator, created at startup when missing
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            session: SessionConfig::from_env()?,
            environment: Environment::from_env(),
            cloudinary: CloudinaryConfig::from_env()?,
            admin: AdminSeed::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("APP_ENV", None),
                ("PORT", None),
                ("CLOUDINARY_NAME", None),
                ("ADMIN_USERNAME", None),
                ("ADMIN_PASSWORD", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "hotels_web");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.session.cookie_name, "hotels.sid");
                assert!(config.cloudinary.is_none());
                assert!(config.admin.is_none());
            },
        );
    }

    #[test]
    fn test_config_with_image_host_and_admin() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("CLOUDINARY_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("key")),
                ("CLOUDINARY_API_SECRET", Some("secret")),
                ("ADMIN_USERNAME", Some("admin")),
                ("ADMIN_PASSWORD", Some("letmein")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.cloudinary.unwrap().cloud_name, "demo");
                assert_eq!(config.admin.unwrap().username, "admin");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [("MONGODB_URL", None::<&str>), ("MONGO_URL", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL"));
            },
        );
    }

    #[test]
    fn test_config_rejects_partial_image_host() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("CLOUDINARY_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", None),
                ("CLOUDINARY_API_SECRET", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("CLOUDINARY_API_KEY"));
            },
        );
    }
}
