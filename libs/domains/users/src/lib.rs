//! Users Domain
//!
//! Administrator accounts: Argon2 password login, logout, and seeding the
//! first administrator from the environment at startup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{AdminSeed, MongoUserRepository, UserService, handlers};
//! use axum_helpers::Views;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoUserRepository::new(&client.database("hotels"));
//! repository.init_indexes().await?;
//!
//! let service = UserService::new(repository);
//! if let Some(seed) = AdminSeed::from_env()? {
//!     service.seed_admin(seed).await?;
//! }
//!
//! let views = Views::builder()?.templates(handlers::templates())?.build();
//! let router = handlers::router(service, views);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{AdminSeed, LoginForm, User};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
