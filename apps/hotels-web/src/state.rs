//! Shared application state, built once at startup and handed to the
//! routers that need it.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares the connection pool)
    pub mongo_client: Client,
    pub db: Database,
}
