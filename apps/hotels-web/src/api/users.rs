//! Login and logout pages, plus administrator bootstrap

use axum::Router;
use axum_helpers::Views;
use domain_users::{MongoUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState, views: Views) -> Router {
    let service = UserService::new(MongoUserRepository::new(&state.db));
    handlers::router(service, views)
}

/// Create the user indexes and seed the configured administrator
pub async fn init(state: &AppState) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(&state.db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");

    if let Some(seed) = state.config.admin.clone() {
        UserService::new(repository)
            .seed_admin(seed)
            .await
            .map_err(|e| eyre::eyre!("Failed to seed administrator: {}", e))?;
    }

    Ok(())
}
