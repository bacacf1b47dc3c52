use axum_helpers::{
    SiteOptions, create_production_app, create_router, health_router, with_site_pipeline,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Colored error reports before anything can fail
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::hotels::init_indexes(&state.db).await?;
    api::users::init(&state).await?;

    let views = api::views()?;
    let site = with_site_pipeline(
        api::pages(&state, &views),
        &SiteOptions {
            views,
            environment: state.config.environment.clone(),
            session: state.config.session.clone(),
        },
    );
    let plain = health_router(state.config.app.clone())
        .merge(api::health::router(state.mongo_client.clone()));

    let app = create_router(site, plain, &state.config.server);

    info!(
        "Starting {} v{} on {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.address()
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(state.mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Hotel listings shutdown complete");
    Ok(())
}
