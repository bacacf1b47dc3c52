//! Hotel pages
//!
//! Wires the hotels domain to MongoDB and the configured image host.

use axum::Router;
use axum_helpers::Views;
use domain_hotels::{
    CloudinaryImageHost, DisabledImageHost, HotelService, ImageHost, MongoHotelRepository,
    handlers,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

pub fn router(state: &AppState, views: Views) -> Router {
    let repository = MongoHotelRepository::new(&state.db);
    let service = HotelService::new(repository, image_host(state));

    handlers::router(service, views)
}

fn image_host(state: &AppState) -> Arc<dyn ImageHost> {
    match &state.config.cloudinary {
        Some(config) => {
            info!(cloud_name = %config.cloud_name, "Image uploads go to Cloudinary");
            Arc::new(CloudinaryImageHost::new(config.clone()))
        }
        None => {
            warn!("CLOUDINARY_NAME not set, image uploads are disabled");
            Arc::new(DisabledImageHost)
        }
    }
}

/// Create the hotel collection indexes
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoHotelRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create hotel indexes: {}", e))?;
    info!("Hotel collection indexes created");
    Ok(())
}
