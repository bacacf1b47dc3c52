//! Server assembly, health endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{
//!     SiteOptions, create_production_app, create_router, health_router, with_site_pipeline,
//! };
//! use core_config::app_info;
//!
//! let site = with_site_pipeline(page_routes, &options);
//! let router = create_router(site, health_router(app_info!()), &server_config);
//! create_production_app(router, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{SiteOptions, create_production_app, create_router, with_site_pipeline};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
