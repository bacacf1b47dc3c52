//! # Axum Helpers
//!
//! Building blocks for the server-rendered site.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`session`]**: Cookie sessions, flash messages, the admin guard
//! - **[`context`]**: Per-request view context (user, path, flash)
//! - **[`views`]**: Handlebars layout and page rendering
//! - **[`errors`]**: Error kinds, error codes and the centralized error page
//! - **[`extractors`]**: UUID path extractor
//! - **[`http`]**: Security headers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{SiteOptions, Views, create_router, health_router, with_site_pipeline};
//!
//! let views = Views::builder()?.template("index", INDEX)?.build();
//! let options = SiteOptions { views, environment, session };
//! let site = with_site_pipeline(page_routes, &options);
//! let router = create_router(site, health_router(app_info!()), &server_config);
//! ```

pub mod context;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod session;
pub mod views;

pub use context::{RequestContext, request_context};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, SiteOptions, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal, with_site_pipeline,
};

pub use session::{
    AuthSession, Flash, FlashKind, FlashMessage, SessionUser, create_session_layer, require_admin,
};

pub use http::security_headers;

pub use errors::{AppError, ErrorCode, ErrorPages, ErrorReport, render_error_pages};

pub use extractors::UuidPath;

pub use views::{Page, ViewError, Views, ViewsBuilder};
