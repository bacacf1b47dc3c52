use super::shutdown::ShutdownCoordinator;
use crate::context::request_context;
use crate::errors::{ErrorPages, handlers::not_found, render_error_pages};
use crate::http::security::security_headers;
use crate::session::create_session_layer;
use crate::views::Views;
use axum::{Router, middleware};
use core_config::{Environment, server::ServerConfig, session::SessionConfig};
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Settings shared by every rendered page
#[derive(Clone)]
pub struct SiteOptions {
    pub views: Views,
    pub environment: Environment,
    pub session: SessionConfig,
}

/// Wrap page routes in the request pipeline.
///
/// From the outside in: session layer, error-page stage, request-context
/// stage. Route-level guards (see [`require_admin`](crate::session::require_admin))
/// run inside the context stage. Unknown paths fall through to the 404 page.
pub fn with_site_pipeline(pages: Router, options: &SiteOptions) -> Router {
    let error_pages = ErrorPages::new(options.views.clone(), &options.environment);

    pages
        .fallback(not_found)
        .layer(middleware::from_fn(request_context))
        .layer(middleware::from_fn_with_state(
            error_pages,
            render_error_pages,
        ))
        .layer(create_session_layer(&options.session))
}

/// Assemble the final router.
///
/// `site` is the output of [`with_site_pipeline`]; `plain` carries routes that
/// need no session (health checks). Static files are served from
/// `server_config.public_dir` under `/public`. Tracing, security headers and
/// compression wrap everything.
pub fn create_router(site: Router, plain: Router, server_config: &ServerConfig) -> Router {
    plain
        .nest_service("/public", ServeDir::new(&server_config.public_dir))
        .merge(site)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
}

/// Serve with graceful shutdown, then run `cleanup` bounded by
/// `shutdown_timeout`.
///
/// ```ignore
/// let client = state.mongo.clone();
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Serve can also end on an I/O error; cleanup still has to run
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}
