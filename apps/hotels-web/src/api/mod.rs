//! Route assembly: each domain contributes its page router, health checks
//! stay outside the session pipeline.

pub mod health;
pub mod hotels;
pub mod users;

use axum::Router;
use axum_helpers::Views;

use crate::state::AppState;

/// Page routes from every domain, sharing one template registry
pub fn pages(state: &AppState, views: &Views) -> Router {
    Router::new()
        .merge(hotels::router(state, views.clone()))
        .merge(users::router(state, views.clone()))
}

/// Build the template registry with every domain's templates
pub fn views() -> eyre::Result<Views> {
    let views = Views::builder()?
        .templates(domain_hotels::views::templates())?
        .templates(domain_users::handlers::templates())?
        .build();
    Ok(views)
}
