//! Per-request view context.
//!
//! [`request_context`] runs inside the session layer and resolves the
//! logged-in user, the request path and any pending flash messages once per
//! request. Handlers pick the result up with the [`RequestContext`]
//! extractor; the error-page stage reads the copy left on the response.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::errors::AppError;
use crate::session::{AuthSession, Flash, FlashMessage, SessionUser};

#[derive(Clone, Debug, Default, Serialize)]
pub struct RequestContext {
    pub user: Option<SessionUser>,
    pub path: String,
    pub flash: Vec<FlashMessage>,
}

impl RequestContext {
    /// Context for a visitor with no session data
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Read the user and consume pending flash messages.
    pub async fn load(session: &Session, path: &str) -> Result<Self, AppError> {
        let user = AuthSession::new(session).user().await?;
        let flash = Flash::new(session).take().await?;

        Ok(Self {
            user,
            path: path.to_string(),
            flash,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Middleware building the [`RequestContext`].
pub async fn request_context(session: Session, mut request: Request, next: Next) -> Response {
    let ctx = match RequestContext::load(&session, request.uri().path()).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(ctx.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalServerError("request context layer is not installed".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    async fn show(ctx: RequestContext) -> String {
        format!("{}|{}", ctx.path, ctx.user.is_some())
    }

    #[tokio::test]
    async fn test_context_is_available_to_handlers() {
        let app = Router::new()
            .route("/countries", get(show))
            .layer(middleware::from_fn(request_context))
            .layer(SessionManagerLayer::new(MemoryStore::default()));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/countries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.extensions().get::<RequestContext>().is_some());
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"/countries|false");
    }

    #[tokio::test]
    async fn test_missing_layer_is_an_internal_error() {
        let app = Router::new().route("/", get(show));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
