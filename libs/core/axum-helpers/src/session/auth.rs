use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use super::Flash;
use crate::errors::AppError;

const SESSION_AUTH_USER: &str = "auth:user";

/// The logged-in user as stored in the session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// Authentication state kept in the session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn inner(&self) -> &Session {
        self.session
    }

    /// Store the user after a successful login.
    ///
    /// The session id is rotated first so a pre-login cookie can't be
    /// reused to ride the authenticated session.
    pub async fn login(&self, user: SessionUser) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    pub async fn user(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.session.get(SESSION_AUTH_USER).await?)
    }

    pub async fn is_admin(&self) -> Result<bool, AppError> {
        Ok(self.user().await?.is_some_and(|u| u.is_admin))
    }

    /// Forget the user but keep the session, so a flash pushed after
    /// logout still reaches the next page.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.remove::<SessionUser>(SESSION_AUTH_USER).await?;
        self.session.cycle_id().await?;
        Ok(())
    }
}

/// Guard for admin-only routes.
///
/// Visitors without an admin session get an error flash and a redirect to
/// the login page.
pub async fn require_admin(session: Session, request: Request, next: Next) -> Response {
    match AuthSession::new(&session).is_admin().await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            tracing::info!(path = %request.uri().path(), "Rejected unauthenticated admin request");
            if let Err(e) = Flash::new(&session).error("Please log in to continue").await {
                return e.into_response();
            }
            Redirect::to("/login").into_response()
        }
        Err(e) => e.into_response(),
    }
}
