use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use axum_helpers::{AppError, AuthSession, Flash, RequestContext, SessionUser, Views};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use crate::error::UserError;
use crate::models::LoginForm;
use crate::repository::UserRepository;
use crate::service::UserService;

pub const LOGIN: &str = "login";

/// `(name, source)` for the login page template
pub fn templates() -> [(&'static str, &'static str); 1] {
    [(LOGIN, include_str!("../templates/login.hbs"))]
}

pub struct UserState<R: UserRepository> {
    pub service: UserService<R>,
    pub views: Views,
}

/// Create the login/logout router
pub fn router<R: UserRepository + 'static>(service: UserService<R>, views: Views) -> Router {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .with_state(Arc::new(UserState { service, views }))
}

async fn login_form<R: UserRepository>(
    State(state): State<Arc<UserState<R>>>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    state.views.page(LOGIN, &ctx, "Log in", ())
}

async fn login<R: UserRepository>(
    State(state): State<Arc<UserState<R>>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    match state.service.authenticate(form).await {
        Ok(user) => {
            AuthSession::new(&session)
                .login(SessionUser::from(&user))
                .await?;
            info!(username = %user.username, "User logged in");
            Flash::new(&session)
                .success(format!("Welcome back, {}", user.username))
                .await?;
            Ok(Redirect::to("/admin"))
        }
        Err(UserError::InvalidCredentials | UserError::Validation(_)) => {
            Flash::new(&session)
                .error("Incorrect username or password")
                .await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

async fn logout(session: Session) -> Result<Redirect, AppError> {
    let auth = AuthSession::new(&session);
    if let Some(user) = auth.user().await? {
        info!(username = %user.username, "User logged out");
    }
    auth.logout().await?;
    Flash::new(&session).info("You are now logged out").await?;
    Ok(Redirect::to("/"))
}
