//! Centralized error page.
//!
//! Handlers return [`AppError`](super::AppError); its response carries an
//! [`ErrorReport`] which this stage turns into the shared `error` template.
//! Plain-text error responses produced by the router itself (method not
//! allowed, extractor rejections) are rendered the same way.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use core_config::Environment;
use serde::Serialize;

use super::ErrorReport;
use crate::context::RequestContext;
use crate::views::{ERROR_VIEW, Views};

#[derive(Serialize)]
struct ErrorView<'a> {
    status: u16,
    code: &'static str,
    message: &'a str,
    detail: Option<&'a str>,
}

/// Error page renderer shared as middleware state
#[derive(Clone)]
pub struct ErrorPages {
    views: Views,
    /// Include the underlying cause on the page
    show_details: bool,
}

impl ErrorPages {
    /// Details are shown everywhere except production.
    pub fn new(views: Views, environment: &Environment) -> Self {
        Self {
            views,
            show_details: !environment.is_production(),
        }
    }

    pub fn render(&self, report: &ErrorReport, ctx: &RequestContext) -> Response {
        let view = ErrorView {
            status: report.status.as_u16(),
            code: report.code.as_str(),
            message: &report.message,
            detail: if self.show_details {
                report.detail.as_deref()
            } else {
                None
            },
        };
        let title = report.status.canonical_reason().unwrap_or("Error");

        match self.views.page(ERROR_VIEW, ctx, title, view) {
            Ok(Html(body)) => (report.status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (report.status, report.message.clone()).into_response()
            }
        }
    }
}

/// Middleware rendering error responses as HTML pages.
pub async fn render_error_pages(
    State(pages): State<ErrorPages>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let report = match response.extensions().get::<ErrorReport>() {
        Some(report) => report.clone(),
        None if is_bare_error(&response) => ErrorReport::from_status(response.status()),
        None => return response,
    };

    let ctx = response
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::anonymous(path));

    pages.render(&report, &ctx)
}

// 4xx/5xx without a body type, or with a plain-text one
fn is_bare_error(response: &Response) -> bool {
    let status: StatusCode = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return false;
    }

    match response.headers().get(header::CONTENT_TYPE) {
        None => true,
        Some(value) => value
            .to_str()
            .map(|v| v.starts_with("text/plain"))
            .unwrap_or(false),
    }
}
