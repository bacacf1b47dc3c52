//! Handlebars page rendering.
//!
//! Every page template wraps its body in the shared layout partial:
//!
//! ```handlebars
//! {{#> layout}}
//!   <h1>{{title}}</h1>
//! {{/layout}}
//! ```
//!
//! Domain crates register their templates on a [`ViewsBuilder`]; the built
//! [`Views`] is cheap to clone and shared through router state.

use axum::response::Html;
use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::context::RequestContext;
use crate::errors::AppError;

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.hbs");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.hbs");

/// Name of the built-in error page template
pub const ERROR_VIEW: &str = "error";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template registration error: {0}")]
    Registration(String),

    #[error("Template rendering error: {0}")]
    Render(String),
}

impl From<handlebars::RenderError> for ViewError {
    fn from(err: handlebars::RenderError) -> Self {
        ViewError::Render(err.to_string())
    }
}

handlebars_helper!(money: |value: f64| format!("{:.2}", value));

// Percent-encode one path segment: `href="/countries/{{url_segment country}}"`
handlebars_helper!(url_segment: |value: str| urlencoding::encode(value).into_owned());

/// Page data handed to a template: the request context, a title and the
/// page's own fields, all at the top level.
#[derive(Serialize)]
pub struct Page<'a, T: Serialize> {
    #[serde(flatten)]
    pub ctx: &'a RequestContext,
    pub is_admin: bool,
    pub title: &'a str,
    #[serde(flatten)]
    pub data: T,
}

pub struct ViewsBuilder {
    registry: Handlebars<'static>,
}

impl ViewsBuilder {
    /// Registry with the layout partial, the error page and the `money` and
    /// `url_segment` helpers.
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.register_helper("money", Box::new(money));
        registry.register_helper("url_segment", Box::new(url_segment));

        registry
            .register_partial("layout", LAYOUT_TEMPLATE)
            .map_err(|e| ViewError::Registration(format!("Failed to register layout: {}", e)))?;

        let builder = Self { registry };
        builder.template(ERROR_VIEW, ERROR_TEMPLATE)
    }

    pub fn template(mut self, name: &str, source: &str) -> Result<Self, ViewError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| ViewError::Registration(format!("Failed to register {}: {}", name, e)))?;
        Ok(self)
    }

    /// Register several `(name, source)` templates at once.
    pub fn templates<'s>(
        self,
        templates: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Result<Self, ViewError> {
        templates
            .into_iter()
            .try_fold(self, |builder, (name, source)| builder.template(name, source))
    }

    pub fn build(self) -> Views {
        Views {
            registry: Arc::new(self.registry),
        }
    }
}

#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn builder() -> Result<ViewsBuilder, ViewError> {
        ViewsBuilder::new()
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, ViewError> {
        debug!(template = name, "Rendering template");
        Ok(self.registry.render(name, data)?)
    }

    /// Render a full page inside the layout.
    pub fn page<T: Serialize>(
        &self,
        name: &str,
        ctx: &RequestContext,
        title: &str,
        data: T,
    ) -> Result<Html<String>, AppError> {
        let page = Page {
            ctx,
            is_admin: ctx.is_admin(),
            title,
            data,
        };
        Ok(Html(self.render(name, &page)?))
    }
}
