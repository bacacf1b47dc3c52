//! Cookie sessions, flash messages and the admin guard.
//!
//! Session data lives in a tower-sessions [`MemoryStore`]; typed wrappers
//! keep key names and value types in one place.

mod auth;
mod flash;

pub use auth::{AuthSession, SessionUser, require_admin};
pub use flash::{Flash, FlashKind, FlashMessage};

use core_config::session::SessionConfig;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Build the session layer from config.
///
/// Sessions expire after `ttl_days` without a request; the cookie is
/// HTTP-only and `SameSite=Lax` so form posts from our own pages carry it.
pub fn create_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_http_only(true)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(config.ttl_days)))
}
