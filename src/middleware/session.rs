//! Session layer configuration.

use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{SameSite, time::Duration},
};

use crate::auth::session::SESSION_COOKIE_NAME;

/// Wraps `store` in the cookie settings every deployment shares.
pub fn create_session_layer<S: SessionStore + Clone>(
    store: S,
    ttl_minutes: i64,
    secure: bool,
) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(ttl_minutes)))
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
