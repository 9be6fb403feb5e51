use axum::Router;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;

pub mod accounts;
pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod home;
pub mod params;

// Page routes without state; it is provided by `create_app`.
pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(accounts::router())
        .merge(addresses::router())
        .merge(catalog::router())
        .merge(cart::router())
}

/// Every route of the application behind the given session layer.
pub fn create_app<S>(state: AppState, sessions: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", axum::routing::get(health::health_check))
        .merge(create_page_router())
        .layer(sessions)
        .merge(doc::scalar_docs())
        .with_state(state)
}
