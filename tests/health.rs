use axum::{extract::State, http::StatusCode};
use webshop::{routes::health::health_check, state::AppState};

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, response) = health_check(State(AppState::in_memory())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}
