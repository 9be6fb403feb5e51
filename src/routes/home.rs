use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::catalog::HomePage,
    error::AppResult,
    middleware::auth::CurrentIdentity,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home/", get(home))
}

#[utoipa::path(
    get,
    path = "/home/",
    responses(
        (status = 200, description = "Home page", body = ApiResponse<HomePage>)
    ),
    tag = "Catalog"
)]
pub async fn home(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AppResult<Json<ApiResponse<HomePage>>> {
    let page = catalog_service::home(state.store.as_ref(), &identity).await?;
    Ok(Json(page))
}
