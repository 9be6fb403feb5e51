use axum::{
    Form, Json, Router,
    extract::State,
    response::Redirect,
    routing::get,
};

use crate::{
    dto::catalog::{CategoryPage, CommentForm, ProductPage},
    error::{AppResult, FormRejection},
    middleware::auth::LoginRequired,
    models::CategorySection,
    response::ApiResponse,
    routes::params::RecordPath,
    services::{catalog_service, comment_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/category/cpu/", get(cpu_category))
        .route("/category/gpu/", get(gpu_category))
        .route("/category/motherboards/", get(motherboard_category))
        .route("/product/{product_id}/", get(product).post(add_comment))
        .route(
            "/remove-comment/{comment_id}/{product_id}/",
            get(remove_comment),
        )
}

pub fn product_path(product_id: i32) -> String {
    format!("/product/{product_id}/")
}

async fn category_page(
    state: &AppState,
    section: CategorySection,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    let page = catalog_service::category(state.store.as_ref(), section).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/category/cpu/",
    responses(
        (status = 200, description = "Every CPU", body = ApiResponse<CategoryPage>)
    ),
    tag = "Catalog"
)]
pub async fn cpu_category(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    category_page(&state, CategorySection::Cpu).await
}

#[utoipa::path(
    get,
    path = "/category/gpu/",
    responses(
        (status = 200, description = "Every GPU", body = ApiResponse<CategoryPage>)
    ),
    tag = "Catalog"
)]
pub async fn gpu_category(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    category_page(&state, CategorySection::Gpu).await
}

#[utoipa::path(
    get,
    path = "/category/motherboards/",
    responses(
        (status = 200, description = "Every motherboard", body = ApiResponse<CategoryPage>)
    ),
    tag = "Catalog"
)]
pub async fn motherboard_category(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    category_page(&state, CategorySection::Motherboards).await
}

#[utoipa::path(
    get,
    path = "/product/{product_id}/",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with its comments", body = ApiResponse<ProductPage>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn product(
    State(state): State<AppState>,
    RecordPath(product_id): RecordPath<i32>,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let page = catalog_service::product(state.store.as_ref(), product_id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/product/{product_id}/",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Comment added, redirect to the product"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Empty comment", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Comments"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(product_id): RecordPath<i32>,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    comment_service::add_comment(state.store.as_ref(), &user, product_id, form).await?;
    Ok(Redirect::to(&product_path(product_id)))
}

#[utoipa::path(
    get,
    path = "/remove-comment/{comment_id}/{product_id}/",
    params(
        ("comment_id" = i32, Path, description = "Comment ID"),
        ("product_id" = i32, Path, description = "Product to return to")
    ),
    responses(
        (status = 303, description = "Comment removed, redirect to the product"),
        (status = 404, description = "No such comment by the caller"),
    ),
    security(("session_cookie" = [])),
    tag = "Comments"
)]
pub async fn remove_comment(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath((comment_id, product_id)): RecordPath<(i32, i32)>,
) -> AppResult<Redirect> {
    comment_service::remove_comment(state.store.as_ref(), &user, comment_id).await?;
    Ok(Redirect::to(&product_path(product_id)))
}
