use axum::{
    Json, Router,
    extract::{Path, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::cart::{CartPage, OrdersPage},
    error::{AppResult, FormRejection},
    middleware::auth::LoginRequired,
    models::OrderDetails,
    response::ApiResponse,
    routes::{catalog::product_path, params::RecordPath},
    services::{cart_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart/", get(view_cart).post(place_order))
        .route("/add-to-cart/{product_id}/", get(add_to_cart))
        .route("/remove-from-cart/{cart_id}/", get(remove_from_cart))
        .route("/order/{order_id}/", get(view_orders))
}

#[utoipa::path(
    get,
    path = "/cart/",
    responses(
        (status = 200, description = "Open cart of the caller", body = ApiResponse<CartPage>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> AppResult<Json<ApiResponse<CartPage>>> {
    let page = cart_service::view_cart(state.store.as_ref(), &user).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/cart/",
    responses(
        (status = 200, description = "Order placed from the open cart", body = ApiResponse<OrderDetails>),
        (status = 303, description = "Not logged in"),
        (status = 422, description = "Cart is empty", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> AppResult<Json<ApiResponse<OrderDetails>>> {
    let page = order_service::place_order(state.store.as_ref(), &user).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/add-to-cart/{product_id}/",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 303, description = "Line added, redirect to the product"),
        (status = 404, description = "Product not found"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(product_id): RecordPath<i32>,
) -> AppResult<Redirect> {
    cart_service::add_to_cart(state.store.as_ref(), &user, product_id).await?;
    Ok(Redirect::to(&product_path(product_id)))
}

#[utoipa::path(
    get,
    path = "/remove-from-cart/{cart_id}/",
    params(
        ("cart_id" = i32, Path, description = "Cart line ID")
    ),
    responses(
        (status = 303, description = "Line removed, redirect to /cart/"),
        (status = 404, description = "No such open line for the caller"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(cart_id): RecordPath<i32>,
) -> AppResult<Redirect> {
    cart_service::remove_from_cart(state.store.as_ref(), &user, cart_id).await?;
    Ok(Redirect::to("/cart/"))
}

// The path segment is not a filter; every order of the caller is listed.
#[utoipa::path(
    get,
    path = "/order/{order_id}/",
    params(
        ("order_id" = String, Path, description = "Order reference, informational only")
    ),
    responses(
        (status = 200, description = "Orders of the caller and the open cart", body = ApiResponse<OrdersPage>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Orders"
)]
pub async fn view_orders(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(_order_id): Path<String>,
) -> AppResult<Json<ApiResponse<OrdersPage>>> {
    let page = order_service::view_orders(state.store.as_ref(), &user).await?;
    Ok(Json(page))
}
