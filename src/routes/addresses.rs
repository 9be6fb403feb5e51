use axum::{
    Form, Json, Router,
    extract::State,
    response::Redirect,
    routing::get,
};

use crate::{
    dto::addresses::{AddressEditPage, AddressForm},
    error::{AppResult, FormRejection},
    middleware::auth::LoginRequired,
    models::Address,
    response::ApiResponse,
    routes::params::RecordPath,
    services::address_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/address/{address_id}/", get(get_address).post(delete_address))
        .route("/addaddress/", get(new_address_form).post(add_address))
        .route(
            "/changeaddress/{address_id}/",
            get(address_form).post(update_address),
        )
}

#[utoipa::path(
    get,
    path = "/address/{address_id}/",
    params(
        ("address_id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "One of the caller's addresses", body = ApiResponse<Address>),
        (status = 303, description = "Not logged in"),
        (status = 404, description = "No such address for the caller"),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn get_address(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(address_id): RecordPath<i32>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let page = address_service::get_address(state.store.as_ref(), &user, address_id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/address/{address_id}/",
    params(
        ("address_id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to /logged/"),
        (status = 404, description = "No such address for the caller"),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(address_id): RecordPath<i32>,
) -> AppResult<Redirect> {
    address_service::delete_address(state.store.as_ref(), &user, address_id).await?;
    Ok(Redirect::to("/logged/"))
}

#[utoipa::path(
    get,
    path = "/addaddress/",
    responses(
        (status = 200, description = "Empty address form", body = ApiResponse<AddressForm>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn new_address_form(
    LoginRequired(_user): LoginRequired,
) -> Json<ApiResponse<AddressForm>> {
    Json(ApiResponse::success("OK", AddressForm::default()))
}

#[utoipa::path(
    post,
    path = "/addaddress/",
    request_body(content = AddressForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Address added", body = ApiResponse<Address>),
        (status = 303, description = "Not logged in"),
        (status = 422, description = "Invalid form", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn add_address(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Form(form): Form<AddressForm>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let page = address_service::add_address(state.store.as_ref(), &user, form).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/changeaddress/{address_id}/",
    params(
        ("address_id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Pre-filled address form", body = ApiResponse<AddressEditPage>),
        (status = 303, description = "Not logged in"),
        (status = 404, description = "No such address for the caller"),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn address_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(address_id): RecordPath<i32>,
) -> AppResult<Json<ApiResponse<AddressEditPage>>> {
    let page = address_service::address_form(state.store.as_ref(), &user, address_id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/changeaddress/{address_id}/",
    params(
        ("address_id" = i32, Path, description = "Address ID")
    ),
    request_body(content = AddressForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Address changed", body = ApiResponse<AddressEditPage>),
        (status = 303, description = "Not logged in"),
        (status = 404, description = "No such address for the caller"),
        (status = 422, description = "Invalid form", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    RecordPath(address_id): RecordPath<i32>,
    Form(form): Form<AddressForm>,
) -> AppResult<Json<ApiResponse<AddressEditPage>>> {
    let page =
        address_service::update_address(state.store.as_ref(), &user, address_id, form).await?;
    Ok(Json(page))
}
