use axum::{
    Form, Json, Router,
    extract::State,
    response::Redirect,
    routing::get,
};
use tower_sessions::Session;

use crate::{
    auth::session,
    dto::accounts::{
        AccountView, ChangePasswordForm, Dashboard, LoggedOut, LoginForm, PasswordChanged,
        RegistrationComplete, RegistrationForm, UpdateUserForm,
    },
    error::{AppResult, FormRejection},
    middleware::auth::LoginRequired,
    response::ApiResponse,
    services::account_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration/", get(registration_form).post(register))
        .route("/login/", get(login_form).post(login))
        .route("/logout/", get(logout))
        .route("/logged/", get(dashboard))
        .route("/updateuser/", get(account_form).post(update_account))
        .route(
            "/changepassword/",
            get(change_password_form).post(change_password),
        )
}

#[utoipa::path(
    get,
    path = "/registration/",
    responses(
        (status = 200, description = "Empty registration form", body = ApiResponse<RegistrationForm>)
    ),
    tag = "Accounts"
)]
pub async fn registration_form() -> Json<ApiResponse<RegistrationForm>> {
    Json(ApiResponse::success("OK", RegistrationForm::default()))
}

#[utoipa::path(
    post,
    path = "/registration/",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created", body = ApiResponse<RegistrationComplete>),
        (status = 422, description = "Invalid form", body = ApiResponse<FormRejection>),
    ),
    tag = "Accounts"
)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Json<ApiResponse<RegistrationComplete>>> {
    let page = account_service::register(state.store.as_ref(), form).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/login/",
    params(
        ("next" = Option<String>, Query, description = "Path that asked for a login")
    ),
    responses(
        (status = 200, description = "Empty login form", body = ApiResponse<LoginForm>)
    ),
    tag = "Accounts"
)]
pub async fn login_form() -> Json<ApiResponse<LoginForm>> {
    Json(ApiResponse::success("OK", LoginForm::default()))
}

#[utoipa::path(
    post,
    path = "/login/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to /home/"),
        (status = 422, description = "Invalid login or password", body = ApiResponse<FormRejection>),
    ),
    tag = "Accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Redirect> {
    let user = account_service::login(state.store.as_ref(), form).await?;
    session::start_session(&session, &user).await?;
    Ok(Redirect::to("/home/"))
}

#[utoipa::path(
    get,
    path = "/logout/",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<LoggedOut>)
    ),
    tag = "Accounts"
)]
pub async fn logout(session: Session) -> AppResult<Json<ApiResponse<LoggedOut>>> {
    session::end_session(&session).await?;
    Ok(Json(ApiResponse::success(
        "You have been logged out",
        LoggedOut {
            authenticated: false,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/logged/",
    responses(
        (status = 200, description = "Account dashboard", body = ApiResponse<Dashboard>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Accounts"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    let page = account_service::dashboard(state.store.as_ref(), &user).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/updateuser/",
    responses(
        (status = 200, description = "Pre-filled account form", body = ApiResponse<UpdateUserForm>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Accounts"
)]
pub async fn account_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> AppResult<Json<ApiResponse<UpdateUserForm>>> {
    let page = account_service::account_form(state.store.as_ref(), &user).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/updateuser/",
    request_body(content = UpdateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<AccountView>),
        (status = 303, description = "Not logged in"),
        (status = 422, description = "Invalid form", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Accounts"
)]
pub async fn update_account(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Form(form): Form<UpdateUserForm>,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let page = account_service::update_account(state.store.as_ref(), &user, form).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/changepassword/",
    responses(
        (status = 200, description = "Empty password form", body = ApiResponse<ChangePasswordForm>),
        (status = 303, description = "Not logged in"),
    ),
    security(("session_cookie" = [])),
    tag = "Accounts"
)]
pub async fn change_password_form(
    LoginRequired(_user): LoginRequired,
) -> Json<ApiResponse<ChangePasswordForm>> {
    Json(ApiResponse::success("OK", ChangePasswordForm::default()))
}

#[utoipa::path(
    post,
    path = "/changepassword/",
    request_body(content = ChangePasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<PasswordChanged>),
        (status = 303, description = "Not logged in"),
        (status = 422, description = "Invalid form", body = ApiResponse<FormRejection>),
    ),
    security(("session_cookie" = [])),
    tag = "Accounts"
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    LoginRequired(user): LoginRequired,
    Form(form): Form<ChangePasswordForm>,
) -> AppResult<Json<ApiResponse<PasswordChanged>>> {
    let updated = account_service::change_password(state.store.as_ref(), &user, form).await?;
    session::rehash_session(&session, &updated).await?;
    Ok(Json(ApiResponse::success(
        "Password changed",
        PasswordChanged {
            username: updated.username,
        },
    )))
}
