use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    auth::{Identity, UserIdentity, session},
    error::AppError,
    state::AppState,
};

pub const LOGIN_PATH: &str = "/login/";

/// Whoever is calling, logged in or not.
pub struct CurrentIdentity(pub Identity);

/// A caller that has passed the login gate.
pub struct LoginRequired(pub UserIdentity);

pub enum LoginRejection {
    /// Send the browser to the login form, remembering where it was going.
    RedirectToLogin { next: String },
    Failed(AppError),
}

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { next } => Redirect::to(&login_url(&next)).into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

pub fn login_url(next: &str) -> String {
    format!("{LOGIN_PATH}?next={next}")
}

fn session_of(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session layer is not installed")))
}

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_of(parts)?;
        let identity = session::current_identity(&session, state.store.as_ref()).await?;
        Ok(Self(identity))
    }
}

impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = LoginRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state)
            .await
            .map_err(LoginRejection::Failed)?;

        match identity {
            Identity::User(user) => Ok(Self(user)),
            Identity::Anonymous => Err(LoginRejection::RedirectToLogin {
                next: parts.uri.path().to_string(),
            }),
        }
    }
}
