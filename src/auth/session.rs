//! Session state for logged-in users.
//!
//! The session holds the user id and a fingerprint of the password hash that
//! was current at login. A password change alters the fingerprint, so every
//! session that was not rehashed afterwards resolves to anonymous.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    auth::{Identity, UserIdentity},
    error::AppResult,
    models::User,
    store::Store,
};

pub const SESSION_COOKIE_NAME: &str = "webshop_session";

const SESSION_USER_KEY: &str = "auth.user";

const FINGERPRINT_NAMESPACE: Uuid = Uuid::NAMESPACE_OID;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionUser {
    user_id: i32,
    auth_hash: String,
}

pub fn session_auth_hash(password_hash: &str) -> String {
    Uuid::new_v5(&FINGERPRINT_NAMESPACE, password_hash.as_bytes()).to_string()
}

/// Logs `user` in on this session under a fresh session id.
pub async fn start_session(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                user_id: user.id,
                auth_hash: session_auth_hash(&user.password_hash),
            },
        )
        .await?;
    Ok(())
}

/// Drops every value in the session and deletes it from the store. Safe to
/// call on a session that was never started.
pub async fn end_session(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

pub async fn current_identity(session: &Session, store: &dyn Store) -> AppResult<Identity> {
    let Some(stored) = session.get::<SessionUser>(SESSION_USER_KEY).await? else {
        return Ok(Identity::Anonymous);
    };

    let user = match store.get_user(stored.user_id).await? {
        Some(user) if session_auth_hash(&user.password_hash) == stored.auth_hash => user,
        _ => {
            tracing::info!(user_id = stored.user_id, "discarding stale session");
            session.flush().await?;
            return Ok(Identity::Anonymous);
        }
    };

    let profile_id = store.find_profile(user.id).await?.map(|profile| profile.id);
    Ok(Identity::User(UserIdentity {
        user_id: user.id,
        username: user.username,
        profile_id,
    }))
}

/// Re-binds the current session to `user`'s new credential so the caller
/// stays logged in after a password change.
pub async fn rehash_session(session: &Session, user: &User) -> AppResult<()> {
    start_session(session, user).await
}
