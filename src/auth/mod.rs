//! Credential checks and the session-bound identity.
//!
//! Handlers receive an [`Identity`] (or a [`UserIdentity`] once the login
//! gate has passed) and never look at passwords or the session themselves.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::{error::AppResult, store::Store};

pub mod password;
pub mod session;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserIdentity {
    pub user_id: i32,
    pub username: String,
    /// Absent only for accounts created outside registration.
    pub profile_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(UserIdentity),
}

impl Identity {
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Identity::User(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}

/// Resolves a username/password pair to an identity. Unknown users and
/// wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> AppResult<Option<UserIdentity>> {
    let Some(user) = store.find_user_by_username(username).await? else {
        debug!(username, "login for unknown user");
        return Ok(None);
    };

    let matches = match password::verify_password(password, &user.password_hash) {
        Ok(matches) => matches,
        Err(err) => {
            warn!(user_id = user.id, error = %err, "stored credential is unreadable");
            false
        }
    };
    if !matches {
        return Ok(None);
    }

    let profile_id = store.find_profile(user.id).await?.map(|profile| profile.id);
    Ok(Some(UserIdentity {
        user_id: user.id,
        username: user.username,
        profile_id,
    }))
}
