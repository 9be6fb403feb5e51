use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Address, OrderDetails, Profile, User};

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
}

impl UpdateUserForm {
    pub fn prefilled(user: &User, profile: Option<&Profile>) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            birth_date: profile
                .map(|p| p.birth_date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ChangePasswordForm {
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationComplete {
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoggedOut {
    pub authenticated: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
}

impl AccountView {
    pub fn new(user: User, profile: Option<&Profile>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: profile.map(|p| p.birth_date),
        }
    }
}

/// The logged-in landing page.
#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub account: AccountView,
    pub addresses: Vec<Address>,
    pub orders: Vec<OrderDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordChanged {
    pub username: String,
}
