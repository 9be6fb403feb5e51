pub mod account_service;
pub mod address_service;
pub mod cart_service;
pub mod catalog_service;
pub mod comment_service;
pub mod order_service;

use chrono::{NaiveDate, Utc};

use crate::{auth::UserIdentity, error::AppError};

/// The date age checks are measured against.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Profile of the caller; accounts without one own no addresses.
pub(crate) fn profile_id(user: &UserIdentity) -> Result<i32, AppError> {
    user.profile_id.ok_or(AppError::NotFound)
}
