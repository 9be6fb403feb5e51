use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Record ids taken from the URL. A segment that does not parse as an id
/// cannot name a record, so it is a 404 like any other missing record.
pub struct RecordPath<T>(pub T);

impl<S, T> FromRequestParts<S> for RecordPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "unparseable record id");
                AppError::NotFound
            })?;
        Ok(Self(value))
    }
}
