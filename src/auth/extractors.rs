use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;

/// JSON body extractor that ignores `Content-Type` and reports every
/// read or parse failure as 400 `Invalid request body`, unlike
/// `axum::Json` which answers 415/422 for some of those cases.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            AppError::InvalidBody
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "malformed json body");
            AppError::InvalidBody
        })?;
        Ok(JsonBody(value))
    }
}
