//! Request extractors that report failures through [`NexusError`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::NexusError;

/// JSON body extractor whose rejection is [`NexusError::InvalidRequest`].
///
/// Behaves like [`axum::Json`] but a missing content type, malformed
/// syntax or a schema mismatch produce the standard error envelope
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = NexusError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

/// Path parameter extractor whose rejection is
/// [`NexusError::InvalidRequest`], e.g. for a non-numeric id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = NexusError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> NexusError {
    tracing::debug!(status = %rejection.status(), "rejected request body");
    NexusError::InvalidRequest(rejection.body_text())
}

fn path_rejection_to_error(rejection: &PathRejection) -> NexusError {
    tracing::debug!(status = %rejection.status(), "rejected path parameters");
    NexusError::InvalidRequest(rejection.body_text())
}
