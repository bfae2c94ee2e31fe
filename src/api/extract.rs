//! JSON extraction with the API's error shape
//!
//! axum's bare `Json` extractor rejects malformed or incomplete bodies
//! with 422 and a plain-text message. The mobile app contract is 400
//! with an `{"error": true, "message": ...}` body, so every body-taking
//! handler goes through this wrapper instead.

use super::models::ApiError;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiError>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(ApiError::new(rejection.body_text())),
            )),
        }
    }
}
