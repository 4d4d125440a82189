use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::HotelError;

/// `Json<T>` whose rejections render as the API's error body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HotelError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_rejection(rejection)),
        }
    }
}

fn map_rejection(rejection: JsonRejection) -> HotelError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            HotelError::bad_request("Request must be JSON")
        }
        r if r.status() == StatusCode::PAYLOAD_TOO_LARGE => HotelError::PayloadTooLarge,
        r => HotelError::bad_request(r.body_text()),
    }
}
