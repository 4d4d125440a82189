use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::db::DbBooking;
use crate::db::models::BookingStatus;
use crate::error::HotelError;
use crate::middleware::{AuthUser, JsonBody};
use crate::router::HotelState;
use crate::types::booking::{CancelBookingRequest, CreateBookingRequest};

/// POST /bookings
///
/// Records the requested stay as `pending`; room inventory is not checked.
pub async fn create_booking(
    State(state): State<HotelState>,
    user: AuthUser,
    JsonBody(req): JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), HotelError> {
    let new_booking = req.into_new_booking(&user.email)?;
    let booking = state
        .bookings
        .insert(new_booking, BookingStatus::Pending)
        .await?;
    info!(email = %user.email, booking_id = booking.booking_id, "booking created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Booking created", "booking": booking })),
    ))
}

/// POST /cancelbooking
///
/// Staff may cancel any booking; everyone else only their own.
pub async fn cancel_booking(
    State(state): State<HotelState>,
    user: AuthUser,
    JsonBody(req): JsonBody<CancelBookingRequest>,
) -> Result<Json<Value>, HotelError> {
    let Some(raw_id) = req.booking_id else {
        return Err(HotelError::bad_request("Booking ID is required"));
    };
    let Some(booking_id) = raw_id.parse() else {
        return Err(HotelError::bad_request("Booking ID must be a number"));
    };

    let owner = (!user.role.is_staff()).then_some(user.email.as_str());
    if state.bookings.find(booking_id, owner).await?.is_none() {
        return Err(HotelError::not_found("Booking not found"));
    }

    let Some(updated) = state
        .bookings
        .set_status(booking_id, BookingStatus::Cancelled)
        .await?
    else {
        return Err(HotelError::not_found("Booking not found"));
    };

    info!(email = %user.email, role = ?user.role, booking_id, "booking cancelled");
    Ok(Json(json!({ "message": "Booking cancelled", "booking": updated })))
}

/// GET /user/history
pub async fn user_history(
    State(state): State<HotelState>,
    user: AuthUser,
) -> Result<Json<Vec<DbBooking>>, HotelError> {
    let history = state.bookings.list_for_user(&user.email).await?;
    Ok(Json(history))
}
