use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::error::HotelError;
use crate::middleware::{AuthUser, JsonBody};
use crate::router::HotelState;
use crate::types::payment::PaymentRequest;

/// POST /payments
///
/// Stores a booking together with its payment record. Nothing is charged here.
pub async fn record_payment(
    State(state): State<HotelState>,
    user: AuthUser,
    JsonBody(req): JsonBody<PaymentRequest>,
) -> Result<(StatusCode, Json<Value>), HotelError> {
    let checkout = req.into_checkout(&user.email)?;
    let (booking, payment) = state
        .payments
        .record(checkout.booking, checkout.booking_status, checkout.payment)
        .await?;

    info!(
        email = %user.email,
        booking_id = booking.booking_id,
        payment_id = payment.payment_id,
        method = %payment.payment_method,
        "payment recorded"
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Payment processed successfully",
            "booking": booking,
            "payment": payment,
        })),
    ))
}
