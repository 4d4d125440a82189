use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::auth::otp::generate_otp;
use crate::auth::password::{hash_password, verify_password};
use crate::error::HotelError;
use crate::middleware::JsonBody;
use crate::router::HotelState;
use crate::types::account::{SendOtpRequest, VerifyOtpRequest};
use crate::types::{non_blank, normalize_email};

/// POST /send-otp
pub async fn send_otp(
    State(state): State<HotelState>,
    JsonBody(req): JsonBody<SendOtpRequest>,
) -> Result<Json<Value>, HotelError> {
    let Some(email) = normalize_email(req.email) else {
        return Err(HotelError::bad_request("Email is required"));
    };

    if !state.otp_limiter.try_acquire(&email) {
        warn!(email = %email, "OTP request rate limited");
        return Err(HotelError::TooManyRequests);
    }

    let otp = generate_otp();
    let otp_hash = hash_password(otp.clone(), state.cfg.bcrypt_cost).await?;
    let ttl = state.cfg.otp_ttl_minutes;
    let expires_at = Utc::now() + Duration::minutes(ttl);
    state.otps.replace(&email, &otp_hash, expires_at).await?;

    state
        .mailer
        .send_otp(&email, &otp, ttl)
        .await
        .map_err(|e| match e {
            HotelError::MailAddress(_) => HotelError::bad_request("Invalid email address"),
            e => e,
        })?;

    info!(email = %email, "OTP issued");
    Ok(Json(json!({ "message": "OTP sent to email" })))
}

/// POST /verify-otp
pub async fn verify_otp(
    State(state): State<HotelState>,
    JsonBody(req): JsonBody<VerifyOtpRequest>,
) -> Result<Json<Value>, HotelError> {
    let (Some(email), Some(otp)) = (normalize_email(req.email), non_blank(req.otp)) else {
        return Err(HotelError::bad_request("Email and OTP are required"));
    };

    let Some(record) = state.otps.latest(&email).await? else {
        return Err(HotelError::bad_request("OTP NOT FOUND"));
    };

    if record.used {
        return Err(HotelError::bad_request("OTP has already been used"));
    }

    if record.is_expired_at(Utc::now()) {
        state.otps.mark_used(record.id).await?;
        return Err(HotelError::bad_request("OTP has expired"));
    }

    if !verify_password(otp, record.otp_hash.clone()).await? {
        warn!(email = %email, "wrong OTP submitted");
        return Err(HotelError::bad_request("Invalid OTP"));
    }

    state.otps.consume(record.id, &email).await?;
    info!(email = %email, "email verified");
    Ok(Json(json!({
        "message": "OTP verified successfully",
        "account_verified": true,
    })))
}
