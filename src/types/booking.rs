use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use super::{IntInput, int_field, missing_fields_message, non_blank, normalize_email};
use crate::db::models::NewBooking;
use crate::error::HotelError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookingRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub in_date: Option<String>,
    pub out_date: Option<String>,
    #[serde(alias = "adult")]
    pub adults: Option<IntInput>,
    pub children: Option<IntInput>,
    pub rooms: Option<IntInput>,
    pub room_type: Option<String>,
    pub special_request: Option<String>,
}

impl CreateBookingRequest {
    /// Validate the request and turn it into a row owned by `owner_email`.
    pub fn into_new_booking(self, owner_email: &str) -> Result<NewBooking, HotelError> {
        let first_name = non_blank(self.first_name);
        let last_name = non_blank(self.last_name);
        let email = normalize_email(self.email);
        let phone = non_blank(self.phone);
        let room_type = non_blank(self.room_type);
        let in_date = non_blank(self.in_date);
        let out_date = non_blank(self.out_date);
        let adults = int_field("adults", self.adults)?;
        let children = int_field("children", self.children)?;
        let rooms = int_field("rooms", self.rooms)?;

        if let Some(msg) = missing_fields_message(&[
            ("first_name", first_name.is_some()),
            ("last_name", last_name.is_some()),
            ("email", email.is_some()),
            ("phone", phone.is_some()),
            ("adults", adults.is_some()),
            ("children", children.is_some()),
            ("rooms", rooms.is_some()),
            ("room_type", room_type.is_some()),
            ("in_date", in_date.is_some()),
            ("out_date", out_date.is_some()),
        ]) {
            return Err(HotelError::BadRequest(msg));
        }

        let in_date = parse_date("in_date", in_date.as_deref())?;
        let out_date = parse_date("out_date", out_date.as_deref())?;
        check_stay(in_date, out_date)?;

        let adults = adults.unwrap_or_default();
        let children = children.unwrap_or_default();
        let rooms = rooms.unwrap_or_default();
        if adults < 1 {
            return Err(HotelError::bad_request("adults must be at least 1"));
        }
        if rooms < 1 {
            return Err(HotelError::bad_request("rooms must be at least 1"));
        }
        if children < 0 {
            return Err(HotelError::bad_request("children cannot be negative"));
        }

        Ok(NewBooking {
            user_email: owner_email.to_string(),
            guest_first_name: first_name,
            guest_last_name: last_name,
            guest_email: email,
            phone,
            street: non_blank(self.street),
            city: non_blank(self.city),
            country: non_blank(self.country),
            adults: Some(adults),
            children: Some(children),
            rooms: Some(rooms),
            room_type,
            in_date,
            out_date,
            special_request: non_blank(self.special_request),
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC3339 timestamp (its date part is kept).
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, HotelError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| HotelError::BadRequest(format!("{field} must be a date (YYYY-MM-DD)")))
}

/// Check-out must fall after check-in when both are known.
pub fn check_stay(
    in_date: Option<NaiveDate>,
    out_date: Option<NaiveDate>,
) -> Result<(), HotelError> {
    match (in_date, out_date) {
        (Some(i), Some(o)) if o <= i => {
            Err(HotelError::bad_request("out_date must be after in_date"))
        }
        _ => Ok(()),
    }
}

/// Booking ids arrive as numbers or as numeric strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CancelBookingRequest {
    pub booking_id: Option<IntInput>,
}
