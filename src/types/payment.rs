use serde::Deserialize;

use super::booking::{check_stay, parse_date};
use super::{IntInput, int_field, missing_fields_message, non_blank, normalize_email};
use crate::db::models::{BookingStatus, NewBooking, NewPayment, PaymentStatus};
use crate::error::HotelError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    pub booking_data: Option<PaymentBookingData>,
    pub payment_data: Option<PaymentDetails>,
    pub payment_method: Option<String>,
    pub total_amount: Option<f64>,
}

/// Stay details sent along with a checkout. The booking form sends counts
/// as strings and names a few fields differently (`roomQuantity`,
/// `specialRequests`, `address`); both spellings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentBookingData {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub room_type: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "address")]
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub adults: Option<IntInput>,
    pub children: Option<IntInput>,
    #[serde(alias = "roomQuantity")]
    pub rooms: Option<IntInput>,
    #[serde(alias = "specialRequests")]
    pub special_request: Option<String>,
}

impl PaymentBookingData {
    fn is_empty(&self) -> bool {
        self.check_in.is_none()
            && self.check_out.is_none()
            && self.room_type.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.street.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.adults.is_none()
            && self.children.is_none()
            && self.rooms.is_none()
            && self.special_request.is_none()
    }
}

/// Method-specific fields; only the ones matching the method are read.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: Option<String>,
    pub paypal_email: Option<String>,
    pub mobile_carrier: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    MobileMoney,
    CashFrontDesk,
    Other(String),
}

impl PaymentMethod {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "credit-card" => Self::CreditCard,
            "paypal" => Self::Paypal,
            "mobile-money" => Self::MobileMoney,
            "cash-front-desk" => Self::CashFrontDesk,
            other => Self::Other(other.to_string()),
        }
    }

    /// Cash is settled on arrival, so both booking and payment stay pending.
    pub fn settles_later(&self) -> bool {
        matches!(self, Self::CashFrontDesk)
    }

    pub fn booking_status(&self) -> BookingStatus {
        if self.settles_later() {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        }
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.settles_later() {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Completed
        }
    }

    /// Human readable description stored with the payment.
    /// Never contains a full card number.
    pub fn describe(&self, details: &PaymentDetails) -> String {
        match self {
            Self::CreditCard => {
                let digits: String = details
                    .card_number
                    .as_deref()
                    .unwrap_or_default()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                if digits.chars().count() >= 4 {
                    let last4: String = digits.chars().skip(digits.chars().count() - 4).collect();
                    format!("Card **** {last4}")
                } else {
                    "Card".to_string()
                }
            }
            Self::Paypal => match non_blank(details.paypal_email.clone()) {
                Some(email) => format!("PayPal ({email})"),
                None => "PayPal".to_string(),
            },
            Self::MobileMoney => {
                let carrier = non_blank(details.mobile_carrier.clone())
                    .unwrap_or_else(|| "Mobile Money".to_string());
                let phone = details.phone_number.as_deref().unwrap_or_default();
                format!("{carrier} {phone}").trim().to_string()
            }
            Self::CashFrontDesk => "Cash at front desk".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

/// A validated checkout ready to be stored.
#[derive(Debug)]
pub struct Checkout {
    pub booking: NewBooking,
    pub booking_status: BookingStatus,
    pub payment: NewPayment,
}

impl PaymentRequest {
    /// Validate and split into booking + payment rows owned by `payer_email`.
    pub fn into_checkout(self, payer_email: &str) -> Result<Checkout, HotelError> {
        let booking_data = self.booking_data.filter(|b| !b.is_empty());
        let method = non_blank(self.payment_method);

        if let Some(msg) = missing_fields_message(&[
            ("bookingData", booking_data.is_some()),
            ("paymentMethod", method.is_some()),
            ("totalAmount", self.total_amount.is_some()),
        ]) {
            return Err(HotelError::BadRequest(msg));
        }
        let (Some(data), Some(method), Some(amount)) = (booking_data, method, self.total_amount)
        else {
            return Err(HotelError::bad_request("Required fields missing"));
        };
        if !amount.is_finite() || amount < 0.0 {
            return Err(HotelError::bad_request(
                "totalAmount must be a non-negative number",
            ));
        }

        let adults = int_field("adults", data.adults)?;
        let children = int_field("children", data.children)?;
        let rooms = int_field("rooms", data.rooms)?;
        if [adults, children, rooms].iter().flatten().any(|n| *n < 0) {
            return Err(HotelError::bad_request(
                "Guest and room counts cannot be negative",
            ));
        }

        let in_date = parse_date("checkIn", data.check_in.as_deref())?;
        let out_date = parse_date("checkOut", data.check_out.as_deref())?;
        check_stay(in_date, out_date)?;

        let method = PaymentMethod::parse(&method);
        let details = self.payment_data.unwrap_or_default();

        Ok(Checkout {
            booking: NewBooking {
                user_email: payer_email.to_string(),
                guest_first_name: non_blank(data.first_name),
                guest_last_name: non_blank(data.last_name),
                guest_email: normalize_email(data.email),
                phone: non_blank(data.phone),
                street: non_blank(data.street),
                city: non_blank(data.city),
                country: non_blank(data.country),
                adults,
                children,
                rooms,
                room_type: non_blank(data.room_type),
                in_date,
                out_date,
                special_request: non_blank(data.special_request),
            },
            booking_status: method.booking_status(),
            payment: NewPayment {
                amount,
                payment_method: method.describe(&details),
                status: method.payment_status(),
            },
        })
    }
}
