use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    #[serde(alias = "super_admin")]
    SuperAdmin,
}

impl Role {
    /// Admins and superadmins act on any booking and have `last_login` tracked.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub verified: bool,
    pub status: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a new account; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub verified: bool,
}

/// Partial profile update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DbBooking {
    pub booking_id: i64,
    pub user_email: String,
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub guest_email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub adults: Option<i64>,
    pub children: Option<i64>,
    pub rooms: Option<i64>,
    pub room_type: Option<String>,
    pub in_date: Option<NaiveDate>,
    pub out_date: Option<NaiveDate>,
    pub special_request: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Booking as inserted; `None` columns are stored as NULL.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_email: String,
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub guest_email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub adults: Option<i64>,
    pub children: Option<i64>,
    pub rooms: Option<i64>,
    pub room_type: Option<String>,
    pub in_date: Option<NaiveDate>,
    pub out_date: Option<NaiveDate>,
    pub special_request: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DbPayment {
    pub payment_id: i64,
    pub booking_id: i64,
    pub user_email: String,
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbEmailOtp {
    pub id: i64,
    pub email: String,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl DbEmailOtp {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
