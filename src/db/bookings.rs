use crate::db::models::{BookingStatus, DbBooking, NewBooking};
use crate::db::sqlite::SqlitePool;
use crate::error::HotelError;
use chrono::Utc;
use sqlx::{Executor, Sqlite};

pub(crate) const BOOKING_COLUMNS: &str = "booking_id, user_email, guest_first_name, \
    guest_last_name, guest_email, phone, street, city, country, adults, children, rooms, \
    room_type, in_date, out_date, special_request, status, created_at";

#[derive(Clone)]
pub struct BookingsStorage {
    pool: SqlitePool,
}

impl BookingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        booking: NewBooking,
        status: BookingStatus,
    ) -> Result<DbBooking, HotelError> {
        insert_booking(&self.pool, booking, status).await
    }

    /// Look up a booking; with `owner` set, only a booking of that user matches.
    pub async fn find(
        &self,
        booking_id: i64,
        owner: Option<&str>,
    ) -> Result<Option<DbBooking>, HotelError> {
        let booking = match owner {
            Some(email) => {
                sqlx::query_as::<_, DbBooking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = ? AND user_email = ?"
                ))
                .bind(booking_id)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbBooking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = ?"
                ))
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(booking)
    }

    pub async fn set_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<Option<DbBooking>, HotelError> {
        let updated = sqlx::query_as::<_, DbBooking>(&format!(
            "UPDATE bookings SET status = ? WHERE booking_id = ? RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(status)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Bookings of a user, newest first.
    pub async fn list_for_user(&self, email: &str) -> Result<Vec<DbBooking>, HotelError> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_email = ? \
             ORDER BY created_at DESC, booking_id DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Shared by plain booking creation and the payment transaction.
pub(crate) async fn insert_booking<'e, E>(
    executor: E,
    booking: NewBooking,
    status: BookingStatus,
) -> Result<DbBooking, HotelError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        r#"
        INSERT INTO bookings (
            user_email, guest_first_name, guest_last_name, guest_email, phone,
            street, city, country, adults, children, rooms, room_type,
            in_date, out_date, special_request, status, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {BOOKING_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(booking.user_email)
        .bind(booking.guest_first_name)
        .bind(booking.guest_last_name)
        .bind(booking.guest_email)
        .bind(booking.phone)
        .bind(booking.street)
        .bind(booking.city)
        .bind(booking.country)
        .bind(booking.adults)
        .bind(booking.children)
        .bind(booking.rooms)
        .bind(booking.room_type)
        .bind(booking.in_date)
        .bind(booking.out_date)
        .bind(booking.special_request)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
    Ok(row)
}
