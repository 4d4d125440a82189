use crate::db::bookings::insert_booking;
use crate::db::models::{BookingStatus, DbBooking, DbPayment, NewBooking, NewPayment};
use crate::db::sqlite::SqlitePool;
use crate::error::HotelError;
use chrono::Utc;

#[derive(Clone)]
pub struct PaymentsStorage {
    pool: SqlitePool,
}

impl PaymentsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the booking and its payment in a single transaction.
    pub async fn record(
        &self,
        booking: NewBooking,
        booking_status: BookingStatus,
        payment: NewPayment,
    ) -> Result<(DbBooking, DbPayment), HotelError> {
        let mut tx = self.pool.begin().await?;

        let user_email = booking.user_email.clone();
        let booking = insert_booking(&mut *tx, booking, booking_status).await?;

        let payment = sqlx::query_as::<_, DbPayment>(
            r#"
            INSERT INTO payments (
                booking_id, user_email, amount, payment_method, status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING payment_id, booking_id, user_email, amount, payment_method, status, created_at
            "#,
        )
        .bind(booking.booking_id)
        .bind(user_email)
        .bind(payment.amount)
        .bind(payment.payment_method)
        .bind(payment.status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((booking, payment))
    }
}
