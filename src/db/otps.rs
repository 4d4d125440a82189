use crate::db::models::DbEmailOtp;
use crate::db::sqlite::SqlitePool;
use crate::error::HotelError;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct OtpStorage {
    pool: SqlitePool,
}

impl OtpStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Drop every previous code for `email` and store the new one.
    pub async fn replace(
        &self,
        email: &str,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<i64, HotelError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM email_otps WHERE email = ?")
            .bind(email)
            .execute(&mut *tx)
            .await?;

        let done = sqlx::query(
            r#"INSERT INTO email_otps (email, otp_hash, expires_at, used, created_at)
               VALUES (?, ?, ?, 0, ?)"#,
        )
        .bind(email)
        .bind(otp_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(done.last_insert_rowid())
    }

    pub async fn latest(&self, email: &str) -> Result<Option<DbEmailOtp>, HotelError> {
        let row = sqlx::query_as::<_, DbEmailOtp>(
            r#"SELECT id, email, otp_hash, expires_at, used, created_at
               FROM email_otps WHERE email = ?
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn mark_used(&self, id: i64) -> Result<(), HotelError> {
        sqlx::query("UPDATE email_otps SET used = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Burn the code and flag the matching account as verified.
    pub async fn consume(&self, id: i64, email: &str) -> Result<(), HotelError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE email_otps SET used = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE loginusers SET verified = 1 WHERE email = ?")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
