use crate::db::models::{DbUser, NewUser, ProfileUpdate, Role};
use crate::db::sqlite::SqlitePool;
use crate::error::HotelError;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password, phone, role, verified, \
                            status, last_login, created_at";

#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<DbUser>, HotelError> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM loginusers WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn exists(&self, email: &str) -> Result<bool, HotelError> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM loginusers WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Insert a new account. Returns the row id, or `Conflict` if the email is taken.
    pub async fn insert(&self, user: NewUser) -> Result<i64, HotelError> {
        let result = sqlx::query(
            r#"
            INSERT INTO loginusers (
                first_name, last_name, email, password, phone, role, verified, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password)
        .bind(user.phone)
        .bind(user.role)
        .bind(user.verified)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(HotelError::Conflict("Account already exist".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stamp `last_login` for admin and superadmin accounts; regular users are left alone.
    pub async fn touch_staff_login(&self, email: &str) -> Result<(), HotelError> {
        sqlx::query(
            "UPDATE loginusers SET last_login = ? \
             WHERE email = ? AND role IN ('admin', 'superadmin')",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<DbUser>, HotelError> {
        let users = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM loginusers WHERE role = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Returns the number of deleted rows.
    pub async fn delete_by_email(&self, email: &str) -> Result<u64, HotelError> {
        let done = sqlx::query("DELETE FROM loginusers WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    /// Apply a partial profile update in one transaction.
    ///
    /// When the email changes, bookings and payments owned by the old email
    /// follow it so the account keeps its history.
    pub async fn update_profile(
        &self,
        current_email: &str,
        update: ProfileUpdate,
    ) -> Result<(), HotelError> {
        if update.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE loginusers SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(first_name) = update.first_name {
                fields.push("first_name = ").push_bind_unseparated(first_name);
            }
            if let Some(last_name) = update.last_name {
                fields.push("last_name = ").push_bind_unseparated(last_name);
            }
            if let Some(email) = update.email.clone() {
                fields.push("email = ").push_bind_unseparated(email);
            }
            if let Some(phone) = update.phone {
                fields.push("phone = ").push_bind_unseparated(phone);
            }
            if let Some(password) = update.password {
                fields.push("password = ").push_bind_unseparated(password);
            }
        }
        qb.push(" WHERE email = ").push_bind(current_email);

        match qb.build().execute(&mut *tx).await {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(HotelError::bad_request("Email already in use"));
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(new_email) = update.email.as_deref().filter(|e| *e != current_email) {
            sqlx::query("UPDATE bookings SET user_email = ? WHERE user_email = ?")
                .bind(new_email)
                .bind(current_email)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE payments SET user_email = ? WHERE user_email = ?")
                .bind(new_email)
                .bind(current_email)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
