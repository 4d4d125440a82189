//! Database module: models, schema and storages for persistent state.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and schema bootstrap
//! - `users.rs`, `bookings.rs`, `payments.rs`, `otps.rs`: per-table storages

pub mod bookings;
pub mod models;
pub mod otps;
pub mod payments;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use bookings::BookingsStorage;
pub use models::{DbBooking, DbEmailOtp, DbPayment, DbUser, Role};
pub use otps::OtpStorage;
pub use payments::PaymentsStorage;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, connect, init_schema};
pub use users::UsersStorage;
