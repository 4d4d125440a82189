//! SQL DDL for initializing the hotel database.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema:
/// - `loginusers`: accounts, unique by email; `role` is one of user/admin/superadmin
/// - `bookings`: stays requested by a user, owned through `user_email`
/// - `payments`: recorded payments, each tied to one booking
/// - `email_otps`: bcrypt-hashed one-time codes for email verification
///
/// Timestamps are stored as TEXT (RFC3339), booleans as INTEGER 0/1.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS loginusers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    phone TEXT NULL,
    role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin', 'superadmin')),
    verified INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'active',
    last_login TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_loginusers_role ON loginusers(role);

CREATE TABLE IF NOT EXISTS bookings (
    booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_email TEXT NOT NULL,
    guest_first_name TEXT NULL,
    guest_last_name TEXT NULL,
    guest_email TEXT NULL,
    phone TEXT NULL,
    street TEXT NULL,
    city TEXT NULL,
    country TEXT NULL,
    adults INTEGER NULL,
    children INTEGER NULL,
    rooms INTEGER NULL,
    room_type TEXT NULL,
    in_date TEXT NULL,
    out_date TEXT NULL,
    special_request TEXT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'confirmed', 'cancelled')),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookings_user_email ON bookings(user_email);

CREATE TABLE IF NOT EXISTS payments (
    payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    booking_id INTEGER NOT NULL REFERENCES bookings(booking_id) ON DELETE CASCADE,
    user_email TEXT NOT NULL,
    amount REAL NOT NULL,
    payment_method TEXT NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('pending', 'completed')),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_payments_booking_id ON payments(booking_id);

CREATE TABLE IF NOT EXISTS email_otps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    otp_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    used INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_email_otps_email ON email_otps(email);
"#;
