pub mod account;
pub mod bookings;
pub mod otp;
pub mod payments;
pub mod superadmin;
