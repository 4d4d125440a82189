//! Authentication primitives: password hashing, JWT issuance, cookie policy, OTP codes.

pub mod cookies;
pub mod otp;
pub mod password;
pub mod tokens;

pub use cookies::{ACCESS_COOKIE, CookiePolicy, REFRESH_COOKIE};
pub use tokens::{Claims, TokenKeys, TokenKind};
