pub mod bootstrap;
pub mod mailer;
pub mod otp_limiter;

pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use otp_limiter::{OtpLimiter, spawn_pruner};
