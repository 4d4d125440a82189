use crate::config::SmtpConfig;
use crate::error::HotelError;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

/// Delivers one-time codes to users.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, otp: &str, ttl_minutes: i64) -> Result<(), HotelError>;
}

pub fn otp_body(otp: &str, ttl_minutes: i64) -> String {
    format!("Your otp is {otp}.It will expire in {ttl_minutes} minutes")
}

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// SMTP over implicit TLS (SMTPS), e.g. Gmail on port 465.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: &SmtpConfig) -> Result<Self, HotelError> {
        let (username, password) = cfg.credentials().ok_or_else(|| {
            HotelError::UnexpectedError("SMTP username/password not configured".to_string())
        })?;
        let from: Mailbox = cfg.sender().unwrap_or(username).parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)?
            .port(cfg.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(Duration::from_secs(15)))
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_otp(&self, to: &str, otp: &str, ttl_minutes: i64) -> Result<(), HotelError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject("Your OTP code")
            .header(ContentType::TEXT_PLAIN)
            .body(otp_body(otp, ttl_minutes))?;

        (|| async { self.transport.send(message.clone()).await })
            .retry(default_retry_policy())
            .when(|e: &lettre::transport::smtp::Error| e.is_transient())
            .notify(|err, dur: Duration| {
                warn!("SMTP send retrying after error {}, sleeping {:?}", err, dur);
            })
            .await?;

        info!(to, "OTP email sent");
        Ok(())
    }
}

/// Writes the delivery to the log instead of sending it; for local setups without SMTP.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(&self, to: &str, otp: &str, ttl_minutes: i64) -> Result<(), HotelError> {
        info!(to, otp, ttl_minutes, "SMTP not configured; OTP email not sent");
        Ok(())
    }
}
