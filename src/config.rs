use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Shortest accepted JWT signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Runtime configuration.
///
/// Sources, lowest priority first: built-in defaults, `config.toml` in the
/// working directory, then `HOTEL_*` environment variables. Nested keys use
/// `__` as separator, e.g. `HOTEL_SMTP__USERNAME`.
///
/// The JWT secrets have no usable default: [`Config::load`] fails until both
/// are set, are at least [`MIN_SECRET_LEN`] bytes and differ from each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: String,
    pub listen_addr: String,
    pub database_url: String,

    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,

    pub otp_ttl_minutes: i64,
    pub otp_requests_per_minute: u32,
    pub bcrypt_cost: u32,

    /// Comma separated list of origins allowed by CORS.
    pub frontend_origins: String,
    /// Never mark cookies `Secure`, even for non-local hosts.
    pub insecure_cookie: bool,
    pub cookie_domain: Option<String>,

    pub body_limit_bytes: usize,

    pub smtp: SmtpConfig,
    pub superadmin: SuperadminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address; falls back to `username`.
    pub from: Option<String>,
}

/// Account created on startup when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperadminConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite:hotel.db".to_string(),
            jwt_access_secret: String::new(),
            jwt_refresh_secret: String::new(),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
            otp_ttl_minutes: 5,
            otp_requests_per_minute: 3,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            frontend_origins: String::new(),
            insecure_cookie: false,
            cookie_domain: None,
            body_limit_bytes: 1024 * 1024,
            smtp: SmtpConfig::default(),
            superadmin: SuperadminConfig::default(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            username: None,
            password: None,
            from: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Self = Self::figment().extract()?;
        cfg.check_secrets().map_err(figment::Error::from)?;
        Ok(cfg)
    }

    /// Reject missing, short, or shared JWT secrets.
    pub fn check_secrets(&self) -> Result<(), String> {
        for (key, secret) in [
            ("jwt_access_secret", &self.jwt_access_secret),
            ("jwt_refresh_secret", &self.jwt_refresh_secret),
        ] {
            if secret.trim().is_empty() {
                return Err(format!("{key} is not set (HOTEL_{})", key.to_uppercase()));
            }
            if secret.len() < MIN_SECRET_LEN {
                return Err(format!("{key} must be at least {MIN_SECRET_LEN} bytes long"));
            }
        }
        if self.jwt_access_secret == self.jwt_refresh_secret {
            return Err("jwt_access_secret and jwt_refresh_secret must differ".to_string());
        }
        Ok(())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HOTEL_").split("__"))
    }

    /// Parsed CORS origins. Entries that are not absolute URLs are skipped.
    pub fn frontend_origins(&self) -> Vec<Url> {
        self.frontend_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|raw| match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(origin = raw, error = %e, "ignoring invalid frontend origin");
                    None
                }
            })
            .collect()
    }
}

impl SmtpConfig {
    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.username.as_deref())
    }
}
