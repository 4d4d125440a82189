use crate::config::Config;
use crate::db::models::Role;
use crate::error::HotelError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// The claims stored in both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// Signing material for the two token kinds. Each kind has its own secret.
pub struct TokenKeys {
    access: KeyPair,
    refresh: KeyPair,
}

impl TokenKeys {
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: KeyPair {
                encoding: EncodingKey::from_secret(access_secret),
                decoding: DecodingKey::from_secret(access_secret),
                ttl: access_ttl,
            },
            refresh: KeyPair {
                encoding: EncodingKey::from_secret(refresh_secret),
                decoding: DecodingKey::from_secret(refresh_secret),
                ttl: refresh_ttl,
            },
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.jwt_access_secret.as_bytes(),
            cfg.jwt_refresh_secret.as_bytes(),
            Duration::minutes(cfg.access_token_ttl_minutes),
            Duration::days(cfg.refresh_token_ttl_days),
        )
    }

    fn pair(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.pair(kind).ttl
    }

    pub fn issue(&self, kind: TokenKind, email: &str, role: Role) -> Result<String, HotelError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            role,
            kind,
            iat: now.timestamp(),
            exp: (now + self.ttl(kind)).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn issue_access(&self, email: &str, role: Role) -> Result<String, HotelError> {
        self.issue(TokenKind::Access, email, role)
    }

    pub fn issue_refresh(&self, email: &str, role: Role) -> Result<String, HotelError> {
        self.issue(TokenKind::Refresh, email, role)
    }

    fn sign(&self, claims: &Claims) -> Result<String, HotelError> {
        let header = Header::new(ALGORITHM);
        Ok(encode(&header, claims, &self.pair(claims.kind).encoding)?)
    }

    /// Decode and validate a token of the expected kind.
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, HotelError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        let decoded = decode::<Claims>(token, &self.pair(kind).decoding, &validation)?;
        if decoded.claims.kind != kind {
            return Err(HotelError::unauthorized("Invalid token kind"));
        }
        Ok(decoded.claims)
    }
}
