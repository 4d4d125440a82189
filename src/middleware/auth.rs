use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum_extra::TypedHeader;
use axum_extra::extract::cookie::CookieJar;
use headers::{Authorization, authorization::Bearer};
use tracing::warn;

use crate::auth::{ACCESS_COOKIE, CookiePolicy, TokenKind};
use crate::db::Role;
use crate::error::HotelError;
use crate::router::HotelState;

/// Caller identified by a valid `access_token` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    fn from_token(state: &HotelState, token: &str) -> Result<Self, HotelError> {
        let claims = state
            .tokens
            .verify(TokenKind::Access, token)
            .map_err(|e| {
                warn!(error = %e, "rejected access token");
                HotelError::unauthorized("Invalid or expired token")
            })?;
        Ok(Self {
            email: claims.email,
            role: claims.role,
        })
    }
}

fn access_cookie(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<HotelState> for AuthUser {
    type Rejection = HotelError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HotelState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_cookie(parts).ok_or_else(|| HotelError::unauthorized("No token"))?;
        Self::from_token(state, &token)
    }
}

/// `AuthUser` whose token carries the superadmin role.
#[derive(Debug, Clone)]
pub struct SuperAdmin(pub AuthUser);

impl FromRequestParts<HotelState> for SuperAdmin {
    type Rejection = HotelError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HotelState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::SuperAdmin {
            warn!(email = %user.email, role = ?user.role, "superadmin route refused");
            return Err(HotelError::Forbidden(
                "Forbidden: Super Admins only".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Superadmin check for API clients: accepts `Authorization: Bearer <token>`
/// (falling back to the cookie) and re-reads the role from the database
/// instead of trusting the token claim.
#[derive(Debug, Clone)]
pub struct BearerSuperAdmin(pub AuthUser);

impl FromRequestParts<HotelState> for BearerSuperAdmin {
    type Rejection = HotelError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HotelState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok()
            .map(|TypedHeader(Authorization(b))| b.token().to_string());
        let token = bearer
            .or_else(|| access_cookie(parts))
            .ok_or_else(|| HotelError::unauthorized("No token provided"))?;

        let user = AuthUser::from_token(state, &token)?;
        let stored = state.users.find_by_email(&user.email).await?;
        match stored {
            Some(u) if u.role == Role::SuperAdmin => Ok(Self(AuthUser {
                email: u.email,
                role: u.role,
            })),
            _ => Err(HotelError::Forbidden(
                "Unauthorized - SuperAdmin access required".to_string(),
            )),
        }
    }
}

impl FromRequestParts<HotelState> for CookiePolicy {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HotelState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.host());
        Ok(CookiePolicy::for_host(
            host,
            state.cfg.insecure_cookie,
            state.cfg.cookie_domain.clone(),
        ))
    }
}
