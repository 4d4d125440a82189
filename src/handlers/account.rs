use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::auth::password::{hash_password, is_long_enough, verify_password};
use crate::auth::{CookiePolicy, REFRESH_COOKIE, TokenKind};
use crate::db::models::{DbUser, NewUser, ProfileUpdate, Role};
use crate::error::HotelError;
use crate::middleware::{AuthUser, JsonBody};
use crate::router::HotelState;
use crate::types::account::{
    ChangeProfileRequest, LoginRequest, SessionUser, SignupRequest, SignupUser, UserDetails,
};
use crate::types::{non_blank, normalize_email};

/// Put a fresh access + refresh pair for `email` into the jar.
fn issue_session(
    state: &HotelState,
    policy: &CookiePolicy,
    jar: CookieJar,
    email: &str,
    role: Role,
) -> Result<(CookieJar, String), HotelError> {
    let access = state.tokens.issue_access(email, role)?;
    let refresh = state.tokens.issue_refresh(email, role)?;
    let jar = policy.set_session(
        jar,
        (access.clone(), state.tokens.ttl(TokenKind::Access)),
        (refresh, state.tokens.ttl(TokenKind::Refresh)),
    );
    Ok((jar, access))
}

/// POST /signup
pub async fn signup(
    State(state): State<HotelState>,
    policy: CookiePolicy,
    jar: CookieJar,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<Response, HotelError> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        non_blank(req.firstname),
        non_blank(req.lastname),
        normalize_email(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(HotelError::bad_request("All fields are required"));
    };

    if !is_long_enough(&password) {
        return Err(HotelError::bad_request(
            "Password should be at least 6 characters",
        ));
    }
    if req.repassword.as_deref().is_some_and(|r| r != password) {
        return Err(HotelError::bad_request("Passwords do not match"));
    }

    if state.users.exists(&email).await? {
        return Err(HotelError::bad_request("Account already exist"));
    }

    let hashed = hash_password(password, state.cfg.bcrypt_cost).await?;
    state
        .users
        .insert(NewUser {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            email: email.clone(),
            password: hashed,
            phone: non_blank(req.phone),
            role: Role::User,
            verified: false,
        })
        .await
        .map_err(|e| match e {
            HotelError::Conflict(msg) => HotelError::BadRequest(msg),
            e => e,
        })?;

    let (jar, _) = issue_session(&state, &policy, jar, &email, Role::User)?;
    info!(email = %email, "account created");

    let user = SignupUser {
        first_name,
        last_name,
        email,
    };
    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "message": "Signup successful",
            "status": "success",
            "user": user,
        })),
    )
        .into_response())
}

/// POST /login
pub async fn login(
    State(state): State<HotelState>,
    policy: CookiePolicy,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Response, HotelError> {
    let (Some(email), Some(password)) = (
        normalize_email(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(HotelError::bad_request("All fields are required"));
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        return Err(HotelError::not_found("Account not found"));
    };

    if !verify_password(password, user.password.clone()).await? {
        warn!(email = %email, "login with wrong password");
        return Err(HotelError::unauthorized("Password incorrect"));
    }

    if let Err(e) = state.users.touch_staff_login(&email).await {
        warn!(email = %email, error = %e, "failed to record last login");
    }

    let (jar, access) = issue_session(&state, &policy, jar, &user.email, user.role)?;
    info!(email = %email, role = ?user.role, "login");

    Ok((
        jar,
        Json(json!({
            "message": "Login successful",
            "access_token": access,
            "user": SessionUser::from(user),
        })),
    )
        .into_response())
}

/// POST /logout
pub async fn logout(policy: CookiePolicy, jar: CookieJar) -> impl IntoResponse {
    (
        policy.clear_session(jar),
        Json(json!({ "message": "Logout successful", "status": "success" })),
    )
}

/// POST /me
pub async fn me(
    State(state): State<HotelState>,
    user: AuthUser,
) -> Result<Response, HotelError> {
    match state.users.find_by_email(&user.email).await? {
        Some(u) => Ok(Json(json!({ "user": SessionUser::from(u) })).into_response()),
        None => Ok((StatusCode::NOT_FOUND, Json(json!({ "user": null }))).into_response()),
    }
}

/// POST /refresh
pub async fn refresh(
    State(state): State<HotelState>,
    policy: CookiePolicy,
    jar: CookieJar,
) -> Result<Response, HotelError> {
    let Some(token) = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
    else {
        return Err(HotelError::Unauthorized {
            code: "NO_REFRESH_TOKEN",
            message: "Refresh token missing".to_string(),
        });
    };

    let invalid = || HotelError::Unauthorized {
        code: "INVALID_REFRESH_TOKEN",
        message: "Invalid or expired refresh token".to_string(),
    };

    let claims = state
        .tokens
        .verify(TokenKind::Refresh, &token)
        .map_err(|e| {
            warn!(error = %e, "rejected refresh token");
            invalid()
        })?;

    // role may have changed since the refresh token was minted
    let Some(user) = state.users.find_by_email(&claims.email).await? else {
        return Err(invalid());
    };

    let access = state.tokens.issue_access(&user.email, user.role)?;
    let jar = policy.set_access(jar, access, state.tokens.ttl(TokenKind::Access));
    Ok((jar, Json(json!({ "message": "Token refreshed successfully" }))).into_response())
}

/// GET /userdetails
pub async fn user_details(
    State(state): State<HotelState>,
    user: AuthUser,
) -> Result<Json<UserDetails>, HotelError> {
    let Some(u) = state.users.find_by_email(&user.email).await? else {
        return Err(HotelError::not_found("User not found"));
    };
    Ok(Json(UserDetails::from(u)))
}

/// POST /change-password
///
/// Partial profile update; a password change is attempted only when a new
/// or confirmation password is present.
pub async fn change_profile(
    State(state): State<HotelState>,
    policy: CookiePolicy,
    jar: CookieJar,
    user: AuthUser,
    JsonBody(req): JsonBody<ChangeProfileRequest>,
) -> Result<(CookieJar, Json<Value>), HotelError> {
    let current_password = req.current_password.filter(|p| !p.is_empty());
    let new_password = req.new_password.filter(|p| !p.is_empty());
    let confirm_password = req.confirm_password.filter(|p| !p.is_empty());
    let change_password = new_password.is_some() || confirm_password.is_some();

    if change_password {
        let (Some(_), Some(new)) = (current_password.as_deref(), new_password.as_deref()) else {
            return Err(HotelError::bad_request(
                "Current and new password are required",
            ));
        };
        if confirm_password.as_deref().is_some_and(|c| c != new) {
            return Err(HotelError::bad_request("New passwords do not match"));
        }
        if !is_long_enough(new) {
            return Err(HotelError::bad_request(
                "Password should be at least 6 characters",
            ));
        }
    }

    let Some(stored) = state.users.find_by_email(&user.email).await? else {
        return Err(HotelError::not_found("User not found"));
    };

    let new_email = normalize_email(req.email);
    if let Some(new_email) = new_email.as_deref()
        && new_email != stored.email
        && state.users.exists(new_email).await?
    {
        return Err(HotelError::bad_request("Email already in use"));
    }

    let mut password = None;
    if let (true, Some(current), Some(new)) = (change_password, current_password, new_password) {
        if !verify_password(current, stored.password.clone()).await? {
            return Err(HotelError::bad_request("Current password is incorrect"));
        }
        password = Some(hash_password(new, state.cfg.bcrypt_cost).await?);
    }

    let update = ProfileUpdate {
        first_name: non_blank(req.first_name),
        last_name: non_blank(req.last_name),
        email: new_email.clone(),
        phone: non_blank(req.phone),
        password,
    };
    if update.is_empty() {
        return Err(HotelError::bad_request("No profile fields to update"));
    }

    state.users.update_profile(&stored.email, update).await?;
    info!(email = %stored.email, "profile updated");

    let jar = match new_email.filter(|e| *e != stored.email) {
        Some(email) => reissue_for_new_email(&state, &policy, jar, &stored, &email)?,
        None => jar,
    };

    Ok((jar, Json(json!({ "message": "Profile updated successfully" }))))
}

/// Old tokens name the previous email; hand out a session for the new one.
fn reissue_for_new_email(
    state: &HotelState,
    policy: &CookiePolicy,
    jar: CookieJar,
    stored: &DbUser,
    new_email: &str,
) -> Result<CookieJar, HotelError> {
    info!(from = %stored.email, to = %new_email, "email changed; session reissued");
    let (jar, _) = issue_session(state, policy, jar, new_email, stored.role)?;
    Ok(jar)
}
