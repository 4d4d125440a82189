use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::auth::password::{hash_password, is_long_enough};
use crate::db::models::{NewUser, Role};
use crate::error::HotelError;
use crate::middleware::{BearerSuperAdmin, JsonBody, SuperAdmin};
use crate::router::HotelState;
use crate::types::admin::{AdminSummary, CreateAdminRequest, DeleteAdminRequest};
use crate::types::{non_blank, normalize_email};

/// POST /superadmin/create_admin
pub async fn create_admin(
    State(state): State<HotelState>,
    SuperAdmin(actor): SuperAdmin,
    JsonBody(req): JsonBody<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Value>), HotelError> {
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
    if state.users.exists(&email).await? {
        return Err(HotelError::Conflict("Account already exist".to_string()));
    }

    let hashed = hash_password(password, state.cfg.bcrypt_cost).await?;
    state
        .users
        .insert(NewUser {
            first_name,
            last_name,
            email: email.clone(),
            password: hashed,
            phone: None,
            role: Role::Admin,
            verified: true,
        })
        .await?;

    info!(by = %actor.email, email = %email, "admin created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Admin created successfully" })),
    ))
}

/// DELETE /superadmin/deleteadmin
pub async fn delete_admin(
    State(state): State<HotelState>,
    SuperAdmin(actor): SuperAdmin,
    JsonBody(req): JsonBody<DeleteAdminRequest>,
) -> Result<Json<Value>, HotelError> {
    let Some(email) = normalize_email(req.email) else {
        return Err(HotelError::bad_request("Email is required"));
    };

    let Some(target) = state.users.find_by_email(&email).await? else {
        return Err(HotelError::not_found("User not found"));
    };
    if target.role != Role::Admin {
        return Err(HotelError::bad_request("Only admins can be deleted"));
    }

    state.users.delete_by_email(&email).await?;
    info!(by = %actor.email, email = %email, "admin deleted");
    Ok(Json(json!({
        "message": format!("Admin with email {email} deleted successfully"),
    })))
}

/// GET /superadmin/list_admin
pub async fn list_admins(
    State(state): State<HotelState>,
    BearerSuperAdmin(_actor): BearerSuperAdmin,
) -> Result<Json<Vec<AdminSummary>>, HotelError> {
    let admins = state.users.list_by_role(Role::Admin).await?;
    Ok(Json(admins.into_iter().map(AdminSummary::from).collect()))
}
