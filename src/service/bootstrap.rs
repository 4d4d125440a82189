use crate::auth::password::{hash_password, is_long_enough};
use crate::config::Config;
use crate::db::UsersStorage;
use crate::db::models::{NewUser, Role};
use crate::error::HotelError;
use crate::types::normalize_email;
use tracing::{info, warn};

/// Create the configured superadmin account when it does not exist yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_superadmin(users: &UsersStorage, cfg: &Config) -> Result<bool, HotelError> {
    let (Some(email), Some(password)) = (
        normalize_email(cfg.superadmin.email.clone()),
        cfg.superadmin.password.as_deref(),
    ) else {
        return Ok(false);
    };

    if users.exists(&email).await? {
        return Ok(false);
    }
    if !is_long_enough(password) {
        warn!(email = %email, "superadmin password too short; skipping bootstrap");
        return Ok(false);
    }

    let hashed = hash_password(password.to_string(), cfg.bcrypt_cost).await?;
    users
        .insert(NewUser {
            first_name: cfg
                .superadmin
                .first_name
                .clone()
                .unwrap_or_else(|| "Super".to_string()),
            last_name: cfg
                .superadmin
                .last_name
                .clone()
                .unwrap_or_else(|| "Admin".to_string()),
            email: email.clone(),
            password: hashed,
            phone: None,
            role: Role::SuperAdmin,
            verified: true,
        })
        .await?;
    info!(email = %email, "superadmin account created");
    Ok(true)
}
