use serde::{Deserialize, Serialize};

use crate::db::models::{DbUser, Role};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    #[serde(alias = "first_name")]
    pub firstname: Option<String>,
    #[serde(alias = "last_name")]
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "confirm_password", alias = "confirmPassword")]
    pub repassword: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// Partial profile update plus optional password change.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeProfileRequest {
    #[serde(alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(alias = "lastname")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "currentPassword")]
    pub current_password: Option<String>,
    #[serde(alias = "newPassword")]
    pub new_password: Option<String>,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: Option<String>,
}

/// Signup echo of the created account.
#[derive(Debug, Serialize)]
pub struct SignupUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Session view returned by `/login` and `/me`.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub role: Role,
    pub firstname: String,
    pub lastname: String,
}

impl From<DbUser> for SessionUser {
    fn from(u: DbUser) -> Self {
        Self {
            email: u.email,
            role: u.role,
            firstname: u.first_name,
            lastname: u.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub verified: bool,
}

impl From<DbUser> for UserDetails {
    fn from(u: DbUser) -> Self {
        Self {
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role,
            phone: u.phone,
            verified: u.verified,
        }
    }
}
