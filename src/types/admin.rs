use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::DbUser;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAdminRequest {
    #[serde(alias = "first_name")]
    pub firstname: Option<String>,
    #[serde(alias = "last_name")]
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAdminRequest {
    pub email: Option<String>,
}

/// Row of the superadmin's admin listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub permissions: Vec<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub status: String,
}

impl From<DbUser> for AdminSummary {
    fn from(u: DbUser) -> Self {
        Self {
            id: u.id,
            name: format!("{} {}", u.first_name, u.last_name),
            email: u.email,
            permissions: Vec::new(),
            last_login: u.last_login,
            status: u.status,
        }
    }
}
