pub mod auth;
pub mod json_body;

pub use auth::{AuthUser, BearerSuperAdmin, SuperAdmin};
pub use json_body::JsonBody;
