use crate::auth::TokenKeys;
use crate::config::Config;
use crate::db::{BookingsStorage, OtpStorage, PaymentsStorage, SqlitePool, UsersStorage};
use crate::handlers::{account, bookings, otp, payments, superadmin};
use crate::service::{Mailer, OtpLimiter};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct HotelState {
    pub users: UsersStorage,
    pub bookings: BookingsStorage,
    pub payments: PaymentsStorage,
    pub otps: OtpStorage,
    pub tokens: Arc<TokenKeys>,
    pub mailer: Arc<dyn Mailer>,
    pub otp_limiter: Arc<OtpLimiter>,
    pub cfg: Arc<Config>,
}

impl HotelState {
    pub fn new(pool: SqlitePool, cfg: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            users: UsersStorage::new(pool.clone()),
            bookings: BookingsStorage::new(pool.clone()),
            payments: PaymentsStorage::new(pool.clone()),
            otps: OtpStorage::new(pool),
            tokens: Arc::new(TokenKeys::from_config(&cfg)),
            mailer,
            otp_limiter: Arc::new(OtpLimiter::per_minute(cfg.otp_requests_per_minute)),
            cfg: Arc::new(cfg),
        }
    }
}

pub fn hotel_router(state: HotelState) -> Router {
    let cors = cors_layer(&state.cfg);
    let body_limit = state.cfg.body_limit_bytes;

    Router::new()
        .route("/health", get(healthcheck))
        .route("/send-otp", post(otp::send_otp))
        .route("/verify-otp", post(otp::verify_otp))
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
        .route("/me", post(account::me))
        .route("/refresh", post(account::refresh))
        .route("/userdetails", get(account::user_details))
        .route("/change-password", post(account::change_profile))
        .route("/bookings", post(bookings::create_booking))
        .route("/cancelbooking", post(bookings::cancel_booking))
        .route("/user/history", get(bookings::user_history))
        .route("/payments", post(payments::record_payment))
        .route("/superadmin/create_admin", post(superadmin::create_admin))
        .route("/superadmin/deleteadmin", delete(superadmin::delete_admin))
        .route("/superadmin/list_admin", get(superadmin::list_admins))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .frontend_origins()
        .iter()
        .filter_map(|url| HeaderValue::from_str(&url.origin().ascii_serialization()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .expose_headers([header::SET_COOKIE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
