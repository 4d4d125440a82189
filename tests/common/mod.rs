#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use hotel_desk::config::Config;
use hotel_desk::db::SqlitePool;
use hotel_desk::service::{Mailer, bootstrap};
use hotel_desk::{HotelError, HotelState, hotel_router};
use serde_json::Value;
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const SUPERADMIN_EMAIL: &str = "root@hotel.test";
pub const SUPERADMIN_PASSWORD: &str = "root-password";
pub const LOCAL_HOST: &str = "localhost:5000";

/// Mailer that keeps every code it was asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_otp(&self, to: &str, otp: &str, _ttl_minutes: i64) -> Result<(), HotelError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), otp.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: HotelState,
    pub mailer: Arc<RecordingMailer>,
    database_url: String,
    db_path: PathBuf,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name -> value` for every Set-Cookie header.
    pub fn cookies(&self) -> HashMap<String, String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|raw| {
                let pair = raw.split(';').next()?;
                let (name, value) = pair.split_once('=')?;
                Some((name.trim().to_string(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn set_cookie_line(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|raw| raw.starts_with(&format!("{name}=")))
            .map(str::to_string)
    }

    /// Cookie request header replaying this response's session cookies.
    pub fn session(&self) -> String {
        self.cookies()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(tweak: impl FnOnce(&mut Config)) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "hotel-desk-test-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let database_url = format!("sqlite:{}", db_path.display());

        let mut cfg = Config {
            database_url: database_url.clone(),
            jwt_access_secret: "test-access-secret-0123456789abcdef".to_string(),
            jwt_refresh_secret: "test-refresh-secret-0123456789abcdef".to_string(),
            bcrypt_cost: 4,
            otp_requests_per_minute: 5,
            frontend_origins: "http://localhost:3000".to_string(),
            ..Config::default()
        };
        cfg.superadmin.email = Some(SUPERADMIN_EMAIL.to_string());
        cfg.superadmin.password = Some(SUPERADMIN_PASSWORD.to_string());
        tweak(&mut cfg);

        let pool = hotel_desk::db::connect(&database_url)
            .await
            .expect("failed to open test database");
        let mailer = Arc::new(RecordingMailer::default());
        let state = HotelState::new(pool, cfg.clone(), mailer.clone());
        bootstrap::ensure_superadmin(&state.users, &cfg)
            .await
            .expect("superadmin bootstrap failed");
        let router = hotel_router(state.clone());

        Self {
            router,
            state,
            mailer,
            database_url,
            db_path,
        }
    }

    /// Second pool on the same file, for asserting on stored rows.
    pub async fn pool(&self) -> SqlitePool {
        hotel_desk::db::connect(&self.database_url)
            .await
            .expect("failed to reopen test database")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        self.request_with(method, uri, cookie, &[], body).await
    }

    pub async fn request_with(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        extra_headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let (host_override, extra_headers): (Vec<&(&str, &str)>, Vec<&(&str, &str)>) = extra_headers
            .iter()
            .partition(|(name, _)| name.eq_ignore_ascii_case("host"));
        let host = host_override.first().map_or(LOCAL_HOST, |(_, v)| *v);

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, host);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    /// Sign up a regular user and return the session cookie header.
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let resp = self
            .post(
                "/signup",
                None,
                serde_json::json!({
                    "firstname": "Ama",
                    "lastname": "Mensah",
                    "email": email,
                    "password": password,
                    "repassword": password,
                }),
            )
            .await;
        assert_eq!(
            resp.status,
            StatusCode::CREATED,
            "signup failed: {}",
            resp.body
        );
        resp.session()
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/login",
            None,
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn login_superadmin(&self) -> String {
        let resp = self.login(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD).await;
        assert_eq!(
            resp.status,
            StatusCode::OK,
            "superadmin login failed: {}",
            resp.body
        );
        resp.session()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}
