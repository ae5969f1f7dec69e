//! Shared harness: the real router over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database as SeaDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;

use parking_manager::api::{create_router, AppState};
use parking_manager::config::Config;
use parking_manager::errors::AppResult;
use parking_manager::infra::{Database, RateLimiter};

pub const TEST_SECRET: &str = "integration-test-secret-32-chars-min";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Rate limiter that never says no, standing in for Redis.
pub struct Unlimited;

#[async_trait]
impl RateLimiter for Unlimited {
    async fn check_rate_limit(
        &self,
        _identifier: &str,
        _max_requests: u64,
        _window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        Ok((1, true))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct TestApp {
    router: Router,
    /// Admin bearer token
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        // One connection so every query sees the same in-memory database
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options)
            .await
            .expect("in-memory sqlite");
        let database = Database::from_connection(connection);
        database.run_migrations().await.expect("migrations apply");

        let state = AppState::from_config(
            Arc::new(database),
            Arc::new(Unlimited),
            Config::with_secret(TEST_SECRET),
        );
        state
            .user_service
            .ensure_admin(ADMIN_PASSWORD.to_string())
            .await
            .expect("admin account");

        let mut app = Self {
            router: create_router(state),
            token: String::new(),
        };
        app.token = app.login("admin", ADMIN_PASSWORD).await;
        app
    }

    /// Log in and return the access token, panicking on failure.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        body["accessToken"]
            .as_str()
            .expect("accessToken in login response")
            .to_string()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, Some(&self.token)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), Some(&self.token))
            .await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), Some(&self.token))
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, Some(&self.token)).await
    }

    /// Park a car, asserting success.
    pub async fn enter(&self, plate: &str, slot: &str, entry_time: &str) {
        let (status, body) = self
            .post(
                "/api/car-entry",
                json!({
                    "plateNumber": plate,
                    "driverName": "Jean Mugisha",
                    "phoneNumber": "+250788123456",
                    "slotNumber": slot,
                    "entryTime": entry_time,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "entry failed: {}", body);
    }

    /// Current status of one slot.
    pub async fn slot_status(&self, slot: &str) -> String {
        let (_, slots) = self.get("/api/parking-slots").await;
        slots
            .as_array()
            .expect("slot list")
            .iter()
            .find(|s| s["SlotNumber"] == slot)
            .map(|s| s["Status"].as_str().unwrap_or_default().to_string())
            .unwrap_or_default()
    }

    pub async fn records(&self) -> Vec<Value> {
        let (status, body) = self.get("/api/parking-records").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().cloned().unwrap_or_default()
    }
}
