//! Shared harness: an in-memory SQLite database migrated with the real
//! migrator, and the real router driven through `tower::ServiceExt`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use server::config::AppConfig;
use server::http::{AppState, build_router};

pub async fn setup_app() -> (DatabaseConnection, Router) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    let state = AppState {
        pool: db.clone(),
        config: Arc::new(AppConfig::default()),
    };
    (db, build_router(state))
}

/// Sends one request and returns the status plus the decoded body. Bodies
/// that are not JSON (the fault channel) come back as a JSON string value.
pub async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub fn company_signup(company_tax_id: &str, admin_tax_id: &str, email: &str) -> Value {
    json!({
        "name": "Alice Admin",
        "email": email,
        "password": "s3cret-pw",
        "tax_id": admin_tax_id,
        "company_name": "Empresa de exemplo",
        "company_tax_id": company_tax_id,
    })
}

/// Registers a company plus admin and returns the admin's employee id.
pub async fn seed_company_with_admin(router: &Router) -> i64 {
    let (status, body) = call(
        router,
        "POST",
        "/api/signup/company",
        Some(company_signup("51463645000100", "21612447051", "admin@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seed signup failed: {body}");
    body["data"]["id"].as_i64().expect("admin id")
}

pub fn errors_of(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|err| err.as_str().unwrap_or_default().to_string())
        .collect()
}
