mod support;

use axum::http::StatusCode;
use entity::time_entry;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use support::{call, errors_of, setup_app};

fn entry_payload(employee_id: i64, recorded_at: &str, kind: &str) -> Value {
    json!({
        "recorded_at": recorded_at,
        "kind": kind,
        "description": "regular day",
        "location": "HQ",
        "employee_id": employee_id,
    })
}

#[tokio::test]
async fn create_and_read_back_round_trips() {
    let (_db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(employee_id, "2026-01-10 08:00:00", "SHIFT_START")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["recorded_at"], "2026-01-10 08:00:00");
    assert_eq!(body["data"]["kind"], "SHIFT_START");
    assert_eq!(body["data"]["description"], "regular day");
    assert_eq!(body["data"]["location"], "HQ");
    assert_eq!(body["data"]["employee_id"], employee_id);

    // Reads are idempotent: two lookups of an unmodified entry are identical.
    let (first_status, first) =
        call(&router, "GET", &format!("/api/time-entries/{id}"), None).await;
    let (second_status, second) =
        call(&router, "GET", &format!("/api/time-entries/{id}"), None).await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["data"], body["data"]);
}

#[tokio::test]
async fn every_valid_kind_is_accepted() {
    let (_db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    for kind in ["SHIFT_START", "LUNCH_START", "LUNCH_END", "SHIFT_END"] {
        let (status, body) = call(
            &router,
            "POST",
            "/api/time-entries",
            Some(entry_payload(employee_id, "2026-01-10 08:00:00", kind)),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "kind {kind} rejected: {body}");
        assert_eq!(body["data"]["kind"], kind);
    }
}

#[tokio::test]
async fn invalid_kind_is_rejected() {
    let (db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(employee_id, "2026-01-10 08:00:00", "INVALID_KIND")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = errors_of(&body);
    assert!(errors.iter().any(|err| err.contains("Invalid entry kind")));
    assert_eq!(time_entry::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn missing_employee_id_is_reported_without_lookup() {
    let (_db, router) = setup_app().await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(json!({
            "recorded_at": "2026-01-10 08:00:00",
            "kind": "SHIFT_START",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = errors_of(&body);
    assert!(errors.iter().any(|err| err.contains("Employee id not supplied")));
}

#[tokio::test]
async fn unknown_employee_is_rejected() {
    let (db, router) = setup_app().await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(424242, "2026-01-10 08:00:00", "SHIFT_START")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = errors_of(&body);
    assert!(errors.iter().any(|err| err.contains("Employee not found for id 424242")));
    assert_eq!(time_entry::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_timestamp_is_a_fault_not_a_validation_error() {
    let (_db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(employee_id, "10/01/2026 08:00", "SHIFT_START")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // Faults bypass the envelope; the body is a plain message.
    let message = body.as_str().expect("plain fault body");
    assert!(message.contains("invalid timestamp"));
}

#[tokio::test]
async fn update_mutates_in_place_and_preserves_owner() {
    let (db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (_, created) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(employee_id, "2026-01-10 08:00:00", "SHIFT_START")),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &router,
        "PUT",
        &format!("/api/time-entries/{id}"),
        Some(json!({
            "recorded_at": "2026-01-10 12:00:00",
            "kind": "LUNCH_START",
            "description": "lunch break",
            "location": "HQ",
            "employee_id": employee_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["kind"], "LUNCH_START");
    assert_eq!(body["data"]["recorded_at"], "2026-01-10 12:00:00");
    assert_eq!(body["data"]["employee_id"], employee_id);

    // Updated in place, not duplicated.
    assert_eq!(time_entry::Entity::find().count(&db).await.unwrap(), 1);
    let saved = time_entry::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.kind, time_entry::EntryKind::LunchStart);
    assert_eq!(saved.employee_id, employee_id);
}

#[tokio::test]
async fn update_of_unknown_id_is_rejected_without_writes() {
    let (db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (status, body) = call(
        &router,
        "PUT",
        "/api/time-entries/424242",
        Some(entry_payload(employee_id, "2026-01-10 12:00:00", "LUNCH_START")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = errors_of(&body);
    assert!(errors.iter().any(|err| err.contains("Time entry not found for id 424242")));
    assert_eq!(time_entry::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn listing_pages_by_employee() {
    let (_db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    for (recorded_at, kind) in [
        ("2026-01-10 08:00:00", "SHIFT_START"),
        ("2026-01-10 17:00:00", "SHIFT_END"),
    ] {
        let (status, _) = call(
            &router,
            "POST",
            "/api/time-entries",
            Some(entry_payload(employee_id, recorded_at, kind)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = call(
        &router,
        "GET",
        &format!("/api/time-entries/employee/{employee_id}?page=0"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_elements"], 2);
    assert_eq!(body["data"]["total_pages"], 1);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    // Default ordering is id descending.
    assert_eq!(body["data"]["items"][0]["kind"], "SHIFT_END");
}

#[tokio::test]
async fn listing_respects_sort_parameters() {
    let (_db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    for (recorded_at, kind) in [
        ("2026-01-10 17:00:00", "SHIFT_END"),
        ("2026-01-10 08:00:00", "SHIFT_START"),
    ] {
        call(
            &router,
            "POST",
            "/api/time-entries",
            Some(entry_payload(employee_id, recorded_at, kind)),
        )
        .await;
    }

    let (status, body) = call(
        &router,
        "GET",
        &format!("/api/time-entries/employee/{employee_id}?sort=recorded_at&dir=asc"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["kind"], "SHIFT_START");

    let (status, body) = call(
        &router,
        "GET",
        &format!("/api/time-entries/employee/{employee_id}?sort=bogus"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errors_of(&body).iter().any(|err| err.contains("Invalid sort field")));
}

#[tokio::test]
async fn delete_removes_the_entry_once() {
    let (db, router) = setup_app().await;
    let employee_id = support::seed_company_with_admin(&router).await;

    let (_, created) = call(
        &router,
        "POST",
        "/api/time-entries",
        Some(entry_payload(employee_id, "2026-01-10 08:00:00", "SHIFT_START")),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = call(&router, "DELETE", &format!("/api/time-entries/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
    assert!(errors_of(&body).is_empty());
    assert_eq!(time_entry::Entity::find().count(&db).await.unwrap(), 0);

    let (status, body) = call(&router, "DELETE", &format!("/api/time-entries/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!errors_of(&body).is_empty());
}
