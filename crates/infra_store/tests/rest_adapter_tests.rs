//! Tests for the REST claims adapter against a fake table API
//!
//! The fake server implements just enough of the PostgREST dialect to
//! exercise select, insert, delete, and the readiness check.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use core_kernel::{AdapterHealth, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimTimestamp, ClaimsPort, Field};
use infra_store::{RestClaimsAdapter, StoreConfig};

const API_KEY: &str = "service-role-test-key";

// ============================================================================
// Fake table API
// ============================================================================

#[derive(Clone, Default)]
struct FakeTable {
    rows: Arc<Mutex<Vec<Value>>>,
    received_inserts: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u64>>,
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", API_KEY);
    if apikey == Some(API_KEY) && bearer == Some(expected_bearer.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid API key", "hint": "Double check your Supabase `anon` or `service_role` API key."})),
        )
            .into_response())
    }
}

fn wants_representation(headers: &HeaderMap) -> bool {
    headers.get("prefer").and_then(|v| v.to_str().ok()) == Some("return=representation")
}

async fn select_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let rows = table.rows.lock().unwrap().clone();
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    Json(rows.into_iter().take(limit).collect::<Vec<_>>()).into_response()
}

async fn insert_row(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    table.received_inserts.lock().unwrap().push(body.clone());

    let mut rows = table.rows.lock().unwrap();
    let number = body.get("claim_number").cloned();
    if number.is_some() && rows.iter().any(|r| r.get("claim_number") == number.as_ref()) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "details": "Key (claim_number) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"claims_claim_number_key\""
            })),
        )
            .into_response();
    }

    let mut id = table.next_id.lock().unwrap();
    *id += 1;
    let mut row = json!({"id": *id, "claim_number": null, "claim_status": null});
    if let (Some(row), Some(fields)) = (row.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            row.insert(k.clone(), v.clone());
        }
    }
    rows.push(row.clone());

    if wants_representation(&headers) {
        (StatusCode::CREATED, Json(vec![row])).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn delete_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let Some(wanted) = params.get("claim_number").and_then(|f| f.strip_prefix("eq.")) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "DELETE requires a WHERE clause"})))
            .into_response();
    };

    let mut rows = table.rows.lock().unwrap();
    let (deleted, kept): (Vec<Value>, Vec<Value>) = rows
        .drain(..)
        .partition(|r| r.get("claim_number").and_then(Value::as_str) == Some(wanted));
    *rows = kept;

    if wants_representation(&headers) {
        Json(deleted).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn spawn_fake_table() -> (String, FakeTable) {
    let table = FakeTable::default();
    let app = Router::new()
        .route(
            "/rest/v1/claims",
            get(select_rows).post(insert_row).delete(delete_rows),
        )
        .with_state(table.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), table)
}

async fn adapter() -> (RestClaimsAdapter, FakeTable) {
    let (endpoint, table) = spawn_fake_table().await;
    let adapter = RestClaimsAdapter::new(&StoreConfig::new(endpoint, API_KEY, "claims")).unwrap();
    (adapter, table)
}

fn claim(number: &str) -> Claim {
    Claim {
        claim_number: Field::Present(number.to_string()),
        policy_number: Field::Present("P-55".to_string()),
        vehicle_year: Field::Present(2020),
        ..Default::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_list_empty_table() {
    let (adapter, _) = adapter().await;
    let claims = adapter.list_claims().await.unwrap();
    assert!(claims.is_empty());
}

#[tokio::test]
async fn test_insert_echoes_row_and_sends_only_supplied_fields() {
    let (adapter, table) = adapter().await;

    let rows = adapter.insert_claim(&claim("C-1001")).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].claim_number(), Some("C-1001"));
    assert_eq!(rows[0].vehicle_year, Field::Present(2020));
    assert_eq!(rows[0].claim_status, Field::Null);

    let sent = table.received_inserts.lock().unwrap();
    assert_eq!(
        sent[0],
        json!({"claim_number": "C-1001", "policy_number": "P-55", "vehicle_year": 2020})
    );
}

#[tokio::test]
async fn test_insert_then_list_preserves_timestamps() {
    let (adapter, _) = adapter().await;
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let mut new_claim = claim("C-2002");
    new_claim.created_timestamp = Field::Present(ClaimTimestamp::from(created));

    adapter.insert_claim(&new_claim).await.unwrap();
    let listed = adapter.list_claims().await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].created_timestamp,
        Field::Present(ClaimTimestamp::from(created))
    );
}

#[tokio::test]
async fn test_duplicate_insert_is_conflict() {
    let (adapter, _) = adapter().await;
    adapter.insert_claim(&claim("C-1001")).await.unwrap();

    let err = adapter.insert_claim(&claim("C-1001")).await.unwrap_err();

    assert!(matches!(err, PortError::Conflict { .. }));
    assert!(err.is_rejection());
}

#[tokio::test]
async fn test_delete_returns_deleted_rows() {
    let (adapter, _) = adapter().await;
    adapter.insert_claim(&claim("C-1001")).await.unwrap();
    adapter.insert_claim(&claim("C-1002")).await.unwrap();

    let deleted = adapter.delete_claims("C-1001").await.unwrap();
    assert_eq!(deleted.len(), 1);

    let remaining = adapter.list_claims().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].claim_number(), Some("C-1002"));

    let again = adapter.delete_claims("C-1001").await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_delete_key_with_reserved_characters() {
    let (adapter, _) = adapter().await;
    adapter.insert_claim(&claim("C 1/2&x=y")).await.unwrap();

    let deleted = adapter.delete_claims("C 1/2&x=y").await.unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].claim_number(), Some("C 1/2&x=y"));
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() {
    let (endpoint, _) = spawn_fake_table().await;
    let adapter = RestClaimsAdapter::new(&StoreConfig::new(endpoint, "wrong", "claims")).unwrap();

    let err = adapter.list_claims().await.unwrap_err();

    assert!(matches!(err, PortError::Unauthorized { ref message } if message.contains("Invalid API key")));
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let (endpoint, _) = spawn_fake_table().await;
    let adapter = RestClaimsAdapter::new(&StoreConfig::new(endpoint, API_KEY, "policies")).unwrap();

    let err = adapter.list_claims().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_health_check_reports_reachable_table() {
    let (adapter, _) = adapter().await;

    let health = adapter.health_check().await;

    assert_eq!(health.status, AdapterHealth::Healthy);
    assert_eq!(health.adapter_id, "table:claims");
}

#[tokio::test]
async fn test_unreachable_store_is_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let adapter = RestClaimsAdapter::new(&StoreConfig::new(endpoint, API_KEY, "claims")).unwrap();

    let err = adapter.list_claims().await.unwrap_err();
    assert!(matches!(err, PortError::Connection { .. }));

    let health = adapter.health_check().await;
    assert_eq!(health.status, AdapterHealth::Unhealthy);
    assert!(health.message.is_some());
}
