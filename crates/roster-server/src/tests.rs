//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use roster_core::{
  EmployeeAccessService,
  authz::{Role, RolePolicy},
  hasher::{AnyHasher, Argon2Hasher, CredentialHasher as _, HasherKind, Sha256Hasher},
  memory::InMemoryStore,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

fn account(username: &str, password: &str, role: Role) -> AccountConfig {
  let hasher = Argon2Hasher::new(8 * 1024, 1, 1).unwrap();
  AccountConfig {
    username: username.into(),
    password_hash: hasher.hash(password).unwrap(),
    role,
  }
}

fn make_state() -> AppState<InMemoryStore> {
  let service =
    EmployeeAccessService::new(InMemoryStore::new(), AnyHasher::from(HasherKind::Sha256));
  AppState {
    service:    Arc::new(service),
    authorizer: Arc::new(RolePolicy),
    auth:       Arc::new(AuthConfig {
      accounts: vec![
        account("hr", "hr-secret", Role::Admin),
        account("E1", "e1-secret", Role::User),
      ],
    }),
  }
}

fn auth_header(user: &str, pass: &str) -> String {
  format!("Basic {}", B64.encode(format!("{user}:{pass}")))
}

async fn call(
  state: AppState<InMemoryStore>,
  method: &str,
  uri: &str,
  creds: Option<(&str, &str)>,
  body: Option<Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some((user, pass)) = creds {
    builder = builder.header(header::AUTHORIZATION, auth_header(user, pass));
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  router(state).oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn new_employee(emp_id: &str, password: &str) -> Value {
  json!({
    "emp_id": emp_id,
    "name": "Katherine Johnson",
    "phone": "555-0111",
    "address": "Langley",
    "email": "kj@example.com",
    "password": password,
    "app_group": "ED-APP-USERS",
    "bank_account_id": "ACC-9",
    "salary": 95000.0,
    "active": true
  })
}

const HR: Option<(&str, &str)> = Some(("hr", "hr-secret"));
const E1: Option<(&str, &str)> = Some(("E1", "e1-secret"));

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_credentials_are_401() {
  let resp = call(make_state(), "GET", "/employees/E1/exists", None, None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn wrong_account_password_is_401() {
  let resp = call(make_state(), "GET", "/employees/E1/exists", Some(("hr", "nope")), None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ─── Policy ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_cannot_call_admin_operations() {
  let state = make_state();
  let resp = call(state.clone(), "POST", "/employees", E1, Some(new_employee("E2", "pw"))).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let resp = call(state.clone(), "GET", "/employees/E1", E1, None).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let resp = call(state, "POST", "/employees/E1/purge", E1, None).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_self_verify() {
  let resp = call(
    make_state(),
    "POST",
    "/self/E1/verify",
    HR,
    Some(json!({ "password": "abc123" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_cannot_update_someone_else() {
  let state = make_state();
  call(state.clone(), "POST", "/employees", HR, Some(new_employee("E2", "pw"))).await;

  let resp = call(state, "PUT", "/employees/E2", E1, Some(new_employee("E2", "pw"))).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_updates_only_contact_fields() {
  let state = make_state();
  call(state.clone(), "POST", "/employees", HR, Some(new_employee("E1", "abc123"))).await;
  call(state.clone(), "POST", "/employees/E1/deactivate", HR, None).await;

  let mut body = new_employee("E1", "ignored");
  body["address"] = json!("Hampton");
  body["active"] = json!(true);
  body["salary"] = json!(1_000_000.0);
  body["app_group"] = json!("ED-APP-ADMIN");
  body["bank_account_id"] = json!("ACC-666");
  let resp = call(state.clone(), "PUT", "/employees/E1", E1, Some(body)).await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let details = json_body(call(state.clone(), "GET", "/employees/E1", HR, None).await).await;
  assert_eq!(details["address"], "Hampton");
  assert_eq!(details["active"], false);
  assert_eq!(details["salary"], 95000.0);
  assert_eq!(details["app_group"], "ED-APP-USERS");
  assert_eq!(details["bank_account_id"], "ACC-9");

  // Admins may still change every field.
  let mut body = new_employee("E1", "ignored");
  body["salary"] = json!(99000.0);
  body["active"] = json!(true);
  let resp = call(state.clone(), "PUT", "/employees/E1", HR, Some(body)).await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let details = json_body(call(state, "GET", "/employees/E1", HR, None).await).await;
  assert_eq!(details["salary"], 99000.0);
  assert_eq!(details["active"], true);
}

#[tokio::test]
async fn user_update_of_missing_own_record_reports_false() {
  let resp = call(make_state(), "PUT", "/employees/E1", E1, Some(new_employee("E1", "x"))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({ "success": false }));
}

// ─── Admin flow ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_lifecycle() {
  let state = make_state();

  let resp = call(state.clone(), "POST", "/employees", HR, Some(new_employee("E1", "hunter2"))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(state.clone(), "POST", "/employees", HR, Some(new_employee("E1", "again"))).await;
  assert_eq!(json_body(resp).await, json!({ "success": false }));

  let resp = call(state.clone(), "GET", "/employees/E1", HR, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let details = json_body(resp).await;
  assert_eq!(details["password"], Sha256Hasher.hash("hunter2").unwrap());

  let resp = call(
    state.clone(),
    "PUT",
    "/employees/E1/credential",
    HR,
    Some(json!({ "new_password": "newpass" })),
  )
  .await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(state.clone(), "GET", "/employees/E1", HR, None).await;
  assert_eq!(json_body(resp).await["password"], Sha256Hasher.hash("newpass").unwrap());

  let resp = call(state.clone(), "POST", "/employees/E1/deactivate", HR, None).await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(state.clone(), "POST", "/employees/E1/purge", HR, None).await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(state.clone(), "GET", "/employees/E1/exists", HR, None).await;
  assert_eq!(json_body(resp).await, json!({ "exists": false }));

  let resp = call(state, "GET", "/employees/E1", HR, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Self-service flow ───────────────────────────────────────────────────────

#[tokio::test]
async fn self_service_flow() {
  let state = make_state();
  call(state.clone(), "POST", "/employees", HR, Some(new_employee("E1", "abc123"))).await;

  let resp = call(state.clone(), "GET", "/employees/E1/exists", E1, None).await;
  assert_eq!(json_body(resp).await, json!({ "exists": true }));

  let resp = call(
    state.clone(),
    "POST",
    "/self/E1/verify",
    E1,
    Some(json!({ "password": "abc123" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["emp_id"], "E1");

  let resp = call(
    state.clone(),
    "POST",
    "/self/E1/verify",
    E1,
    Some(json!({ "password": "wrong" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = call(
    state.clone(),
    "PUT",
    "/self/E1/credential",
    E1,
    Some(json!({ "current_password": "abc123", "new_password": "fresh" })),
  )
  .await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(
    state.clone(),
    "PUT",
    "/employees/E1",
    E1,
    Some(new_employee("ignored", "also-ignored")),
  )
  .await;
  assert_eq!(json_body(resp).await, json!({ "success": true }));

  let resp = call(
    state,
    "POST",
    "/self/E1/verify",
    E1,
    Some(json!({ "password": "fresh" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn self_verify_of_unknown_record_looks_like_wrong_password() {
  let state = make_state();
  let resp = call(
    state,
    "POST",
    "/self/E1/verify",
    E1,
    Some(json!({ "password": "anything" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(resp).await, json!({ "error": "not found" }));
}
