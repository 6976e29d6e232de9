//! Handlers for `/employees` endpoints.
//!
//! All of these are administrative except `exists` and `update_details`,
//! which users may call too; a user may only update their own record, and
//! only its contact fields.

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{
  authz::{Operation, Role},
  employee::EmployeeDto,
  store::EmployeeStore,
};
use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::{AppState, auth::Caller, error::Error};

// ─── Exists ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExistsBody {
  pub exists: bool,
}

/// `GET /employees/{id}/exists`
pub async fn exists<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<ExistsBody>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::Exists)?;
  let exists = state.service.exists(&id).await?;
  Ok(Json(ExistsBody { exists }))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// `POST /employees`. Body: an [`EmployeeDto`] whose `password` is plaintext.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Json(body): Json<EmployeeDto>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::Add)?;
  let success = state.service.add(body).await?;
  Ok(Json(Outcome { success }))
}

// ─── Get details ──────────────────────────────────────────────────────────────

/// `GET /employees/{id}`. 404 if not found.
pub async fn get_details<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<EmployeeDto>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::GetDetails)?;
  let dto = state.service.get_details(&id).await?.ok_or(Error::NotFound)?;
  Ok(Json(dto))
}

// ─── Update details ───────────────────────────────────────────────────────────

/// `PUT /employees/{id}`. Body: an [`EmployeeDto`]. The path id wins over
/// the body's, and the body's `password` is ignored.
///
/// For a `user` caller, `app_group`, `active`, `salary` and
/// `bank_account_id` are copied from the stored record; the body's values for
/// those fields are dropped.
pub async fn update_details<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
  Json(mut body): Json<EmployeeDto>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::UpdateDetails)?;
  if !caller.may_act_on(&id) {
    return Err(Error::Forbidden);
  }
  if caller.role != Role::Admin {
    let Some(current) = state.service.get_details(&id).await? else {
      return Ok(Json(Outcome { success: false }));
    };
    body.app_group = current.app_group;
    body.active = current.active;
    body.salary = current.salary;
    body.bank_account_id = current.bank_account_id;
  }
  body.emp_id = id;
  let success = state.service.update_details(body).await?;
  Ok(Json(Outcome { success }))
}

// ─── Rotate credential ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RotateBody {
  pub new_password: String,
}

/// `PUT /employees/{id}/credential`. Body: `{"new_password":"..."}`
pub async fn rotate_credential<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
  Json(body): Json<RotateBody>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::RotateCredential)?;
  let success = state.service.rotate_credential(&id, &body.new_password).await?;
  Ok(Json(Outcome { success }))
}

// ─── Deactivate / purge ───────────────────────────────────────────────────────

/// `POST /employees/{id}/deactivate`
pub async fn deactivate<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::Deactivate)?;
  let success = state.service.deactivate(&id).await?;
  Ok(Json(Outcome { success }))
}

/// `POST /employees/{id}/purge`. Irreversible hard delete.
pub async fn purge<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::Purge)?;
  tracing::warn!(emp_id = %id, by = %caller.username, "purge requested");
  let success = state.service.purge(&id).await?;
  Ok(Json(Outcome { success }))
}
