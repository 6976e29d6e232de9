//! Handlers for `/self` endpoints. A user account may only name its own id.
//!
//! `verify` answers 404 for an unknown id, a wrong password and a non-user
//! record alike.

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{authz::Operation, employee::EmployeeDto, store::EmployeeStore};
use serde::Deserialize;

use super::Outcome;
use crate::{AppState, auth::Caller, error::Error};

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
  pub password: String,
}

/// `POST /self/{id}/verify`. Body: `{"password":"..."}`
pub async fn verify<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
  Json(body): Json<VerifyBody>,
) -> Result<Json<EmployeeDto>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::SelfVerify)?;
  if !caller.may_act_on(&id) {
    return Err(Error::Forbidden);
  }
  let dto = state
    .service
    .self_verify(&id, &body.password)
    .await?
    .ok_or(Error::NotFound)?;
  Ok(Json(dto))
}

#[derive(Debug, Deserialize)]
pub struct SelfRotateBody {
  pub current_password: String,
  pub new_password:     String,
}

/// `PUT /self/{id}/credential`. Body:
/// `{"current_password":"...","new_password":"..."}`
pub async fn rotate_credential<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  Path(id): Path<String>,
  Json(body): Json<SelfRotateBody>,
) -> Result<Json<Outcome>, Error>
where
  S: EmployeeStore + Clone + 'static,
{
  state.gate(&caller, Operation::SelfRotateCredential)?;
  if !caller.may_act_on(&id) {
    return Err(Error::Forbidden);
  }
  let success = state
    .service
    .self_rotate_credential(&id, &body.current_password, &body.new_password)
    .await?;
  Ok(Json(Outcome { success }))
}
