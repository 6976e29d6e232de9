//! JSON-over-HTTP adapter for Roster.
//!
//! Exposes an axum [`Router`] over an [`EmployeeAccessService`]. Every route
//! authenticates the caller, consults the configured [`Authorizer`] for the
//! operation it maps to, and only then calls into the service.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | `GET`  | `/employees/{id}/exists` | `exists` |
//! | `POST` | `/employees` | `add` |
//! | `GET`  | `/employees/{id}` | `get_details` |
//! | `PUT`  | `/employees/{id}` | `update_details` |
//! | `PUT`  | `/employees/{id}/credential` | `rotate_credential` |
//! | `POST` | `/employees/{id}/deactivate` | `deactivate` |
//! | `POST` | `/employees/{id}/purge` | `purge` |
//! | `POST` | `/self/{id}/verify` | `self_verify` |
//! | `PUT`  | `/self/{id}/credential` | `self_rotate_credential` |

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use roster_core::{
  EmployeeAccessService,
  authz::{self, Authorizer, Operation},
  hasher::{AnyHasher, HasherKind},
  store::EmployeeStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AccountConfig, AuthConfig, Caller};
use handlers::{employees, self_service};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Digest scheme for employee credentials.
  #[serde(default)]
  pub hasher:     HasherKind,
  #[serde(default)]
  pub accounts:   Vec<AccountConfig>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: EmployeeStore> {
  pub service:    Arc<EmployeeAccessService<S, AnyHasher>>,
  pub authorizer: Arc<dyn Authorizer>,
  pub auth:       Arc<AuthConfig>,
}

impl<S: EmployeeStore> AppState<S> {
  /// Refuse the request unless `caller`'s role may perform `operation`.
  pub fn gate(&self, caller: &Caller, operation: Operation) -> Result<(), Error> {
    authz::ensure(self.authorizer.as_ref(), caller.role, operation)
      .map_err(|_| Error::Forbidden)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the employee API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: EmployeeStore + Clone + 'static,
{
  Router::new()
    .route("/employees", post(employees::add::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_details::<S>).put(employees::update_details::<S>),
    )
    .route("/employees/{id}/exists", get(employees::exists::<S>))
    .route("/employees/{id}/credential", put(employees::rotate_credential::<S>))
    .route("/employees/{id}/deactivate", post(employees::deactivate::<S>))
    .route("/employees/{id}/purge", post(employees::purge::<S>))
    .route("/self/{id}/verify", post(self_service::verify::<S>))
    .route("/self/{id}/credential", put(self_service::rotate_credential::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests;
