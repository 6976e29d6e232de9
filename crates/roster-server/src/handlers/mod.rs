//! HTTP handlers grouped by audience.

pub mod employees;
pub mod self_service;

use serde::Serialize;

/// Body returned by every operation that reports a plain success flag.
#[derive(Debug, Serialize)]
pub struct Outcome {
  pub success: bool,
}
