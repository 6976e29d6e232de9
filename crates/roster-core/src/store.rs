//! The `EmployeeStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`, or the
//! in-process [`InMemoryStore`](crate::memory::InMemoryStore)). The service
//! layer depends on this abstraction only. Each method is expected to be
//! atomic for the single record it touches; the service adds no locking of
//! its own on top.

use std::future::Future;

use crate::employee::EmployeeRecord;

/// Abstraction over a keyed employee repository.
///
/// Mutations report `Ok(false)` when the target id is absent (or, for
/// [`insert`](Self::insert), already present); `Err` is reserved for backend
/// failures.
pub trait EmployeeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether a record with `emp_id` exists, active or not.
  fn contains<'a>(
    &'a self,
    emp_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Persist a brand-new record. Returns `false` if the id is taken.
  fn insert(
    &self,
    record: EmployeeRecord,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    emp_id: &'a str,
  ) -> impl Future<Output = Result<Option<EmployeeRecord>, Self::Error>> + Send + 'a;

  /// Overwrite every field of the stored record except the credential
  /// digest, which must be left exactly as stored.
  fn update_details(
    &self,
    record: EmployeeRecord,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Replace only the credential digest.
  fn update_digest<'a>(
    &'a self,
    emp_id: &'a str,
    digest: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Soft delete: set `active = false`. Succeeds on an already inactive
  /// record.
  fn deactivate<'a>(
    &'a self,
    emp_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Hard delete. Irreversible.
  fn remove<'a>(
    &'a self,
    emp_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
