//! [`InMemoryStore`]: a process-local [`EmployeeStore`].
//!
//! Used by tests and by embedders that do not need durability.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, PoisonError, RwLock},
};

use crate::{employee::EmployeeRecord, store::EmployeeStore};

/// A map of records behind a lock.
///
/// Cloning is cheap; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
  records: Arc<RwLock<HashMap<String, EmployeeRecord>>>,
}

impl InMemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of stored records, active or not.
  pub fn len(&self) -> usize {
    self.records.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Apply `f` to the record under a write lock; `false` if absent.
  fn modify(&self, emp_id: &str, f: impl FnOnce(&mut EmployeeRecord)) -> bool {
    let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
    match map.get_mut(emp_id) {
      Some(record) => {
        f(record);
        true
      }
      None => false,
    }
  }
}

impl EmployeeStore for InMemoryStore {
  type Error = Infallible;

  async fn contains(&self, emp_id: &str) -> Result<bool, Infallible> {
    let map = self.records.read().unwrap_or_else(PoisonError::into_inner);
    Ok(map.contains_key(emp_id))
  }

  async fn insert(&self, record: EmployeeRecord) -> Result<bool, Infallible> {
    let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
    if map.contains_key(&record.emp_id) {
      return Ok(false);
    }
    map.insert(record.emp_id.clone(), record);
    Ok(true)
  }

  async fn get(&self, emp_id: &str) -> Result<Option<EmployeeRecord>, Infallible> {
    let map = self.records.read().unwrap_or_else(PoisonError::into_inner);
    Ok(map.get(emp_id).cloned())
  }

  async fn update_details(&self, record: EmployeeRecord) -> Result<bool, Infallible> {
    let emp_id = record.emp_id.clone();
    Ok(self.modify(&emp_id, |stored| {
      let digest = std::mem::take(&mut stored.credential_digest);
      *stored = EmployeeRecord { credential_digest: digest, ..record };
    }))
  }

  async fn update_digest(&self, emp_id: &str, digest: String) -> Result<bool, Infallible> {
    Ok(self.modify(emp_id, |stored| stored.credential_digest = digest))
  }

  async fn deactivate(&self, emp_id: &str) -> Result<bool, Infallible> {
    Ok(self.modify(emp_id, |stored| stored.active = false))
  }

  async fn remove(&self, emp_id: &str) -> Result<bool, Infallible> {
    let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
    Ok(map.remove(emp_id).is_some())
  }
}
