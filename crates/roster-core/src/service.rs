//! [`EmployeeAccessService`]: the role-scoped operations over a store.
//!
//! Callers are assumed to have passed an [`Authorizer`](crate::authz::Authorizer)
//! gate for the operation already. Each operation answers "did it work" as a
//! `bool` or an `Option`; caller-caused failures (missing id, duplicate id,
//! bad input, wrong credential) all fold into `false`/`None`. Only systemic
//! failures, a broken hashing primitive or a failing store, come back as
//! `Err`.

use tracing::{debug, error, info, warn};

use crate::{
  Error, Result,
  authz::Operation,
  employee::{EmployeeDto, EmployeeRecord, RoleGroup},
  hasher::{CredentialHasher, Sha256Hasher},
  store::EmployeeStore,
};

/// Orchestrates existence checks, conversion and credential handling over an
/// [`EmployeeStore`].
///
/// Holds no mutable state of its own; concurrent calls racing on the same id
/// are resolved by the store's per-record atomicity.
#[derive(Debug, Clone)]
pub struct EmployeeAccessService<S, H = Sha256Hasher> {
  store:  S,
  hasher: H,
}

impl<S: EmployeeStore> EmployeeAccessService<S> {
  /// A service using the default [`Sha256Hasher`].
  pub fn with_store(store: S) -> Self { Self::new(store, Sha256Hasher) }
}

impl<S, H> EmployeeAccessService<S, H>
where
  S: EmployeeStore,
  H: CredentialHasher,
{
  pub fn new(store: S, hasher: H) -> Self { Self { store, hasher } }

  pub fn store(&self) -> &S { &self.store }

  pub fn hasher(&self) -> &H { &self.hasher }

  // ── Shared ────────────────────────────────────────────────────────────────

  /// Whether an employee with `emp_id` is on record.
  pub async fn exists(&self, emp_id: &str) -> Result<bool> {
    self.store.contains(emp_id).await.map_err(Error::store)
  }

  /// Persist every non-credential field of `dto`. Whatever `dto.password`
  /// holds is ignored; the stored digest is never touched here.
  pub async fn update_details(&self, dto: EmployeeDto) -> Result<bool> {
    let emp_id = dto.emp_id.clone();
    settle(Operation::UpdateDetails, &emp_id, self.try_update_details(dto).await)
  }

  // ── Administration ────────────────────────────────────────────────────────

  /// Create a new employee. `dto.password` is plaintext on the way in and is
  /// replaced by its digest before anything is stored.
  pub async fn add(&self, dto: EmployeeDto) -> Result<bool> {
    let emp_id = dto.emp_id.clone();
    settle(Operation::Add, &emp_id, self.try_add(dto).await)
  }

  /// Hash `new_password` and overwrite the stored digest, whatever it was.
  pub async fn rotate_credential(&self, emp_id: &str, new_password: &str) -> Result<bool> {
    settle(
      Operation::RotateCredential,
      emp_id,
      self.store_new_digest(emp_id, new_password).await,
    )
  }

  /// The employee's transfer form. Its `password` field is the stored
  /// digest, not plaintext.
  pub async fn get_details(&self, emp_id: &str) -> Result<Option<EmployeeDto>> {
    let record = self.store.get(emp_id).await.map_err(Error::store)?;
    Ok(record.map(EmployeeDto::from))
  }

  /// Soft delete. Calling it again on an inactive employee still succeeds.
  pub async fn deactivate(&self, emp_id: &str) -> Result<bool> {
    let outcome = self.store.deactivate(emp_id).await.map_err(Error::store).and_then(|done| {
      if done { Ok(()) } else { Err(Error::NotFound(emp_id.to_owned())) }
    });
    settle(Operation::Deactivate, emp_id, outcome)
  }

  /// Physically remove the employee record. There is no undo; prefer
  /// [`deactivate`](Self::deactivate) outside of test and lab setups.
  pub async fn purge(&self, emp_id: &str) -> Result<bool> {
    let outcome = self.store.remove(emp_id).await.map_err(Error::store).and_then(|done| {
      if done { Ok(()) } else { Err(Error::NotFound(emp_id.to_owned())) }
    });
    if outcome.is_ok() {
      warn!(emp_id, "employee record purged");
    }
    settle(Operation::Purge, emp_id, outcome)
  }

  // ── Self service ──────────────────────────────────────────────────────────

  /// The caller's own transfer form, if `password` is right.
  ///
  /// Returns `None` when the id is unknown, when the record is not tagged
  /// [`RoleGroup::User`], or when the password does not match. The three
  /// causes are deliberately indistinguishable to the caller.
  pub async fn self_verify(&self, emp_id: &str, password: &str) -> Result<Option<EmployeeDto>> {
    match self.authenticate(emp_id, password, true).await {
      Ok(record) => Ok(Some(record.into())),
      Err(e) if e.is_refusal() => {
        debug!(emp_id, operation = %Operation::SelfVerify, "refused");
        Ok(None)
      }
      Err(e) => Err(escalate(Operation::SelfVerify, emp_id, e)),
    }
  }

  /// Replace the caller's own credential after checking `current_password`
  /// against the stored digest. Does nothing on a mismatch.
  pub async fn self_rotate_credential(
    &self,
    emp_id: &str,
    current_password: &str,
    new_password: &str,
  ) -> Result<bool> {
    let outcome = match self.authenticate(emp_id, current_password, false).await {
      Ok(_) => self.store_new_digest(emp_id, new_password).await,
      Err(e) => Err(e),
    };
    settle(Operation::SelfRotateCredential, emp_id, outcome)
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  async fn try_add(&self, dto: EmployeeDto) -> Result<()> {
    if dto.emp_id.is_empty() {
      return Err(Error::InvalidInput("employee id is empty".into()));
    }
    if dto.password.is_empty() {
      return Err(Error::InvalidInput("password is empty".into()));
    }
    check_salary(dto.salary)?;

    if self.exists(&dto.emp_id).await? {
      return Err(Error::AlreadyExists(dto.emp_id));
    }

    let mut record = EmployeeRecord::from(dto);
    record.credential_digest = self.hasher.hash(&record.credential_digest)?;

    let emp_id = record.emp_id.clone();
    if self.store.insert(record).await.map_err(Error::store)? {
      info!(emp_id, "employee added");
      Ok(())
    } else {
      // Lost a race with a concurrent add.
      Err(Error::AlreadyExists(emp_id))
    }
  }

  async fn try_update_details(&self, dto: EmployeeDto) -> Result<()> {
    if !self.exists(&dto.emp_id).await? {
      return Err(Error::NotFound(dto.emp_id));
    }
    check_salary(dto.salary)?;

    // The store keeps its own digest; blank the incoming one so it cannot leak
    // into a backend that forgets to.
    let record = EmployeeRecord { credential_digest: String::new(), ..EmployeeRecord::from(dto) };
    let emp_id = record.emp_id.clone();
    if self.store.update_details(record).await.map_err(Error::store)? {
      Ok(())
    } else {
      Err(Error::NotFound(emp_id))
    }
  }

  async fn store_new_digest(&self, emp_id: &str, new_password: &str) -> Result<()> {
    if new_password.is_empty() {
      return Err(Error::InvalidInput("password is empty".into()));
    }
    let digest = self.hasher.hash(new_password)?;
    if self.store.update_digest(emp_id, digest).await.map_err(Error::store)? {
      info!(emp_id, "credential rotated");
      Ok(())
    } else {
      Err(Error::NotFound(emp_id.to_owned()))
    }
  }

  /// Load the record and check `password` against it, failing closed.
  async fn authenticate(
    &self,
    emp_id: &str,
    password: &str,
    require_user_tag: bool,
  ) -> Result<EmployeeRecord> {
    let record = self
      .store
      .get(emp_id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::NotFound(emp_id.to_owned()))?;

    let tag_ok = if require_user_tag {
      record.role_group == RoleGroup::User
    } else {
      record.role_group.is_recognized()
    };
    if !tag_ok {
      return Err(Error::AccessDenied);
    }

    if self.hasher.verify(password, &record.credential_digest)? {
      Ok(record)
    } else {
      Err(Error::AccessDenied)
    }
  }
}

fn check_salary(salary: f64) -> Result<()> {
  if salary.is_finite() && salary >= 0.0 {
    Ok(())
  } else {
    Err(Error::InvalidInput(format!("salary must be a non-negative number, got {salary}")))
  }
}

/// Fold an internal outcome into the boolean the operation reports.
fn settle(operation: Operation, emp_id: &str, outcome: Result<()>) -> Result<bool> {
  match outcome {
    Ok(()) => Ok(true),
    Err(e) if e.is_refusal() => {
      debug!(emp_id, %operation, reason = %e, "refused");
      Ok(false)
    }
    Err(e) => Err(escalate(operation, emp_id, e)),
  }
}

fn escalate(operation: Operation, emp_id: &str, e: Error) -> Error {
  match &e {
    Error::AlgorithmUnavailable(_) => {
      error!(emp_id, %operation, error = %e, "credential hashing is unavailable")
    }
    _ => error!(emp_id, %operation, error = %e, "operation failed"),
  }
  e
}
