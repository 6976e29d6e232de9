//! Employee records and their transfer form.
//!
//! [`EmployeeRecord`] is what the store holds. [`EmployeeDto`] is the flat
//! projection handed across the crate boundary. Converting between the two is
//! a straight field copy; in particular the credential field is never hashed
//! on the way through. Hashing is the service's job and happens only on the
//! add and rotation paths.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Role tags ───────────────────────────────────────────────────────────────

/// Tag stored on an employee naming the application group they belong to.
///
/// Unknown tags read from a store are kept verbatim in [`RoleGroup::Other`]
/// so they round-trip, but a record carrying one can never authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleGroup {
  Admin,
  User,
  Other(String),
}

impl RoleGroup {
  pub const ADMIN_TAG: &'static str = "ED-APP-ADMIN";
  pub const USER_TAG: &'static str = "ED-APP-USERS";

  pub fn as_str(&self) -> &str {
    match self {
      Self::Admin => Self::ADMIN_TAG,
      Self::User => Self::USER_TAG,
      Self::Other(tag) => tag,
    }
  }

  pub fn is_recognized(&self) -> bool { !matches!(self, Self::Other(_)) }
}

impl From<&str> for RoleGroup {
  fn from(tag: &str) -> Self {
    match tag {
      Self::ADMIN_TAG => Self::Admin,
      Self::USER_TAG => Self::User,
      other => Self::Other(other.to_owned()),
    }
  }
}

impl From<String> for RoleGroup {
  fn from(tag: String) -> Self {
    match tag.as_str() {
      Self::ADMIN_TAG => Self::Admin,
      Self::USER_TAG => Self::User,
      _ => Self::Other(tag),
    }
  }
}

impl From<RoleGroup> for String {
  fn from(group: RoleGroup) -> Self {
    match group {
      RoleGroup::Other(tag) => tag,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for RoleGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// The durable employee entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
  /// Primary key. Non-empty and immutable once created.
  pub emp_id:            String,
  pub name:              String,
  pub phone:             String,
  pub address:           String,
  pub email:             String,
  /// Output of a [`CredentialHasher`](crate::hasher::CredentialHasher);
  /// never plaintext once the record exists.
  pub credential_digest: String,
  pub role_group:        RoleGroup,
  /// Opaque reference to the employee's bank account.
  pub bank_account_id:   String,
  pub salary:            f64,
  pub active:            bool,
}

// ─── Transfer form ───────────────────────────────────────────────────────────

/// Flat, serialisable projection of an [`EmployeeRecord`].
///
/// `password` holds plaintext only when the DTO is the input to
/// [`EmployeeAccessService::add`](crate::EmployeeAccessService::add). Every
/// DTO produced by this crate carries the stored digest there instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
  pub emp_id:          String,
  pub name:            String,
  pub phone:           String,
  pub address:         String,
  pub email:           String,
  pub password:        String,
  pub app_group:       RoleGroup,
  pub bank_account_id: String,
  pub salary:          f64,
  pub active:          bool,
}

impl From<EmployeeDto> for EmployeeRecord {
  fn from(dto: EmployeeDto) -> Self {
    Self {
      emp_id:            dto.emp_id,
      name:              dto.name,
      phone:             dto.phone,
      address:           dto.address,
      email:             dto.email,
      credential_digest: dto.password,
      role_group:        dto.app_group,
      bank_account_id:   dto.bank_account_id,
      salary:            dto.salary,
      active:            dto.active,
    }
  }
}

impl From<EmployeeRecord> for EmployeeDto {
  fn from(record: EmployeeRecord) -> Self {
    Self {
      emp_id:          record.emp_id,
      name:            record.name,
      phone:           record.phone,
      address:         record.address,
      email:           record.email,
      password:        record.credential_digest,
      app_group:       record.role_group,
      bank_account_id: record.bank_account_id,
      salary:          record.salary,
      active:          record.active,
    }
  }
}
