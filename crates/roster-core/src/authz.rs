//! Role policy: which caller role may invoke which service operation.
//!
//! The service itself trusts its caller. Transports resolve the caller's
//! [`Role`] and consult an [`Authorizer`] before every call; [`RolePolicy`]
//! is the stock table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::{Error, Result};

/// The role an authenticated caller acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  User,
}

/// One variant per [`EmployeeAccessService`](crate::EmployeeAccessService)
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
  Exists,
  Add,
  UpdateDetails,
  RotateCredential,
  GetDetails,
  Deactivate,
  Purge,
  SelfVerify,
  SelfRotateCredential,
}

impl Operation {
  /// Roles the stock policy admits for this operation.
  pub fn allowed_roles(self) -> &'static [Role] {
    match self {
      Self::Exists | Self::UpdateDetails => &[Role::Admin, Role::User],
      Self::Add
      | Self::RotateCredential
      | Self::GetDetails
      | Self::Deactivate
      | Self::Purge => &[Role::Admin],
      Self::SelfVerify | Self::SelfRotateCredential => &[Role::User],
    }
  }
}

/// Decides whether `role` may perform `operation`.
pub trait Authorizer: Send + Sync {
  fn permit(&self, role: Role, operation: Operation) -> bool;
}

/// The default policy, driven by [`Operation::allowed_roles`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl Authorizer for RolePolicy {
  fn permit(&self, role: Role, operation: Operation) -> bool {
    operation.allowed_roles().contains(&role)
  }
}

/// Gate helper: `Err(AccessDenied)` when the authorizer refuses.
pub fn ensure<A>(authorizer: &A, role: Role, operation: Operation) -> Result<()>
where
  A: Authorizer + ?Sized,
{
  if authorizer.permit(role, operation) {
    Ok(())
  } else {
    tracing::debug!(%role, %operation, "operation denied by policy");
    Err(Error::AccessDenied)
  }
}
