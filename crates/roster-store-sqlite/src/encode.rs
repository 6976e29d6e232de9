//! Row mapping between [`EmployeeRecord`] and the `employees` table.
//!
//! Role tags are stored as their string form so unknown tags survive a round
//! trip; `active` uses SQLite's integer booleans.

use roster_core::employee::{EmployeeRecord, RoleGroup};

/// Column list shared by every `SELECT` so [`decode_row`] can index by
/// position.
pub const COLUMNS: &str = "emp_id, name, phone, address, email, credential_digest, \
                           app_group, bank_account_id, salary, active";

pub fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EmployeeRecord> {
  let app_group: String = row.get(6)?;
  Ok(EmployeeRecord {
    emp_id:            row.get(0)?,
    name:              row.get(1)?,
    phone:             row.get(2)?,
    address:           row.get(3)?,
    email:             row.get(4)?,
    credential_digest: row.get(5)?,
    role_group:        RoleGroup::from(app_group),
    bank_account_id:   row.get(7)?,
    salary:            row.get(8)?,
    active:            row.get(9)?,
  })
}

pub fn encode_role_group(group: &RoleGroup) -> String { group.as_str().to_owned() }
