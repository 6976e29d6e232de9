//! [`SqliteStore`]: the SQLite implementation of [`EmployeeStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{employee::EmployeeRecord, store::EmployeeStore};

use crate::{
  Error, Result,
  encode::{COLUMNS, decode_row, encode_role_group},
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An employee store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every trait
/// method issues one statement, so each is atomic for the record it touches.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?))
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema { found, supported: SCHEMA_VERSION });
    }

    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!(version = SCHEMA_VERSION, "employee schema ready");
    Ok(())
  }

  /// Run a single-row `UPDATE`/`DELETE` and report whether a row matched.
  async fn execute_one<F>(&self, statement: F) -> Result<bool>
  where
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<usize> + Send + 'static,
  {
    let changed = self.conn.call(move |conn| Ok(statement(conn)?)).await?;
    Ok(changed == 1)
  }
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn contains(&self, emp_id: &str) -> Result<bool> {
    let id = emp_id.to_owned();
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM employees WHERE emp_id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn insert(&self, record: EmployeeRecord) -> Result<bool> {
    let app_group = encode_role_group(&record.role_group);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO employees (
             emp_id, name, phone, address, email, credential_digest,
             app_group, bank_account_id, salary, active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
           ON CONFLICT (emp_id) DO NOTHING",
          rusqlite::params![
            record.emp_id,
            record.name,
            record.phone,
            record.address,
            record.email,
            record.credential_digest,
            app_group,
            record.bank_account_id,
            record.salary,
            record.active,
          ],
        )?)
      })
      .await?;
    Ok(changed == 1)
  }

  async fn get(&self, emp_id: &str) -> Result<Option<EmployeeRecord>> {
    let id = emp_id.to_owned();
    let record = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE emp_id = ?1");
        Ok(conn.query_row(&sql, rusqlite::params![id], decode_row).optional()?)
      })
      .await?;
    Ok(record)
  }

  async fn update_details(&self, record: EmployeeRecord) -> Result<bool> {
    let app_group = encode_role_group(&record.role_group);

    // `credential_digest` is intentionally absent from the SET list.
    self
      .execute_one(move |conn| {
        conn.execute(
          "UPDATE employees
              SET name = ?2, phone = ?3, address = ?4, email = ?5,
                  app_group = ?6, bank_account_id = ?7, salary = ?8, active = ?9
            WHERE emp_id = ?1",
          rusqlite::params![
            record.emp_id,
            record.name,
            record.phone,
            record.address,
            record.email,
            app_group,
            record.bank_account_id,
            record.salary,
            record.active,
          ],
        )
      })
      .await
  }

  async fn update_digest(&self, emp_id: &str, digest: String) -> Result<bool> {
    let id = emp_id.to_owned();
    self
      .execute_one(move |conn| {
        conn.execute(
          "UPDATE employees SET credential_digest = ?2 WHERE emp_id = ?1",
          rusqlite::params![id, digest],
        )
      })
      .await
  }

  async fn deactivate(&self, emp_id: &str) -> Result<bool> {
    let id = emp_id.to_owned();
    self
      .execute_one(move |conn| {
        conn.execute("UPDATE employees SET active = 0 WHERE emp_id = ?1", rusqlite::params![id])
      })
      .await
  }

  async fn remove(&self, emp_id: &str) -> Result<bool> {
    let id = emp_id.to_owned();
    self
      .execute_one(move |conn| {
        conn.execute("DELETE FROM employees WHERE emp_id = ?1", rusqlite::params![id])
      })
      .await
  }
}
