//! HTTP Basic-auth extractor resolving the caller's [`Role`].
//!
//! Operator accounts come from configuration; each carries an argon2 PHC
//! string and the role its requests act in.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use roster_core::{
  authz::Role,
  hasher::{Argon2Hasher, CredentialHasher as _},
  store::EmployeeStore,
};
use serde::Deserialize;

use crate::{AppState, error::Error};

/// One configured caller identity.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
  /// For `user` accounts this is also the employee id they may act on.
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub role:          Role,
}

/// Accounts accepted by this server instance.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  pub accounts: Vec<AccountConfig>,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
  pub username: String,
  pub role:     Role,
}

impl Caller {
  /// Admins act on any record; users only on the one matching their
  /// username.
  pub fn may_act_on(&self, emp_id: &str) -> bool {
    self.role == Role::Admin || self.username == emp_id
  }
}

/// Verify credentials directly from headers.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Caller, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let account = config
    .accounts
    .iter()
    .find(|a| a.username == username)
    .ok_or(Error::Unauthorized)?;

  // The PHC string carries its own cost parameters; a malformed one fails
  // closed inside `verify`.
  if !Argon2Hasher::default().verify(password, &account.password_hash)? {
    return Err(Error::Unauthorized);
  }

  Ok(Caller { username: account.username.clone(), role: account.role })
}

impl<S> FromRequestParts<AppState<S>> for Caller
where
  S: EmployeeStore + Clone + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let caller = verify_auth(&parts.headers, &state.auth)?;
    tracing::debug!(username = %caller.username, role = %caller.role, "authenticated");
    Ok(caller)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::header;

  fn config(password: &str) -> AuthConfig {
    let hasher = Argon2Hasher::new(8 * 1024, 1, 1).unwrap();
    AuthConfig {
      accounts: vec![
        AccountConfig {
          username:      "hr".into(),
          password_hash: hasher.hash(password).unwrap(),
          role:          Role::Admin,
        },
        AccountConfig {
          username:      "E1".into(),
          password_hash: "not-a-phc-string".into(),
          role:          Role::User,
        },
      ],
    }
  }

  fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, value.parse().unwrap());
    headers
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[test]
  fn correct_credentials_resolve_role() {
    let caller = verify_auth(&headers(&basic("hr", "secret")), &config("secret")).unwrap();
    assert_eq!(caller, Caller { username: "hr".into(), role: Role::Admin });
  }

  #[test]
  fn wrong_password() {
    let result = verify_auth(&headers(&basic("hr", "wrong")), &config("secret"));
    assert!(matches!(result, Err(Error::Unauthorized)));
  }

  #[test]
  fn unknown_user() {
    let result = verify_auth(&headers(&basic("nobody", "secret")), &config("secret"));
    assert!(matches!(result, Err(Error::Unauthorized)));
  }

  #[test]
  fn malformed_stored_hash_fails_closed() {
    let result = verify_auth(&headers(&basic("E1", "not-a-phc-string")), &config("secret"));
    assert!(matches!(result, Err(Error::Unauthorized)));
  }

  #[test]
  fn users_act_only_on_their_own_record() {
    let user = Caller { username: "E1".into(), role: Role::User };
    assert!(user.may_act_on("E1"));
    assert!(!user.may_act_on("E2"));

    let admin = Caller { username: "hr".into(), role: Role::Admin };
    assert!(admin.may_act_on("E2"));
  }

  #[test]
  fn missing_header() {
    let result = verify_auth(&HeaderMap::new(), &config("secret"));
    assert!(matches!(result, Err(Error::Unauthorized)));
  }

  #[test]
  fn invalid_base64() {
    let result = verify_auth(&headers("Basic !!!not-base64!!!"), &config("secret"));
    assert!(matches!(result, Err(Error::Unauthorized)));
  }
}
