//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("employee not found: {0}")]
  NotFound(String),

  #[error("employee already exists: {0}")]
  AlreadyExists(String),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// The hashing primitive could not be constructed or run. This is a
  /// deployment fault, never a caller mistake.
  #[error("credential hashing algorithm unavailable: {0}")]
  AlgorithmUnavailable(String),

  #[error("access denied")]
  AccessDenied,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// `true` for failures caused by the caller's input. These collapse to a
  /// plain `false`/`None` at the service boundary; everything else escalates.
  pub fn is_refusal(&self) -> bool {
    matches!(
      self,
      Self::NotFound(_)
        | Self::AlreadyExists(_)
        | Self::InvalidInput(_)
        | Self::AccessDenied
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
