//! One-way credential hashing.
//!
//! Plaintext secrets are turned into a stored digest exactly once, on the
//! write path, and every comparison goes through [`CredentialHasher::verify`].
//! Nothing in the workspace stores or compares plaintext directly.

use argon2::{
  Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _,
  PasswordVerifier as _, Version, password_hash::SaltString,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Turns a plaintext secret into its stored representation and checks a
/// candidate against a stored digest.
pub trait CredentialHasher: Send + Sync {
  /// Hash `plaintext`. Fails with [`Error::AlgorithmUnavailable`] rather than
  /// ever returning plaintext or an empty digest.
  fn hash(&self, plaintext: &str) -> Result<String>;

  /// `Ok(true)` iff `plaintext` hashes to `digest`. A digest this hasher
  /// cannot interpret is a mismatch, not an error.
  fn verify(&self, plaintext: &str, digest: &str) -> Result<bool>;
}

// ─── SHA-256 ─────────────────────────────────────────────────────────────────

/// Unsalted SHA-256, rendered as 64 lowercase hex characters.
///
/// Deterministic: the same plaintext always produces the same digest. That
/// makes digests comparable across deployments but offers no protection
/// against precomputed tables; prefer [`Argon2Hasher`] for new installs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl CredentialHasher for Sha256Hasher {
  fn hash(&self, plaintext: &str) -> Result<String> {
    Ok(hex::encode(Sha256::digest(plaintext.as_bytes())))
  }

  fn verify(&self, plaintext: &str, digest: &str) -> Result<bool> {
    Ok(self.hash(plaintext)? == digest)
  }
}

// ─── Argon2id ────────────────────────────────────────────────────────────────

/// Salted Argon2id producing PHC strings (`$argon2id$v=19$…`).
///
/// Every call to [`hash`](CredentialHasher::hash) draws a fresh salt, so two
/// hashes of the same plaintext differ; use `verify` to compare.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
  params: Params,
}

impl Argon2Hasher {
  /// Build a hasher with explicit cost parameters.
  pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
    let params = Params::new(memory_kib, iterations, parallelism, None)
      .map_err(|e| Error::AlgorithmUnavailable(e.to_string()))?;
    Ok(Self { params })
  }

  fn argon2(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }
}

impl Default for Argon2Hasher {
  fn default() -> Self { Self { params: Params::DEFAULT } }
}

impl CredentialHasher for Argon2Hasher {
  fn hash(&self, plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = self
      .argon2()
      .hash_password(plaintext.as_bytes(), &salt)
      .map_err(|e| Error::AlgorithmUnavailable(e.to_string()))?;
    Ok(hash.to_string())
  }

  fn verify(&self, plaintext: &str, digest: &str) -> Result<bool> {
    let Ok(parsed) = PasswordHash::new(digest) else {
      return Ok(false);
    };
    Ok(
      self
        .argon2()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok(),
    )
  }
}

// ─── Runtime selection ───────────────────────────────────────────────────────

/// Which hasher a deployment uses; read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
  #[default]
  Sha256,
  Argon2,
}

/// A hasher chosen at runtime from a [`HasherKind`].
///
/// The configured kind decides how new digests are written. Verification
/// follows the format of the stored digest instead, so records written under
/// the other kind keep authenticating after the setting changes.
#[derive(Debug, Clone)]
pub enum AnyHasher {
  Sha256(Sha256Hasher),
  Argon2(Argon2Hasher),
}

impl From<HasherKind> for AnyHasher {
  fn from(kind: HasherKind) -> Self {
    match kind {
      HasherKind::Sha256 => Self::Sha256(Sha256Hasher),
      HasherKind::Argon2 => Self::Argon2(Argon2Hasher::default()),
    }
  }
}

impl CredentialHasher for AnyHasher {
  fn hash(&self, plaintext: &str) -> Result<String> {
    match self {
      Self::Sha256(h) => h.hash(plaintext),
      Self::Argon2(h) => h.hash(plaintext),
    }
  }

  fn verify(&self, plaintext: &str, digest: &str) -> Result<bool> {
    match (self, DigestFormat::of(digest)) {
      (_, DigestFormat::Sha256) => Sha256Hasher.verify(plaintext, digest),
      (Self::Argon2(h), DigestFormat::Argon2) => h.verify(plaintext, digest),
      // Cost parameters are read back from the PHC string.
      (Self::Sha256(_), DigestFormat::Argon2) => {
        Argon2Hasher::default().verify(plaintext, digest)
      }
      (_, DigestFormat::Unknown) => Ok(false),
    }
  }
}

/// The scheme a stored digest was written in, judged by its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigestFormat {
  Sha256,
  Argon2,
  Unknown,
}

impl DigestFormat {
  fn of(digest: &str) -> Self {
    if digest.starts_with("$argon2") {
      Self::Argon2
    } else if digest.len() == 64
      && digest.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
      Self::Sha256
    } else {
      Self::Unknown
    }
  }
}
