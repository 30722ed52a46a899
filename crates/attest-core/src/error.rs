//! Error types for `attest-core`.

use thiserror::Error;

/// The specific constraint a candidate record violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
  #[error("aggregate signature is empty")]
  EmptySignature,
  #[error("interval size must be at least 1")]
  NonPositiveInterval,
  #[error("validator count is negative")]
  NegativeValidatorCount,
  #[error("slot number is negative")]
  NegativeSlot,
}

/// A record was rejected before it reached storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid attestation: {kind}")]
pub struct ValidationError {
  pub kind: ValidationErrorKind,
}

impl ValidationError {
  pub fn new(kind: ValidationErrorKind) -> Self { Self { kind } }
}

impl From<ValidationErrorKind> for ValidationError {
  fn from(kind: ValidationErrorKind) -> Self { Self::new(kind) }
}

/// Errors reported by an [`AttestationStore`](crate::store::AttestationStore).
///
/// None of these are fatal to the store; each is reported to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The signature is already recorded. Treat as "already stored", not as a
  /// reason to retry.
  #[error("aggregate signature already stored: {0}")]
  DuplicateSignature(String),

  #[error("invalid slot range: {from} > {to}")]
  InvalidRange { from: i64, to: i64 },

  /// The underlying medium could not be reached; the caller may retry.
  #[error("store unavailable: {0}")]
  Unavailable(String),

  /// Any other backend failure (e.g. a stored row that fails to decode).
  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
  /// Whether retrying the same call later may succeed.
  pub fn is_transient(&self) -> bool { matches!(self, Self::Unavailable(_)) }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
