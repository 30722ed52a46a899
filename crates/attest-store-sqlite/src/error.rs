//! Error type for `attest-store-sqlite`.

use attest_core::StoreError;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The file was written by a newer schema than this build understands.
  #[error("unsupported schema version {found} (expected at most {supported})")]
  UnsupportedSchema { found: i64, supported: i64 },
}

impl Error {
  /// Whether the failure is the medium being unreachable rather than a bug or
  /// corrupt data.
  pub fn is_unavailable(&self) -> bool {
    match self {
      Error::Database(tokio_rusqlite::Error::ConnectionClosed) => true,
      Error::Database(tokio_rusqlite::Error::Close(_)) => true,
      Error::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        failure,
        _,
      ))) => matches!(
        failure.code,
        ErrorCode::DatabaseBusy
          | ErrorCode::DatabaseLocked
          | ErrorCode::CannotOpen
          | ErrorCode::SystemIoFailure
          | ErrorCode::DiskFull
          | ErrorCode::ReadOnly
      ),
      _ => false,
    }
  }
}

impl From<Error> for StoreError {
  fn from(e: Error) -> Self {
    if e.is_unavailable() {
      tracing::error!(error = %e, "sqlite store unavailable");
      StoreError::Unavailable(e.to_string())
    } else {
      StoreError::Backend(Box::new(e))
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
