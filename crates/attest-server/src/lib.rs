//! HTTP server wiring for the aggregate attestation store.
//!
//! Holds the runtime configuration and assembles the top-level router; the
//! binary in `main.rs` handles process concerns (CLI, logging, binding).

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use attest_core::AttestationStore;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Path value that selects an in-memory SQLite database.
pub const IN_MEMORY: &str = ":memory:";

/// Runtime server configuration, deserialised from `config.toml` and
/// `ATTEST_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from("attestations.db"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `None` when the store should live in memory.
  pub fn resolved_store_path(&self) -> Option<PathBuf> {
    if self.store_path.as_os_str() == IN_MEMORY {
      return None;
    }
    Some(expand_tilde(&self.store_path))
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the JSON API under `/api`, with request
/// tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: AttestationStore + 'static,
{
  Router::new()
    .nest("/api", attest_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
