//! JSON REST API for the aggregate attestation store.
//!
//! Exposes an axum [`Router`] backed by any [`AttestationStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", attest_api::api_router(store.clone()))
//! ```

pub mod attestations;
pub mod error;
pub mod extract;
pub mod health;

use std::sync::Arc;

use attest_core::AttestationStore;
use axum::{Router, routing::get};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AttestationStore + 'static,
{
  Router::new()
    .route(
      "/aggregate_interval_attestations",
      get(attestations::list::<S>).post(attestations::create::<S>),
    )
    .route(
      "/aggregate_interval_attestations/{signature}",
      get(attestations::get_one::<S>),
    )
    .route("/health", get(health::handler::<S>))
    .with_state(store)
}
