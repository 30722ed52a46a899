//! Handler for `GET /health`.

use std::sync::Arc;

use attest_core::AttestationStore;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status: &'static str,
  pub count:  u64,
}

/// `GET /health` — 200 with the record count, or the store error (503 when
/// the medium is unavailable).
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Health>, ApiError>
where
  S: AttestationStore,
{
  let count = store.count().await?;
  Ok(Json(Health { status: "ok", count }))
}
