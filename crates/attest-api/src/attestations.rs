//! Handlers for `/aggregate_interval_attestations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/aggregate_interval_attestations` | Optional `?slot`, `?from_slot&to_slot`, or `?slot&interval_size&value` |
//! | `GET`  | `/aggregate_interval_attestations/{signature}` | 404 if not found |
//! | `POST` | `/aggregate_interval_attestations` | Body: [`AggregateIntervalAttestation`]; returns 201 |
//!
//! Malformed query strings and bodies are 400 with a JSON `error` body.

use std::sync::Arc;

use attest_core::{AggregateIntervalAttestation, AttestationStore};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Exact slot match.
  pub slot:          Option<i64>,
  /// Inclusive lower bound; requires `to_slot`.
  pub from_slot:     Option<i64>,
  /// Inclusive upper bound; requires `from_slot`.
  pub to_slot:       Option<i64>,
  /// With `slot` and `value`: look up the aggregate for that triple.
  pub interval_size: Option<i64>,
  /// With `slot` and `interval_size`.
  pub value:         Option<i64>,
}

/// Which store read a [`ListParams`] selects.
#[derive(Debug, PartialEq, Eq)]
enum Selection {
  All,
  Slot(i64),
  Range(i64, i64),
  Aggregate { slot: i64, interval_size: i64, value: i64 },
}

impl ListParams {
  fn selection(&self) -> Result<Selection, ApiError> {
    let range = (self.from_slot, self.to_slot);
    let triple = (self.interval_size, self.value);
    match (self.slot, range, triple) {
      (None, (None, None), (None, None)) => Ok(Selection::All),
      (Some(slot), (None, None), (None, None)) => Ok(Selection::Slot(slot)),
      (Some(slot), (None, None), (Some(interval_size), Some(value))) => {
        Ok(Selection::Aggregate { slot, interval_size, value })
      }
      (None, (Some(from), Some(to)), (None, None)) => Ok(Selection::Range(from, to)),
      (_, _, (Some(_), _) | (_, Some(_))) => Err(ApiError::BadRequest(
        "`interval_size` and `value` require `slot` and must be given together".into(),
      )),
      (Some(_), _, _) => Err(ApiError::BadRequest(
        "`slot` cannot be combined with `from_slot`/`to_slot`".into(),
      )),
      _ => Err(ApiError::BadRequest(
        "`from_slot` and `to_slot` must be given together".into(),
      )),
    }
  }
}

/// `GET /aggregate_interval_attestations[?slot=N | ?from_slot=A&to_slot=B | ?slot=N&interval_size=I&value=V]`
///
/// The triple form returns at most one record.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<AggregateIntervalAttestation>>, ApiError>
where
  S: AttestationStore,
{
  let records = match params.selection()? {
    Selection::All => store.list_all().await?,
    Selection::Slot(slot) => store.list_by_slot(slot).await?,
    Selection::Range(from, to) => store.list_by_slot_range(from, to).await?,
    Selection::Aggregate { slot, interval_size, value } => store
      .find_aggregate(slot, interval_size, value)
      .await?
      .into_iter()
      .collect(),
  };
  tracing::debug!(count = records.len(), ?params, "listed aggregates");
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /aggregate_interval_attestations/{signature}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(signature): Path<String>,
) -> Result<Json<AggregateIntervalAttestation>, ApiError>
where
  S: AttestationStore,
{
  let record = store
    .get_by_signature(&signature)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("aggregate {signature} not found")))?;
  Ok(Json(record))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /aggregate_interval_attestations` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(record): ApiJson<AggregateIntervalAttestation>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AttestationStore,
{
  if record.is_degenerate() {
    tracing::warn!(
      signature = %record.aggregate_signature,
      slot = record.slot_number,
      "storing degenerate aggregate with zero validators"
    );
  }

  store.insert(record.clone()).await?;
  tracing::info!(
    signature = %record.aggregate_signature,
    slot = record.slot_number,
    interval_size = record.interval_size,
    num_validators = record.num_validators,
    "recorded aggregate"
  );
  Ok((StatusCode::CREATED, Json(record)))
}
