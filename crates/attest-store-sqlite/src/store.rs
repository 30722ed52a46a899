//! [`SqliteStore`] — the SQLite implementation of [`AttestationStore`].

use std::path::Path;

use attest_core::{
  AggregateIntervalAttestation, AttestationStore, StoreError,
  store::check_range, validate,
};
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Error, Result,
  encode::{COLUMNS, decode_row},
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attestation store backed by a single SQLite file.
///
/// All statements run on one dedicated connection thread, so each insert is
/// serialized against every other call and the PRIMARY KEY constraint is the
/// uniqueness check. Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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
    Ok(())
  }

  /// Insert a row. Returns `false` if the signature was already present.
  async fn insert_row(&self, record: AggregateIntervalAttestation) -> Result<bool> {
    let inserted = self
      .conn
      .call(move |conn| {
        let outcome = conn.execute(
          "INSERT INTO aggregate_interval_attestations (
             aggregate_signature, slot_number, value, interval_size, num_validators
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            record.aggregate_signature,
            record.slot_number,
            record.value,
            record.interval_size,
            record.num_validators,
          ],
        );
        match outcome {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(failure, _))
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;
    Ok(inserted)
  }

  /// Run `SELECT <columns> FROM aggregate_interval_attestations <tail>`.
  ///
  /// A single statement reads from one consistent snapshot.
  async fn select(
    &self,
    tail: &'static str,
    params: Vec<Value>,
  ) -> Result<Vec<AggregateIntervalAttestation>> {
    let rows = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {COLUMNS} FROM aggregate_interval_attestations {tail}");
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), decode_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── AttestationStore impl ───────────────────────────────────────────────────

impl AttestationStore for SqliteStore {
  async fn insert(&self, record: AggregateIntervalAttestation) -> Result<(), StoreError> {
    validate(&record)?;

    let signature = record.aggregate_signature.clone();
    let slot = record.slot_number;

    if !self.insert_row(record).await? {
      tracing::warn!(%signature, "duplicate aggregate signature");
      return Err(StoreError::DuplicateSignature(signature));
    }

    tracing::debug!(%signature, slot, "stored aggregate");
    Ok(())
  }

  async fn get_by_signature(
    &self,
    signature: &str,
  ) -> Result<Option<AggregateIntervalAttestation>, StoreError> {
    let signature = signature.to_owned();
    let row = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {COLUMNS} FROM aggregate_interval_attestations
               WHERE aggregate_signature = ?1"
            ),
            rusqlite::params![signature],
            decode_row,
          )
          .optional()?)
      })
      .await
      .map_err(Error::from)?;
    Ok(row)
  }

  async fn list_by_slot(
    &self,
    slot_number: i64,
  ) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    Ok(
      self
        .select("WHERE slot_number = ?1 ORDER BY rowid", vec![slot_number.into()])
        .await?,
    )
  }

  async fn list_by_slot_range(
    &self,
    from_slot: i64,
    to_slot: i64,
  ) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    check_range(from_slot, to_slot)?;
    Ok(
      self
        .select(
          "WHERE slot_number BETWEEN ?1 AND ?2 ORDER BY slot_number, rowid",
          vec![from_slot.into(), to_slot.into()],
        )
        .await?,
    )
  }

  async fn list_all(&self) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    Ok(self.select("ORDER BY rowid", Vec::new()).await?)
  }

  async fn find_aggregate(
    &self,
    slot_number: i64,
    interval_size: i64,
    value: i64,
  ) -> Result<Option<AggregateIntervalAttestation>, StoreError> {
    let rows = self
      .select(
        "WHERE slot_number = ?1 AND interval_size = ?2 AND value = ?3
         ORDER BY rowid LIMIT 1",
        vec![slot_number.into(), interval_size.into(), value.into()],
      )
      .await?;
    Ok(rows.into_iter().next())
  }

  async fn count(&self) -> Result<u64, StoreError> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM aggregate_interval_attestations",
          [],
          |r| r.get(0),
        )?)
      })
      .await
      .map_err(Error::from)?;
    Ok(n.max(0) as u64)
  }
}
