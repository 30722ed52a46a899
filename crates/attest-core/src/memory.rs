//! [`MemoryStore`] — an in-process [`AttestationStore`].
//!
//! Records live in an append-only vector with two indexes (by signature and
//! by slot), all behind a single [`RwLock`]. Every insert takes the write
//! guard once, so the uniqueness check and the append cannot interleave with
//! another insert.

use std::{
  collections::{BTreeMap, HashMap},
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
  attestation::AggregateIntervalAttestation,
  error::StoreError,
  store::{AttestationStore, check_range},
  validate::validate,
};

#[derive(Debug, Default)]
struct Inner {
  /// Insertion-ordered records; positions are stable.
  records:      Vec<AggregateIntervalAttestation>,
  by_signature: HashMap<String, usize>,
  by_slot:      BTreeMap<i64, Vec<usize>>,
}

impl Inner {
  fn collect(&self, positions: impl IntoIterator<Item = usize>) -> Vec<AggregateIntervalAttestation> {
    positions
      .into_iter()
      .map(|pos| self.records[pos].clone())
      .collect()
  }
}

/// A non-durable store, useful for tests and for embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: RwLock<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
    self
      .inner
      .read()
      .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
    self
      .inner
      .write()
      .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
  }
}

impl AttestationStore for MemoryStore {
  async fn insert(&self, record: AggregateIntervalAttestation) -> Result<(), StoreError> {
    validate(&record)?;

    let mut inner = self.write()?;
    if inner.by_signature.contains_key(&record.aggregate_signature) {
      tracing::warn!(signature = %record.aggregate_signature, "duplicate aggregate signature");
      return Err(StoreError::DuplicateSignature(record.aggregate_signature));
    }

    let pos = inner.records.len();
    inner.by_signature.insert(record.aggregate_signature.clone(), pos);
    inner.by_slot.entry(record.slot_number).or_default().push(pos);
    tracing::debug!(
      signature = %record.aggregate_signature,
      slot = record.slot_number,
      "stored aggregate in memory"
    );
    inner.records.push(record);
    Ok(())
  }

  async fn get_by_signature(
    &self,
    signature: &str,
  ) -> Result<Option<AggregateIntervalAttestation>, StoreError> {
    let inner = self.read()?;
    Ok(
      inner
        .by_signature
        .get(signature)
        .map(|&pos| inner.records[pos].clone()),
    )
  }

  async fn list_by_slot(
    &self,
    slot_number: i64,
  ) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    let inner = self.read()?;
    Ok(match inner.by_slot.get(&slot_number) {
      Some(positions) => inner.collect(positions.iter().copied()),
      None => Vec::new(),
    })
  }

  async fn list_by_slot_range(
    &self,
    from_slot: i64,
    to_slot: i64,
  ) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    check_range(from_slot, to_slot)?;
    let inner = self.read()?;
    let positions = inner
      .by_slot
      .range(from_slot..=to_slot)
      .flat_map(|(_, positions)| positions.iter().copied());
    Ok(inner.collect(positions))
  }

  async fn list_all(&self) -> Result<Vec<AggregateIntervalAttestation>, StoreError> {
    Ok(self.read()?.records.clone())
  }

  async fn find_aggregate(
    &self,
    slot_number: i64,
    interval_size: i64,
    value: i64,
  ) -> Result<Option<AggregateIntervalAttestation>, StoreError> {
    let inner = self.read()?;
    let found = inner
      .by_slot
      .get(&slot_number)
      .into_iter()
      .flatten()
      .map(|&pos| &inner.records[pos])
      .find(|r| r.interval_size == interval_size && r.value == value)
      .cloned();
    Ok(found)
  }

  async fn count(&self) -> Result<u64, StoreError> {
    Ok(self.read()?.records.len() as u64)
  }
}
