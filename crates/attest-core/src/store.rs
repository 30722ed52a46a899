//! The `AttestationStore` trait.
//!
//! The trait is implemented by storage backends ([`MemoryStore`] here,
//! `attest-store-sqlite` for durable storage). The API layer depends on this
//! abstraction, not on any concrete backend.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use std::future::Future;

use crate::{attestation::AggregateIntervalAttestation, error::StoreError};

/// Keyed, append-only storage of aggregate attestations.
///
/// Records are never updated in place: the aggregate signature is the primary
/// key and a given signature denotes one immutable fact. Implementations must
/// make the uniqueness check and the insert a single atomic step, so that two
/// concurrent inserts of the same signature yield exactly one success.
///
/// Reads return owned, finite snapshots rather than live cursors.
pub trait AttestationStore: Send + Sync {
  /// Validate and persist `record`.
  ///
  /// Fails with [`StoreError::Validation`] if the record is malformed and
  /// [`StoreError::DuplicateSignature`] if the signature is already stored.
  fn insert(
    &self,
    record: AggregateIntervalAttestation,
  ) -> impl Future<Output = Result<(), StoreError>> + Send + '_;

  /// Retrieve a record by signature. A miss is `Ok(None)`.
  fn get_by_signature<'a>(
    &'a self,
    signature: &'a str,
  ) -> impl Future<Output = Result<Option<AggregateIntervalAttestation>, StoreError>>
  + Send
  + 'a;

  /// All records for `slot_number`, in insertion order.
  fn list_by_slot(
    &self,
    slot_number: i64,
  ) -> impl Future<Output = Result<Vec<AggregateIntervalAttestation>, StoreError>>
  + Send
  + '_;

  /// All records with `from_slot <= slot_number <= to_slot`, ordered by slot
  /// and then insertion order.
  ///
  /// Fails with [`StoreError::InvalidRange`] when `from_slot > to_slot`.
  fn list_by_slot_range(
    &self,
    from_slot: i64,
    to_slot: i64,
  ) -> impl Future<Output = Result<Vec<AggregateIntervalAttestation>, StoreError>>
  + Send
  + '_;

  /// Every stored record, in insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<AggregateIntervalAttestation>, StoreError>>
  + Send
  + '_;

  /// The first stored aggregate (in insertion order) matching a
  /// `(slot, interval, value)` triple, as a producer would look it up before
  /// deciding whether to start a new aggregate.
  fn find_aggregate(
    &self,
    slot_number: i64,
    interval_size: i64,
    value: i64,
  ) -> impl Future<Output = Result<Option<AggregateIntervalAttestation>, StoreError>>
  + Send
  + '_;

  /// Number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send + '_;
}

/// Shared range check for [`AttestationStore::list_by_slot_range`].
pub fn check_range(from_slot: i64, to_slot: i64) -> Result<(), StoreError> {
  if from_slot > to_slot {
    return Err(StoreError::InvalidRange { from: from_slot, to: to_slot });
  }
  Ok(())
}
