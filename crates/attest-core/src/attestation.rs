//! The aggregated attestation record.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// One aggregate over a slot interval, keyed by its aggregate signature.
///
/// Records are immutable once stored. All numeric fields are signed so that
/// out-of-range input survives decoding and is rejected by
/// [`validate`](crate::validate::validate) with a precise reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateIntervalAttestation {
  /// Aggregated signature over the attested value; the primary key.
  pub aggregate_signature: String,
  pub slot_number:         i64,
  /// The attested value. Opaque to the store.
  pub value:               i64,
  /// Number of slots spanned by this aggregate.
  pub interval_size:       i64,
  /// Number of validator attestations folded into the signature.
  pub num_validators:      i64,
}

impl AggregateIntervalAttestation {
  pub fn new(
    aggregate_signature: impl Into<String>,
    slot_number: i64,
    value: i64,
    interval_size: i64,
    num_validators: i64,
  ) -> Self {
    Self {
      aggregate_signature: aggregate_signature.into(),
      slot_number,
      value,
      interval_size,
      num_validators,
    }
  }

  /// An aggregate with no validators carries no attestation content.
  pub fn is_degenerate(&self) -> bool { self.num_validators == 0 }

  /// The inclusive span of slots this aggregate covers.
  pub fn covered_slots(&self) -> RangeInclusive<i64> {
    let last = self
      .slot_number
      .saturating_add(self.interval_size.max(1) - 1);
    self.slot_number..=last
  }
}
