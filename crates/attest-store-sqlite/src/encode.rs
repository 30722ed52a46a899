//! Row decoding between the `aggregate_interval_attestations` table and
//! [`AggregateIntervalAttestation`].
//!
//! Every column maps one-to-one onto a field; signatures are TEXT and all
//! numeric fields are INTEGER.

use attest_core::AggregateIntervalAttestation;

/// Column list shared by every SELECT, in [`decode_row`] order.
pub const COLUMNS: &str =
  "aggregate_signature, slot_number, value, interval_size, num_validators";

pub fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AggregateIntervalAttestation> {
  Ok(AggregateIntervalAttestation {
    aggregate_signature: row.get(0)?,
    slot_number:         row.get(1)?,
    value:               row.get(2)?,
    interval_size:       row.get(3)?,
    num_validators:      row.get(4)?,
  })
}
