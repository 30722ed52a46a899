//! The record validator. Runs before anything reaches durable storage.

use crate::{
  attestation::AggregateIntervalAttestation,
  error::{ValidationError, ValidationErrorKind},
};

/// Check the structural constraints of a candidate record.
///
/// Pure: no side effects, and the first violated constraint wins. A record
/// with zero validators is accepted; see
/// [`AggregateIntervalAttestation::is_degenerate`].
pub fn validate(record: &AggregateIntervalAttestation) -> Result<(), ValidationError> {
  if record.aggregate_signature.is_empty() {
    return Err(ValidationErrorKind::EmptySignature.into());
  }
  if record.interval_size < 1 {
    return Err(ValidationErrorKind::NonPositiveInterval.into());
  }
  if record.num_validators < 0 {
    return Err(ValidationErrorKind::NegativeValidatorCount.into());
  }
  if record.slot_number < 0 {
    return Err(ValidationErrorKind::NegativeSlot.into());
  }
  Ok(())
}
