//! Core types and trait definitions for the aggregate attestation store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Producers construct [`AggregateIntervalAttestation`] records, the
//! [`validate`](validate::validate) function checks them, and an
//! [`AttestationStore`](store::AttestationStore) persists them.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod attestation;
pub mod error;
pub mod memory;
pub mod store;
pub mod validate;

pub use attestation::AggregateIntervalAttestation;
pub use error::{StoreError, ValidationError, ValidationErrorKind};
pub use memory::MemoryStore;
pub use store::AttestationStore;
pub use validate::validate;
