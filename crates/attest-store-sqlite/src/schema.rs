//! SQL schema for the attestation SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version; opening a file with a newer version is refused.

/// Version written by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per finalized aggregate signature.
-- Rows are never updated; the rowid gives insertion order.
CREATE TABLE IF NOT EXISTS aggregate_interval_attestations (
    aggregate_signature TEXT    PRIMARY KEY NOT NULL,
    slot_number         INTEGER NOT NULL,
    value               INTEGER NOT NULL,
    interval_size       INTEGER NOT NULL,
    num_validators      INTEGER NOT NULL,
    CHECK (length(aggregate_signature) > 0),
    CHECK (slot_number >= 0),
    CHECK (interval_size >= 1),
    CHECK (num_validators >= 0)
);

CREATE INDEX IF NOT EXISTS aggregate_interval_attestations_slot_idx
    ON aggregate_interval_attestations(slot_number);

CREATE TRIGGER IF NOT EXISTS aggregate_interval_attestations_immutable
BEFORE UPDATE ON aggregate_interval_attestations
BEGIN
    SELECT RAISE(ABORT, 'aggregate interval attestations are immutable');
END;

PRAGMA user_version = 1;
";
