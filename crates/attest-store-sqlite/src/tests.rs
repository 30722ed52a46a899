//! Integration tests for `SqliteStore` against an in-memory database.

use attest_core::{
  AggregateIntervalAttestation, AttestationStore, StoreError, ValidationErrorKind,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(sig: &str, slot: i64) -> AggregateIntervalAttestation {
  AggregateIntervalAttestation::new(sig, slot, 42, 4, 120)
}

fn signatures(records: &[AggregateIntervalAttestation]) -> Vec<&str> {
  records.iter().map(|r| r.aggregate_signature.as_str()).collect()
}

// ─── Insert and point lookup ─────────────────────────────────────────────────

#[tokio::test]
async fn insert_get_and_range_scenario() {
  let s = store().await;
  let a = AggregateIntervalAttestation::new("A", 10, 42, 4, 120);

  s.insert(a.clone()).await.unwrap();
  assert_eq!(s.get_by_signature("A").await.unwrap(), Some(a.clone()));

  let err = s
    .insert(AggregateIntervalAttestation::new("A", 11, 7, 1, 3))
    .await
    .unwrap_err();
  assert!(matches!(err, StoreError::DuplicateSignature(ref sig) if sig == "A"));

  let in_range = s.list_by_slot_range(8, 12).await.unwrap();
  assert_eq!(in_range, vec![a]);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_by_signature("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_keeps_first_record() {
  let s = store().await;
  s.insert(record("A", 10)).await.unwrap();
  let _ = s
    .insert(AggregateIntervalAttestation::new("A", 99, -1, 8, 0))
    .await
    .unwrap_err();

  assert_eq!(s.count().await.unwrap(), 1);
  let kept = s.get_by_signature("A").await.unwrap().unwrap();
  assert_eq!(kept, record("A", 10));
}

#[tokio::test]
async fn invalid_record_never_reaches_table() {
  let s = store().await;
  let cases = [
    (AggregateIntervalAttestation::new("", 1, 0, 1, 1), ValidationErrorKind::EmptySignature),
    (AggregateIntervalAttestation::new("a", 1, 0, 0, 1), ValidationErrorKind::NonPositiveInterval),
    (AggregateIntervalAttestation::new("b", 1, 0, 1, -1), ValidationErrorKind::NegativeValidatorCount),
    (AggregateIntervalAttestation::new("c", -1, 0, 1, 1), ValidationErrorKind::NegativeSlot),
  ];
  for (input, expected) in cases {
    match s.insert(input).await {
      Err(StoreError::Validation(e)) => assert_eq!(e.kind, expected),
      other => panic!("expected validation error, got {other:?}"),
    }
  }
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn degenerate_record_is_accepted() {
  let s = store().await;
  let r = AggregateIntervalAttestation::new("empty", 0, 0, 1, 0);
  s.insert(r.clone()).await.unwrap();
  let got = s.get_by_signature("empty").await.unwrap().unwrap();
  assert!(got.is_degenerate());
  assert_eq!(got, r);
}

// ─── Slot queries ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_by_slot_matches_exactly_in_insertion_order() {
  let s = store().await;
  for (sig, slot) in [("z", 7), ("x", 6), ("a", 7), ("m", 8), ("b", 7)] {
    s.insert(record(sig, slot)).await.unwrap();
  }

  assert_eq!(signatures(&s.list_by_slot(7).await.unwrap()), ["z", "a", "b"]);
  assert!(s.list_by_slot(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_by_slot_is_restartable() {
  let s = store().await;
  s.insert(record("a", 1)).await.unwrap();
  let first = s.list_by_slot(1).await.unwrap();
  let second = s.list_by_slot(1).await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn range_is_inclusive_and_ordered_by_slot() {
  let s = store().await;
  for (sig, slot) in [("hi", 12), ("lo", 8), ("below", 7), ("mid", 10), ("above", 13), ("mid2", 10)] {
    s.insert(record(sig, slot)).await.unwrap();
  }
  let got = s.list_by_slot_range(8, 12).await.unwrap();
  assert_eq!(signatures(&got), ["lo", "mid", "mid2", "hi"]);

  let single = s.list_by_slot_range(10, 10).await.unwrap();
  assert_eq!(signatures(&single), ["mid", "mid2"]);
}

#[tokio::test]
async fn inverted_range_is_rejected() {
  let s = store().await;
  let err = s.list_by_slot_range(5, 3).await.unwrap_err();
  assert!(matches!(err, StoreError::InvalidRange { from: 5, to: 3 }));
}

#[tokio::test]
async fn list_all_and_count() {
  let s = store().await;
  for (sig, slot) in [("c", 3), ("a", 1), ("b", 2)] {
    s.insert(record(sig, slot)).await.unwrap();
  }
  assert_eq!(signatures(&s.list_all().await.unwrap()), ["c", "a", "b"]);
  assert_eq!(s.count().await.unwrap(), 3);
}

#[tokio::test]
async fn find_aggregate_by_slot_interval_value() {
  let s = store().await;
  s.insert(AggregateIntervalAttestation::new("p", 5, 100, 2, 3)).await.unwrap();
  s.insert(AggregateIntervalAttestation::new("q", 5, 100, 4, 9)).await.unwrap();
  s.insert(AggregateIntervalAttestation::new("r", 6, 100, 4, 1)).await.unwrap();

  let found = s.find_aggregate(5, 4, 100).await.unwrap().unwrap();
  assert_eq!(found.aggregate_signature, "q");
  assert!(s.find_aggregate(5, 4, 99).await.unwrap().is_none());
}

// ─── Immutability and concurrency ────────────────────────────────────────────

#[tokio::test]
async fn rows_cannot_be_updated() {
  let s = store().await;
  s.insert(record("A", 10)).await.unwrap();

  let result = s
    .conn
    .call(|conn| {
      conn.execute(
        "UPDATE aggregate_interval_attestations SET num_validators = 0",
        [],
      )?;
      Ok(())
    })
    .await;
  assert!(result.is_err());
  assert_eq!(s.get_by_signature("A").await.unwrap().unwrap().num_validators, 120);
}

#[tokio::test]
async fn concurrent_inserts_of_same_signature() {
  let s = store().await;
  let mut handles = Vec::new();
  for i in 0..16 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.insert(AggregateIntervalAttestation::new("race", i, i, 1, 1)).await
    }));
  }

  let mut ok = 0;
  let mut dup = 0;
  for h in handles {
    match h.await.unwrap() {
      Ok(()) => ok += 1,
      Err(StoreError::DuplicateSignature(_)) => dup += 1,
      Err(e) => panic!("unexpected error: {e}"),
    }
  }
  assert_eq!((ok, dup), (1, 15));
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_inserts_of_distinct_signatures() {
  let s = store().await;
  let mut handles = Vec::new();
  for i in 0..32 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.insert(record(&format!("sig-{i}"), i % 4)).await
    }));
  }
  for h in handles {
    h.await.unwrap().unwrap();
  }

  assert_eq!(s.count().await.unwrap(), 32);
  for slot in 0..4 {
    assert_eq!(s.list_by_slot(slot).await.unwrap().len(), 8);
  }
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("attestations.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(record("A", 10)).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_by_signature("A").await.unwrap(), Some(record("A", 10)));
  assert!(matches!(
    s.insert(record("A", 11)).await,
    Err(StoreError::DuplicateSignature(_))
  ));
}

#[tokio::test]
async fn newer_schema_version_is_refused() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("future.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.conn
      .call(|conn| {
        conn.execute_batch("PRAGMA user_version = 99;")?;
        Ok(())
      })
      .await
      .unwrap();
  }

  match SqliteStore::open(&path).await {
    Err(Error::UnsupportedSchema { found, supported }) => {
      assert_eq!((found, supported), (99, 1));
    }
    Err(e) => panic!("unexpected error: {e}"),
    Ok(_) => panic!("expected open to fail"),
  }
}

#[tokio::test]
async fn unopenable_path_maps_to_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing").join("nested").join("db.sqlite");

  let err = match SqliteStore::open(&path).await {
    Err(e) => e,
    Ok(_) => panic!("expected open to fail"),
  };
  assert!(err.is_unavailable(), "{err}");
  assert!(StoreError::from(err).is_transient());
}
