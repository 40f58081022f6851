use std::future::Future;

use super::{expect_records, rec, ConformanceRecord, TestResult};
use crate::CollectionStore;

pub(super) async fn run_collection_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "collection",
            "fresh_store_loads_empty",
            fresh_store_loads_empty(factory).await,
        ),
        TestResult::from_result(
            "collection",
            "save_then_load_round_trips",
            save_then_load_round_trips(factory).await,
        ),
        TestResult::from_result(
            "collection",
            "save_replaces_entire_collection",
            save_replaces_entire_collection(factory).await,
        ),
        TestResult::from_result(
            "collection",
            "save_preserves_order_and_duplicates",
            save_preserves_order_and_duplicates(factory).await,
        ),
        TestResult::from_result(
            "collection",
            "save_empty_clears_collection",
            save_empty_clears_collection(factory).await,
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn fresh_store_loads_empty<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[])
}

async fn save_then_load_round_trips<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let records = vec![rec(1, "one"), rec(2, "two")];
    s.save_all(&records).await.map_err(|e| e.to_string())?;

    let first = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&first, &records)?;

    // Saving what was loaded must not change anything.
    s.save_all(&first).await.map_err(|e| e.to_string())?;
    let second = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&second, &records)
}

/// A save is a full overwrite, never an append or merge.
async fn save_replaces_entire_collection<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "one"), rec(2, "two"), rec(3, "three")])
        .await
        .map_err(|e| e.to_string())?;
    s.save_all(&[rec(9, "nine")])
        .await
        .map_err(|e| e.to_string())?;

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(9, "nine")])
}

/// Ids are not unique at the storage layer.
async fn save_preserves_order_and_duplicates<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let records = vec![rec(3, "c"), rec(1, "a"), rec(3, "c-again"), rec(2, "b")];
    s.save_all(&records).await.map_err(|e| e.to_string())?;

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &records)
}

async fn save_empty_clears_collection<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "one")])
        .await
        .map_err(|e| e.to_string())?;
    s.save_all(&[]).await.map_err(|e| e.to_string())?;

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[])
}
