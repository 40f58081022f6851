use std::future::Future;

use super::{expect_records, rec, ConformanceRecord, TestResult};
use crate::CollectionStore;

pub(super) async fn run_delete_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "delete",
            "delete_removes_matching_record",
            delete_removes_matching_record(factory).await,
        ),
        TestResult::from_result(
            "delete",
            "delete_removes_every_duplicate",
            delete_removes_every_duplicate(factory).await,
        ),
        TestResult::from_result(
            "delete",
            "delete_missing_id_is_noop",
            delete_missing_id_is_noop(factory).await,
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn delete_removes_matching_record<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "a"), rec(2, "b"), rec(3, "c")])
        .await
        .map_err(|e| e.to_string())?;

    let removed = s.delete_by_id(2).await.map_err(|e| e.to_string())?;
    if removed != 1 {
        return Err(format!("expected 1 removed, got {removed}"));
    }
    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(1, "a"), rec(3, "c")])
}

async fn delete_removes_every_duplicate<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(7, "first"), rec(1, "keep"), rec(7, "second")])
        .await
        .map_err(|e| e.to_string())?;

    let removed = s.delete_by_id(7).await.map_err(|e| e.to_string())?;
    if removed != 2 {
        return Err(format!("expected 2 removed, got {removed}"));
    }
    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(1, "keep")])
}

async fn delete_missing_id_is_noop<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "a")]).await.map_err(|e| e.to_string())?;

    let removed = s.delete_by_id(42).await.map_err(|e| e.to_string())?;
    if removed != 0 {
        return Err(format!("expected 0 removed, got {removed}"));
    }
    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(1, "a")])
}
