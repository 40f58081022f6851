use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use super::{rec, ConformanceRecord, TestResult};
use crate::{CollectionStore, StorageError};

/// Number of concurrent tasks to spawn in each test.
const N: i64 = 10;

pub(super) async fn run_concurrent_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "concurrent",
            "concurrent_appends_all_survive",
            concurrent_appends_all_survive(factory).await,
        ),
        TestResult::from_result(
            "concurrent",
            "concurrent_update_and_delete_both_apply",
            concurrent_update_and_delete_both_apply(factory).await,
        ),
    ]
}

// ── Concurrent appends: no lost update ───────────────────────────────────────

/// N tasks each load the collection, append one record, and write it back.
/// Because snapshots serialize, the final collection holds all N records.
async fn concurrent_appends_all_survive<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let storage = Arc::new(factory().await);

    let mut handles = Vec::new();
    for i in 0..N {
        let s = storage.clone();
        handles.push(tokio::spawn(async move {
            let mut snap = s.begin_snapshot().await?;
            snap.records_mut().push(rec(i, &format!("task-{i}")));
            tokio::task::yield_now().await;
            s.commit_snapshot(snap).await
        }));
    }

    for handle in handles {
        handle
            .await
            .map_err(|e| format!("task panic: {e}"))?
            .map_err(|e: StorageError| format!("storage error: {e}"))?;
    }

    let all = storage.load_all().await.map_err(|e| e.to_string())?;
    let ids: BTreeSet<i64> = all.iter().map(|r| r.id).collect();
    let expected: BTreeSet<i64> = (0..N).collect();
    if all.len() != N as usize || ids != expected {
        return Err(format!("expected ids {expected:?} once each, got {all:?}"));
    }
    Ok(())
}

// ── Update racing a delete ────────────────────────────────────────────────────

/// One task relabels record 1 while another deletes record 2. Whatever the
/// interleaving, both effects must be present afterwards.
async fn concurrent_update_and_delete_both_apply<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let storage = Arc::new(factory().await);
    storage
        .save_all(&[rec(1, "open"), rec(2, "doomed")])
        .await
        .map_err(|e| e.to_string())?;

    let updater = {
        let s = storage.clone();
        tokio::spawn(async move {
            let mut snap = s.begin_snapshot().await?;
            if let Some(r) = snap.find_mut(1) {
                r.label = "done".to_string();
            }
            tokio::task::yield_now().await;
            s.commit_snapshot(snap).await
        })
    };
    let deleter = {
        let s = storage.clone();
        tokio::spawn(async move { s.delete_by_id(2).await.map(|_| ()) })
    };

    for handle in [updater, deleter] {
        handle
            .await
            .map_err(|e| format!("task panic: {e}"))?
            .map_err(|e: StorageError| format!("storage error: {e}"))?;
    }

    let all = storage.load_all().await.map_err(|e| e.to_string())?;
    if all != vec![rec(1, "done")] {
        return Err(format!("expected only the relabelled record, got {all:?}"));
    }
    Ok(())
}
