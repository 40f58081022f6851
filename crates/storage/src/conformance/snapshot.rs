use std::future::Future;
use std::time::Duration;

use super::{expect_records, rec, ConformanceRecord, TestResult};
use crate::{CollectionStore, StorageError};

pub(super) async fn run_snapshot_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "snapshot",
            "snapshot_sees_current_collection",
            snapshot_sees_current_collection(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "committed_changes_visible",
            committed_changes_visible(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "uncommitted_changes_invisible",
            uncommitted_changes_invisible(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "aborted_changes_invisible",
            aborted_changes_invisible(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "dropped_snapshot_releases_lock",
            dropped_snapshot_releases_lock(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "second_snapshot_waits_for_first",
            second_snapshot_waits_for_first(factory).await,
        ),
        TestResult::from_result(
            "snapshot",
            "foreign_snapshot_rejected",
            foreign_snapshot_rejected(factory).await,
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

async fn snapshot_sees_current_collection<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "a"), rec(2, "b")])
        .await
        .map_err(|e| e.to_string())?;

    let snap = s.begin_snapshot().await.map_err(|e| e.to_string())?;
    let result = expect_records(snap.records(), &[rec(1, "a"), rec(2, "b")]);
    s.abort_snapshot(snap).await;
    result
}

async fn committed_changes_visible<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut snap = s.begin_snapshot().await.map_err(|e| e.to_string())?;
    snap.records_mut().push(rec(1, "a"));
    s.commit_snapshot(snap).await.map_err(|e| e.to_string())?;

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(1, "a")])
}

/// Records changed inside a live snapshot are not visible to plain reads.
async fn uncommitted_changes_invisible<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "a")]).await.map_err(|e| e.to_string())?;

    let mut snap = s.begin_snapshot().await.map_err(|e| e.to_string())?;
    snap.records_mut().clear();

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    let result = expect_records(&all, &[rec(1, "a")]);
    s.abort_snapshot(snap).await;
    result
}

async fn aborted_changes_invisible<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.save_all(&[rec(1, "a")]).await.map_err(|e| e.to_string())?;

    let mut snap = s.begin_snapshot().await.map_err(|e| e.to_string())?;
    snap.records_mut().push(rec(2, "b"));
    s.abort_snapshot(snap).await;

    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(1, "a")])
}

/// Dropping a snapshot must free the store for the next writer.
async fn dropped_snapshot_releases_lock<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut snap = s.begin_snapshot().await.map_err(|e| e.to_string())?;
    snap.records_mut().push(rec(1, "lost"));
    drop(snap);

    let save = tokio::time::timeout(Duration::from_secs(2), s.save_all(&[rec(2, "b")])).await;
    match save {
        Ok(r) => r.map_err(|e| e.to_string())?,
        Err(_) => return Err("save_all blocked after snapshot was dropped".to_string()),
    }
    let all = s.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&all, &[rec(2, "b")])
}

/// While one snapshot is alive, a second `begin_snapshot` must not complete.
async fn second_snapshot_waits_for_first<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let first = s.begin_snapshot().await.map_err(|e| e.to_string())?;

    let blocked = tokio::time::timeout(Duration::from_millis(100), s.begin_snapshot()).await;
    if blocked.is_ok() {
        return Err("second snapshot began while the first was still alive".to_string());
    }

    s.abort_snapshot(first).await;
    let second = tokio::time::timeout(Duration::from_secs(2), s.begin_snapshot()).await;
    match second {
        Ok(Ok(snap)) => {
            s.abort_snapshot(snap).await;
            Ok(())
        }
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("second snapshot never began after the first was released".to_string()),
    }
}

/// Committing another store's snapshot must fail and leave both stores as
/// they were.
async fn foreign_snapshot_rejected<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CollectionStore<ConformanceRecord>,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let owner = factory().await;
    let other = factory().await;
    owner
        .save_all(&[rec(1, "a")])
        .await
        .map_err(|e| e.to_string())?;

    let mut snap = owner.begin_snapshot().await.map_err(|e| e.to_string())?;
    snap.records_mut().push(rec(2, "b"));
    match other.commit_snapshot(snap).await {
        Err(StorageError::ForeignSnapshot) => {}
        Err(e) => return Err(format!("expected ForeignSnapshot, got {e}")),
        Ok(()) => return Err("commit accepted a snapshot from another store".to_string()),
    }

    let theirs = other.load_all().await.map_err(|e| e.to_string())?;
    expect_records(&theirs, &[])?;

    let relock = tokio::time::timeout(Duration::from_secs(2), owner.begin_snapshot()).await;
    match relock {
        Ok(Ok(snap)) => {
            let result = expect_records(snap.records(), &[rec(1, "a")]);
            owner.abort_snapshot(snap).await;
            result
        }
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("owner stayed locked after a rejected commit".to_string()),
    }
}
