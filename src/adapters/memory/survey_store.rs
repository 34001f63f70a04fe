//! In-memory survey store with scripted failures.
//!
//! Each save attempt acquires one connection. A scripted failure is consumed
//! per attempt, at acquisition, at insert time or just after the commit, so
//! retry behaviour can be exercised deterministically without a database.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::foundation::RecordId;
use crate::domain::survey::SurveyRecord;
use crate::ports::{StoreConnection, StoreError, SurveyStore};

/// A failure injected into the next save attempt.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    /// `acquire` fails; no connection is leased.
    OnAcquire(StoreError),
    /// `acquire` succeeds, then the insert fails and is rolled back.
    OnInsert(StoreError),
    /// The row is committed but the caller still sees the error, as when the
    /// COMMIT acknowledgement is lost.
    AfterCommit(StoreError),
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<(RecordId, SurveyRecord)>,
    next_id: i64,
    script: VecDeque<ScriptedFailure>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    attempts: AtomicUsize,
    open_connections: AtomicUsize,
    insert_delay: Mutex<Option<Duration>>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Survey store holding committed rows in memory.
///
/// # Example
///
/// ```ignore
/// let store = InMemorySurveyStore::new()
///     .with_failure(ScriptedFailure::OnInsert(StoreError::transient("reset")));
///
/// gateway.save(record).await?;
///
/// assert_eq!(store.attempts(), 2);
/// assert_eq!(store.row_count(), 1);
/// assert_eq!(store.open_connections(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    shared: Arc<Shared>,
}

impl InMemorySurveyStore {
    /// Creates an empty store that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure for a future attempt.
    pub fn with_failure(self, failure: ScriptedFailure) -> Self {
        self.push_failure(failure);
        self
    }

    /// Queues the same failure for the next `count` attempts.
    pub fn with_failures(self, failure: ScriptedFailure, count: usize) -> Self {
        for _ in 0..count {
            self.push_failure(failure.clone());
        }
        self
    }

    /// Holds every insert for `delay` before committing.
    pub fn with_insert_delay(self, delay: Duration) -> Self {
        *self
            .shared
            .insert_delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(delay);
        self
    }

    pub fn push_failure(&self, failure: ScriptedFailure) {
        self.shared.state().script.push_back(failure);
    }

    // === Test Helpers ===

    /// Committed rows in commit order.
    pub fn rows(&self) -> Vec<(RecordId, SurveyRecord)> {
        self.shared.state().rows.clone()
    }

    pub fn row_count(&self) -> usize {
        self.shared.state().rows.len()
    }

    /// Number of `acquire` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.shared.attempts.load(Ordering::SeqCst)
    }

    /// Connections currently leased and not yet dropped.
    pub fn open_connections(&self) -> usize {
        self.shared.open_connections.load(Ordering::SeqCst)
    }

    /// Scripted failures not yet consumed.
    pub fn pending_failures(&self) -> usize {
        self.shared.state().script.len()
    }
}

#[async_trait]
impl SurveyStore for InMemorySurveyStore {
    async fn acquire(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        self.shared.attempts.fetch_add(1, Ordering::SeqCst);

        let pending = match self.shared.state().script.pop_front() {
            Some(ScriptedFailure::OnAcquire(err)) => return Err(err),
            other => other,
        };

        Ok(Box::new(MemoryConnection::lease(
            Arc::clone(&self.shared),
            pending,
        )))
    }
}

/// A leased in-memory connection. Dropping it releases the lease.
struct MemoryConnection {
    shared: Arc<Shared>,
    pending: Option<ScriptedFailure>,
}

impl MemoryConnection {
    fn lease(shared: Arc<Shared>, pending: Option<ScriptedFailure>) -> Self {
        shared.open_connections.fetch_add(1, Ordering::SeqCst);
        Self { shared, pending }
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.shared.open_connections.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreConnection for MemoryConnection {
    async fn insert_record(&mut self, record: &SurveyRecord) -> Result<RecordId, StoreError> {
        let delay = *self
            .shared
            .insert_delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let after_commit = match self.pending.take() {
            Some(ScriptedFailure::OnInsert(err)) => return Err(err),
            Some(ScriptedFailure::AfterCommit(err)) => Some(err),
            _ => None,
        };

        let mut state = self.shared.state();
        state.next_id += 1;
        let id = RecordId::new(state.next_id);
        state.rows.push((id, record.clone()));

        match after_commit {
            Some(err) => Err(err),
            None => Ok(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SurveySessionId;
    use crate::domain::scoring::{PlotPoint, RawAnswers, ScoreVector};
    use crate::domain::survey::SurveyContext;

    fn record() -> SurveyRecord {
        SurveyRecord::new(
            SurveySessionId::generate(),
            &RawAnswers::new().with_answer("Q1", 1),
            ScoreVector::new(100, 0, 0),
            PlotPoint { x: 100.0, y: 0.0 },
            SurveyContext::default(),
        )
    }

    #[tokio::test]
    async fn inserts_assign_increasing_ids() {
        let store = InMemorySurveyStore::new();

        let mut conn = store.acquire().await.unwrap();
        let first = conn.insert_record(&record()).await.unwrap();
        let second = conn.insert_record(&record()).await.unwrap();

        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);
        assert_eq!(store.row_count(), 2);
    }

    #[tokio::test]
    async fn dropping_connection_releases_lease() {
        let store = InMemorySurveyStore::new();

        let conn = store.acquire().await.unwrap();
        assert_eq!(store.open_connections(), 1);

        drop(conn);
        assert_eq!(store.open_connections(), 0);
    }

    #[tokio::test]
    async fn acquire_failure_leases_nothing() {
        let store = InMemorySurveyStore::new()
            .with_failure(ScriptedFailure::OnAcquire(StoreError::transient("refused")));

        let result = store.acquire().await;

        assert!(result.is_err());
        assert_eq!(store.attempts(), 1);
        assert_eq!(store.open_connections(), 0);
    }

    #[tokio::test]
    async fn insert_failure_stores_nothing() {
        let store = InMemorySurveyStore::new()
            .with_failure(ScriptedFailure::OnInsert(StoreError::permanent("constraint")));

        let mut conn = store.acquire().await.unwrap();
        let result = conn.insert_record(&record()).await;

        assert_eq!(result, Err(StoreError::permanent("constraint")));
        assert_eq!(store.row_count(), 0);
        assert_eq!(store.pending_failures(), 0);
    }

    #[tokio::test]
    async fn after_commit_failure_keeps_the_row() {
        let store = InMemorySurveyStore::new()
            .with_failure(ScriptedFailure::AfterCommit(StoreError::permanent("ack lost")));

        let mut conn = store.acquire().await.unwrap();
        let result = conn.insert_record(&record()).await;

        assert_eq!(result, Err(StoreError::permanent("ack lost")));
        assert_eq!(store.row_count(), 1);
    }
}
