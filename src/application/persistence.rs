//! PersistenceGateway - Saves survey records with bounded retry.
//!
//! Each attempt leases a fresh connection, inserts inside its own
//! transaction and drops the connection before any retry delay. Transient
//! failures are retried up to the policy bound; permanent failures are
//! returned after the first attempt.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::PersistenceConfig;
use crate::domain::foundation::{ErrorCode, RecordId, StateMachine};
use crate::domain::survey::SurveyRecord;
use crate::ports::{StoreError, SurveyStore};

/// Per-call save lifecycle.
///
/// `Init → Connecting → Executing → {Committed | RolledBack}`. A failed
/// acquisition goes straight from `Connecting` to `RolledBack`. `RolledBack`
/// loops back to `Connecting` while attempts remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SaveState {
    Init,
    Connecting,
    Executing,
    Committed,
    RolledBack,
}

impl StateMachine for SaveState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SaveState::*;
        matches!(
            (self, target),
            (Init, Connecting)
                | (Connecting, Executing)
                | (Connecting, RolledBack)
                | (Executing, Committed)
                | (Executing, RolledBack)
                | (RolledBack, Connecting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SaveState::*;
        match self {
            Init => vec![Connecting],
            Connecting => vec![Executing, RolledBack],
            Executing => vec![Committed, RolledBack],
            RolledBack => vec![Connecting],
            Committed => vec![],
        }
    }
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaveState::Init => "init",
            SaveState::Connecting => "connecting",
            SaveState::Executing => "executing",
            SaveState::Committed => "committed",
            SaveState::RolledBack => "rolled_back",
        };
        f.write_str(name)
    }
}

/// How many times to attempt a save and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&PersistenceConfig::default())
    }
}

impl From<&PersistenceConfig> for RetryPolicy {
    fn from(config: &PersistenceConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay())
    }
}

/// Terminal failure of a save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A permanent failure; no retry was made.
    #[error("storage rejected the record after {attempts} attempt(s): {cause}")]
    Rejected { attempts: u32, cause: StoreError },

    /// Every attempt failed transiently. `cause` is the last failure.
    #[error("gave up after {attempts} attempt(s): {cause}")]
    Exhausted { attempts: u32, cause: StoreError },

    /// The detached save task panicked or was aborted.
    #[error("save task interrupted: {0}")]
    Interrupted(String),
}

impl PersistenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PersistenceError::Rejected { .. } => ErrorCode::PersistenceRejected,
            PersistenceError::Exhausted { .. } => ErrorCode::PersistenceExhausted,
            PersistenceError::Interrupted(_) => ErrorCode::InternalError,
        }
    }

    pub fn attempts(&self) -> Option<u32> {
        match self {
            PersistenceError::Rejected { attempts, .. }
            | PersistenceError::Exhausted { attempts, .. } => Some(*attempts),
            PersistenceError::Interrupted(_) => None,
        }
    }
}

/// Saves survey records through a shared store.
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn SurveyStore>,
    policy: RetryPolicy,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn SurveyStore>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Appends the record and returns its generated id.
    ///
    /// The attempts run on a spawned task, so dropping the returned future
    /// does not interrupt an in-flight transaction; it still commits or
    /// rolls back and its connection is released.
    ///
    /// Saving the same record twice stores two rows.
    ///
    /// # Errors
    ///
    /// - `Rejected` on the first permanent failure
    /// - `Exhausted` when every attempt failed transiently
    /// - `Interrupted` if the save task panicked
    pub async fn save(&self, record: SurveyRecord) -> Result<RecordId, PersistenceError> {
        let store = Arc::clone(&self.store);
        let policy = self.policy;

        tokio::spawn(async move { save_with_retry(store.as_ref(), policy, &record).await })
            .await
            .map_err(|e| PersistenceError::Interrupted(e.to_string()))?
    }
}

async fn save_with_retry(
    store: &dyn SurveyStore,
    policy: RetryPolicy,
    record: &SurveyRecord,
) -> Result<RecordId, PersistenceError> {
    let session_id = record.session_id().as_str();
    let mut state = SaveState::Init;
    let mut attempt = 0;

    loop {
        attempt += 1;
        advance(&mut state, SaveState::Connecting);
        tracing::debug!(
            session_id = %session_id,
            attempt,
            max_attempts = policy.max_attempts(),
            "Saving survey result"
        );

        match attempt_once(store, record, &mut state).await {
            Ok(record_id) => {
                advance(&mut state, SaveState::Committed);
                tracing::info!(
                    session_id = %session_id,
                    record_id = %record_id,
                    attempt,
                    "Survey result committed"
                );
                return Ok(record_id);
            }
            Err(cause) => {
                advance(&mut state, SaveState::RolledBack);

                if !cause.is_retryable() {
                    tracing::error!(
                        session_id = %session_id,
                        attempt,
                        error = %cause,
                        "Survey result rejected"
                    );
                    return Err(PersistenceError::Rejected {
                        attempts: attempt,
                        cause,
                    });
                }

                if attempt >= policy.max_attempts() {
                    tracing::error!(
                        session_id = %session_id,
                        attempts = attempt,
                        error = %cause,
                        "Giving up on survey result"
                    );
                    return Err(PersistenceError::Exhausted {
                        attempts: attempt,
                        cause,
                    });
                }

                tracing::warn!(
                    session_id = %session_id,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    error = %cause,
                    "Transient storage failure, retrying"
                );
                tokio::time::sleep(policy.delay()).await;
            }
        }
    }
}

/// One attempt. The connection is dropped, and so released, on every exit.
async fn attempt_once(
    store: &dyn SurveyStore,
    record: &SurveyRecord,
    state: &mut SaveState,
) -> Result<RecordId, StoreError> {
    let mut conn = store.acquire().await?;
    advance(state, SaveState::Executing);
    conn.insert_record(record).await
}

fn advance(state: &mut SaveState, next: SaveState) {
    debug_assert!(
        state.can_transition_to(&next),
        "invalid save transition {} -> {}",
        state,
        next
    );
    tracing::trace!(from = %state, to = %next, "Save state");
    *state = next;
}
