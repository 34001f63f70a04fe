//! Survey store port (write side).
//!
//! Defines the contract for storing one `SurveyRecord` per submission.
//! A store hands out connections; each connection runs the insert inside
//! its own transaction and is released when dropped.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::RecordId;
use crate::domain::survey::SurveyRecord;

/// Whether a storage failure may succeed if attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection refused or reset, pool timeouts, serialization conflicts.
    Transient,
    /// Constraint or schema violations, bad credentials, malformed data.
    Permanent,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transient => write!(f, "transient"),
            FailureKind::Permanent => write!(f, "permanent"),
        }
    }
}

/// A classified storage failure.
///
/// Messages never contain connection strings or credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} storage failure: {message}")]
pub struct StoreError {
    pub kind: FailureKind,
    pub message: String,
}

impl StoreError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transient,
            message: message.into(),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Permanent,
            message: message.into(),
        }
    }

    /// Returns true if this failure is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.kind == FailureKind::Transient
    }
}

/// Source of connections to the survey results store.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Acquire a connection.
    ///
    /// # Errors
    ///
    /// - `Transient` if the store is unreachable or the pool is exhausted
    /// - `Permanent` if the store rejects the credentials or configuration
    async fn acquire(&self) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// One leased connection. Dropping it returns it to its store.
#[async_trait]
pub trait StoreConnection: Send {
    /// Insert the record inside a transaction and commit it.
    ///
    /// On any error the transaction is rolled back and nothing is stored.
    async fn insert_record(&mut self, record: &SurveyRecord) -> Result<RecordId, StoreError>;
}
