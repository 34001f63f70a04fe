//! Scoring error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the score engine.
///
/// Every variant is a precondition violation by the caller (or a broken
/// weight table at startup). None of them is ever retried or corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The answer code has no registered weight triple for its question.
    #[error("answer code {code} is not registered for question '{question}'")]
    UnknownAnswerCode { question: String, code: i64 },

    /// Classification input does not sum to 100 (within 0.1).
    #[error("scores must sum to approximately 100, got {sum}")]
    ScoresDoNotSumTo100 { sum: f64 },

    /// The weight table or question catalogue is malformed.
    #[error("invalid weight table: {0}")]
    InvalidWeightTable(String),
}

impl ScoringError {
    pub fn unknown_answer_code(question: impl Into<String>, code: i64) -> Self {
        Self::UnknownAnswerCode {
            question: question.into(),
            code,
        }
    }

    pub fn invalid_weight_table(reason: impl Into<String>) -> Self {
        Self::InvalidWeightTable(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScoringError::UnknownAnswerCode { .. } | ScoringError::ScoresDoNotSumTo100 { .. } => {
                ErrorCode::InvalidInput
            }
            ScoringError::InvalidWeightTable(_) => ErrorCode::ConfigurationError,
        }
    }
}

impl From<ScoringError> for DomainError {
    fn from(err: ScoringError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
