//! SubmitSurveyHandler - Scores a submission and stores it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{PersistenceError, PersistenceGateway};
use crate::domain::foundation::{
    DomainError, ErrorCode, RecordId, SurveySessionId, ValidationError,
};
use crate::domain::scoring::{
    NormalizedScore, PerspectiveAnalysis, PlotPoint, RawAnswers, ScoreEngine, ScoringError,
};
use crate::domain::survey::{hash_email_session, SurveyContext, SurveyRecord};
use crate::ports::StoreError;

/// Command to submit one completed survey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitSurveyCommand {
    /// Caller-supplied session id; generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    pub answers: RawAnswers,
    /// Used only to derive `session_hash` when none is supplied.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub context: SurveyContext,
}

/// Result of a stored submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitSurveyResult {
    pub record_id: RecordId,
    pub session_id: SurveySessionId,
    pub scores: NormalizedScore,
    pub plot_point: PlotPoint,
    pub analysis: PerspectiveAnalysis,
    pub description: String,
}

/// Why a submission was not stored.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitSurveyError {
    /// Answers could not be scored.
    InvalidInput(ScoringError),
    /// A submitted field is malformed.
    Validation(ValidationError),
    /// The store refused the record; not retried.
    PersistenceRejected { attempts: u32, cause: StoreError },
    /// Every attempt failed transiently.
    PersistenceExhausted { attempts: u32, cause: StoreError },
    Internal(String),
}

impl SubmitSurveyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitSurveyError::InvalidInput(_) => ErrorCode::InvalidInput,
            SubmitSurveyError::Validation(_) => ErrorCode::ValidationFailed,
            SubmitSurveyError::PersistenceRejected { .. } => ErrorCode::PersistenceRejected,
            SubmitSurveyError::PersistenceExhausted { .. } => ErrorCode::PersistenceExhausted,
            SubmitSurveyError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubmitSurveyError::InvalidInput(err) => format!("Invalid answers: {}", err),
            SubmitSurveyError::Validation(err) => err.to_string(),
            SubmitSurveyError::PersistenceRejected { cause, .. } => {
                format!("Survey result could not be stored: {}", cause.message)
            }
            SubmitSurveyError::PersistenceExhausted { attempts, cause } => format!(
                "Survey result could not be stored after {} attempts: {}",
                attempts, cause.message
            ),
            SubmitSurveyError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }

    pub fn attempts(&self) -> Option<u32> {
        match self {
            SubmitSurveyError::PersistenceRejected { attempts, .. }
            | SubmitSurveyError::PersistenceExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmitSurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubmitSurveyError {}

impl From<ScoringError> for SubmitSurveyError {
    fn from(err: ScoringError) -> Self {
        SubmitSurveyError::InvalidInput(err)
    }
}

impl From<ValidationError> for SubmitSurveyError {
    fn from(err: ValidationError) -> Self {
        SubmitSurveyError::Validation(err)
    }
}

impl From<PersistenceError> for SubmitSurveyError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Rejected { attempts, cause } => {
                SubmitSurveyError::PersistenceRejected { attempts, cause }
            }
            PersistenceError::Exhausted { attempts, cause } => {
                SubmitSurveyError::PersistenceExhausted { attempts, cause }
            }
            PersistenceError::Interrupted(msg) => SubmitSurveyError::Internal(msg),
        }
    }
}

impl From<SubmitSurveyError> for DomainError {
    fn from(err: SubmitSurveyError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err.attempts() {
            Some(attempts) => domain.with_detail("attempts", attempts.to_string()),
            None => domain,
        }
    }
}

/// Handler for survey submissions.
pub struct SubmitSurveyHandler {
    engine: Arc<ScoreEngine>,
    gateway: PersistenceGateway,
}

impl SubmitSurveyHandler {
    pub fn new(engine: Arc<ScoreEngine>, gateway: PersistenceGateway) -> Self {
        Self { engine, gateway }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSurveyCommand,
    ) -> Result<SubmitSurveyResult, SubmitSurveyError> {
        // 1. Resolve the session id
        let session_id = SurveySessionId::or_generate(cmd.session_id)?;

        // 2. Score the answers; empty submissions fail classification
        let card = self.engine.score(&cmd.answers)?;

        // 3. Build the record
        let mut context = cmd.context;
        if context.session_hash.is_none() {
            context.session_hash = cmd
                .email
                .as_deref()
                .filter(|email| !email.trim().is_empty())
                .map(|email| hash_email_session(email, &session_id));
        }
        let record = SurveyRecord::from_scorecard(session_id.clone(), &cmd.answers, &card, context);

        // 4. Persist
        let record_id = self.gateway.save(record).await?;

        tracing::info!(
            session_id = %session_id,
            record_id = %record_id,
            perspective = %card.analysis,
            "Survey submitted"
        );

        Ok(SubmitSurveyResult {
            record_id,
            session_id,
            scores: card.normalized,
            plot_point: card.plot_point,
            analysis: card.analysis,
            description: card.description(),
        })
    }
}
