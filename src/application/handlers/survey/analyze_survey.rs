//! AnalyzeSurveyHandler - Scores a submission without storing it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::{ResponseTemplates, TemplateError};
use crate::domain::scoring::{
    NormalizedScore, PerspectiveAnalysis, PlotPoint, RawAnswers, ScoreEngine, ScoringError,
};

/// Query to analyse a set of answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeSurveyQuery {
    pub answers: RawAnswers,
}

/// Analysis with the narrative response for every category.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeSurveyResult {
    pub scores: NormalizedScore,
    pub plot_point: PlotPoint,
    pub analysis: PerspectiveAnalysis,
    pub description: String,
    pub category_responses: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeSurveyError {
    InvalidInput(ScoringError),
    Template(TemplateError),
}

impl AnalyzeSurveyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalyzeSurveyError::InvalidInput(err) => err.code(),
            AnalyzeSurveyError::Template(TemplateError::Missing { .. }) => {
                ErrorCode::TemplateNotFound
            }
            AnalyzeSurveyError::Template(TemplateError::Malformed(_)) => {
                ErrorCode::ConfigurationError
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            AnalyzeSurveyError::InvalidInput(err) => format!("Invalid answers: {}", err),
            AnalyzeSurveyError::Template(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for AnalyzeSurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AnalyzeSurveyError {}

impl From<ScoringError> for AnalyzeSurveyError {
    fn from(err: ScoringError) -> Self {
        AnalyzeSurveyError::InvalidInput(err)
    }
}

impl From<TemplateError> for AnalyzeSurveyError {
    fn from(err: TemplateError) -> Self {
        AnalyzeSurveyError::Template(err)
    }
}

impl From<AnalyzeSurveyError> for DomainError {
    fn from(err: AnalyzeSurveyError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

/// Handler for analysis-only queries. Never touches storage.
pub struct AnalyzeSurveyHandler {
    engine: Arc<ScoreEngine>,
    templates: Arc<ResponseTemplates>,
}

impl AnalyzeSurveyHandler {
    pub fn new(engine: Arc<ScoreEngine>, templates: Arc<ResponseTemplates>) -> Self {
        Self { engine, templates }
    }

    pub fn handle(
        &self,
        query: &AnalyzeSurveyQuery,
    ) -> Result<AnalyzeSurveyResult, AnalyzeSurveyError> {
        let card = self.engine.score(&query.answers)?;
        let category_responses = self.templates.responses_for(&card.analysis)?;

        tracing::debug!(
            perspective = %card.analysis,
            categories = category_responses.len(),
            "Survey analysed"
        );

        Ok(AnalyzeSurveyResult {
            scores: card.normalized,
            plot_point: card.plot_point,
            analysis: card.analysis,
            description: card.description(),
            category_responses,
        })
    }
}
