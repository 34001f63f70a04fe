//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Submissions are written through the `PersistenceGateway`; analysis-only
//! queries never touch storage.

pub mod handlers;
mod persistence;

pub use handlers::{
    AnalyzeSurveyError, AnalyzeSurveyHandler, AnalyzeSurveyQuery, AnalyzeSurveyResult,
    SubmitSurveyCommand, SubmitSurveyError, SubmitSurveyHandler, SubmitSurveyResult,
};
pub use persistence::{PersistenceError, PersistenceGateway, RetryPolicy, SaveState};
