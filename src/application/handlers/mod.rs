//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod survey;

pub use survey::{
    // Commands
    SubmitSurveyCommand, SubmitSurveyError, SubmitSurveyHandler, SubmitSurveyResult,
    // Queries
    AnalyzeSurveyError, AnalyzeSurveyHandler, AnalyzeSurveyQuery, AnalyzeSurveyResult,
};
