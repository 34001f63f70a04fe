//! Survey command and query handlers.

mod analyze_survey;
mod submit_survey;

pub use analyze_survey::{
    AnalyzeSurveyError, AnalyzeSurveyHandler, AnalyzeSurveyQuery, AnalyzeSurveyResult,
};
pub use submit_survey::{
    SubmitSurveyCommand, SubmitSurveyError, SubmitSurveyHandler, SubmitSurveyResult,
};
