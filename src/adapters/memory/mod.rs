//! In-memory adapters for tests and local runs.

mod survey_store;

pub use survey_store::{InMemorySurveyStore, ScriptedFailure};
