//! Scoring Module - Pure scoring of survey answers.
//!
//! Turns `{question id -> answer code}` into weighted totals, percentages,
//! a ternary plot coordinate and a perspective classification.
//!
//! # Components
//!
//! - `WeightTable` - Registered weight triple per (question, answer code)
//! - `ScoreVector` / `NormalizedScore` - Raw totals and exact-100 percentages
//! - `PlotPoint` - Equilateral-triangle projection of a score
//! - `PerspectiveAnalysis` - Primary axis, strength band, secondary influence
//! - `ScoreEngine` - Facade running the whole pipeline
//!
//! All functions are pure and free of shared mutable state, so the engine
//! can be used from any number of tasks at once.

mod answers;
mod axis;
mod engine;
mod errors;
mod perspective;
mod plot;
mod vector;
mod weights;

pub use answers::RawAnswers;
pub use axis::Axis;
pub use engine::{ScoreEngine, Scorecard};
pub use errors::ScoringError;
pub use perspective::{
    PerspectiveAnalysis, Strength, MIXED_THRESHOLD, SECONDARY_GAP, STRONG_THRESHOLD,
    SUM_TOLERANCE,
};
pub use plot::{PlotPoint, SIN_60};
pub use vector::{AxisScores, NormalizedScore, ScoreVector};
pub use weights::{WeightLookup, WeightTable, WeightTriple, WEIGHT_PER_ANSWER};
