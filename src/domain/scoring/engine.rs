//! Score engine - Turns raw answers into scores, a plot point and a perspective.

use serde::Serialize;
use std::sync::Arc;

use super::{
    AxisScores, NormalizedScore, PerspectiveAnalysis, PlotPoint, RawAnswers, ScoreVector,
    ScoringError, WeightLookup, WeightTable,
};

/// Everything derived from one submission's answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scorecard {
    pub vector: ScoreVector,
    pub normalized: NormalizedScore,
    pub plot_point: PlotPoint,
    pub analysis: PerspectiveAnalysis,
}

impl Scorecard {
    pub fn description(&self) -> String {
        self.analysis.describe()
    }
}

/// Stateless scoring over a shared, read-only weight table.
///
/// Cloning is cheap; clones share the same table.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    weights: Arc<WeightTable>,
}

impl ScoreEngine {
    pub fn new(weights: WeightTable) -> Self {
        Self {
            weights: Arc::new(weights),
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Sums the weight triples of every answered question.
    ///
    /// Skipped answers and unknown question ids are ignored.
    ///
    /// # Errors
    ///
    /// `UnknownAnswerCode` when a known question is answered with a code
    /// that has no registered weights.
    pub fn aggregate(&self, answers: &RawAnswers) -> Result<ScoreVector, ScoringError> {
        answers
            .answered()
            .try_fold(ScoreVector::ZERO, |total, (question, code)| {
                match self.weights.lookup(question, code) {
                    WeightLookup::Found(weights) => Ok(total.add(weights)),
                    WeightLookup::UnknownQuestion => Ok(total),
                    WeightLookup::UnknownCode => {
                        Err(ScoringError::unknown_answer_code(question, code))
                    }
                }
            })
    }

    pub fn normalize(vector: &ScoreVector) -> NormalizedScore {
        NormalizedScore::from_vector(vector)
    }

    pub fn to_plot_point(scores: impl Into<AxisScores>) -> PlotPoint {
        PlotPoint::from_scores(&scores.into())
    }

    pub fn classify(scores: impl Into<AxisScores>) -> Result<PerspectiveAnalysis, ScoringError> {
        PerspectiveAnalysis::classify(&scores.into())
    }

    pub fn describe(analysis: &PerspectiveAnalysis) -> String {
        analysis.describe()
    }

    /// Runs the full pipeline: aggregate, normalise, project, classify.
    ///
    /// # Errors
    ///
    /// Any aggregation error, or `ScoresDoNotSumTo100` when no answer could
    /// be scored.
    pub fn score(&self, answers: &RawAnswers) -> Result<Scorecard, ScoringError> {
        let vector = self.aggregate(answers)?;
        let normalized = Self::normalize(&vector);
        let plot_point = Self::to_plot_point(vector);
        let analysis = Self::classify(normalized)?;

        Ok(Scorecard {
            vector,
            normalized,
            plot_point,
            analysis,
        })
    }
}
