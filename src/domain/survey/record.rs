//! The persisted survey row.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SurveySessionId;
use crate::domain::scoring::{PlotPoint, RawAnswers, Scorecard, ScoreVector};

/// Question ids stored in the six answer columns, in column order.
pub const PERSISTED_QUESTIONS: [&str; 6] = ["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"];

/// Default traffic source when the caller names none.
pub const DEFAULT_SOURCE: &str = "local";

/// Free-form context captured alongside a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyContext {
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    /// Opaque hash linking a submission to an email/session pair.
    #[serde(default)]
    pub session_hash: Option<String>,
}

impl Default for SurveyContext {
    fn default() -> Self {
        Self {
            browser: None,
            region: None,
            source: default_source(),
            session_hash: None,
        }
    }
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// One stored submission: raw answers plus the computed scores.
///
/// Immutable once built. Saving the same record twice stores two rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    session_id: SurveySessionId,
    answers: [Option<i64>; 6],
    scores: ScoreVector,
    plot_point: PlotPoint,
    context: SurveyContext,
}

impl SurveyRecord {
    pub fn new(
        session_id: SurveySessionId,
        answers: &RawAnswers,
        scores: ScoreVector,
        plot_point: PlotPoint,
        context: SurveyContext,
    ) -> Self {
        Self {
            session_id,
            answers: PERSISTED_QUESTIONS.map(|question| answers.get(question)),
            scores,
            plot_point,
            context,
        }
    }

    /// Builds the record from answers and their scorecard.
    pub fn from_scorecard(
        session_id: SurveySessionId,
        answers: &RawAnswers,
        card: &Scorecard,
        context: SurveyContext,
    ) -> Self {
        Self::new(session_id, answers, card.vector, card.plot_point, context)
    }

    pub fn session_id(&self) -> &SurveySessionId {
        &self.session_id
    }

    /// Answer codes for `Q1`..`Q6`, in column order.
    pub fn answers(&self) -> &[Option<i64>; 6] {
        &self.answers
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub fn plot_point(&self) -> &PlotPoint {
        &self.plot_point
    }

    pub fn context(&self) -> &SurveyContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_laid_out_by_persisted_question() {
        let answers = RawAnswers::new()
            .with_answer("Q1", 1)
            .with_answer("Q3", 4)
            .with_skipped("Q4")
            .with_answer("Q9", 2);

        let record = SurveyRecord::new(
            SurveySessionId::generate(),
            &answers,
            ScoreVector::new(150, 50, 0),
            PlotPoint { x: 87.5, y: 21.65 },
            SurveyContext::default(),
        );

        assert_eq!(
            record.answers(),
            &[Some(1), None, Some(4), None, None, None]
        );
        assert_eq!(record.scores().total(), 200);
    }

    #[test]
    fn context_defaults_source_to_local() {
        let context: SurveyContext = serde_json::from_str(r#"{"browser": "Firefox"}"#).unwrap();
        assert_eq!(context.browser.as_deref(), Some("Firefox"));
        assert_eq!(context.source, "local");
        assert_eq!(context.region, None);
        assert_eq!(SurveyContext::default().source, DEFAULT_SOURCE);
    }
}
