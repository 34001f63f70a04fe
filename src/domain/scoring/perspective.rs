//! Perspective classification of a normalised score.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Axis, AxisScores, ScoringError};

/// Allowed deviation of the classification input from a total of 100.
pub const SUM_TOLERANCE: f64 = 0.1;

/// Above this maximum the primary axis is `Strong`.
pub const STRONG_THRESHOLD: f64 = 70.0;

/// Below this maximum no axis dominates and the result is `Mixed`.
pub const MIXED_THRESHOLD: f64 = 50.0;

/// Minimum gap between the two non-primary axes for a secondary influence.
pub const SECONDARY_GAP: f64 = 10.0;

/// How dominant the primary axis is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Pure,
    Strong,
    Moderate,
    Mixed,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Pure => "Pure",
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Mixed => "Mixed",
        }
    }

    /// Band for the highest axis score, checked Pure, Strong, Mixed, Moderate.
    pub fn for_max_score(max_score: f64) -> Self {
        if max_score == 100.0 {
            Strength::Pure
        } else if max_score > STRONG_THRESHOLD {
            Strength::Strong
        } else if max_score < MIXED_THRESHOLD {
            Strength::Mixed
        } else {
            Strength::Moderate
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived classification of one submission. Computed once, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveAnalysis {
    pub primary: Axis,
    pub strength: Strength,
    pub secondary: Option<Axis>,
    pub scores: AxisScores,
}

impl PerspectiveAnalysis {
    /// Classifies percentages that sum to 100 (within [`SUM_TOLERANCE`]).
    ///
    /// On exact ties the primary axis is the first in PreModern, Modern,
    /// PostModern order. Only `Moderate` results carry a secondary axis.
    ///
    /// # Errors
    ///
    /// `ScoresDoNotSumTo100` when the precondition on the input fails,
    /// including the all-zero score of an empty submission.
    pub fn classify(scores: &AxisScores) -> Result<Self, ScoringError> {
        let sum = scores.sum();
        if !((sum - 100.0).abs() <= SUM_TOLERANCE + 1e-9) {
            return Err(ScoringError::ScoresDoNotSumTo100 { sum });
        }

        let max_score = Axis::ALL
            .iter()
            .map(|axis| scores.get(*axis))
            .fold(f64::NEG_INFINITY, f64::max);
        let primary = Axis::ALL
            .into_iter()
            .find(|axis| scores.get(*axis) == max_score)
            .unwrap_or(Axis::PreModern);

        let strength = Strength::for_max_score(max_score);
        let secondary = match strength {
            Strength::Moderate => secondary_influence(scores, primary),
            _ => None,
        };

        Ok(Self {
            primary,
            strength,
            secondary,
            scores: *scores,
        })
    }

    pub fn max_score(&self) -> f64 {
        self.scores.get(self.primary)
    }

    /// Human-readable label, e.g. "Moderately Modern with PostModern influences".
    pub fn describe(&self) -> String {
        if self.max_score() == 100.0 {
            return format!("Pure {}", self.primary);
        }
        match (self.strength, self.secondary) {
            (Strength::Mixed, _) => "Mixed Perspective".to_string(),
            (Strength::Strong, _) => format!("Strongly {}", self.primary),
            (_, Some(secondary)) => {
                format!("Moderately {} with {} influences", self.primary, secondary)
            }
            (_, None) => format!("Moderately {}", self.primary),
        }
    }
}

impl fmt::Display for PerspectiveAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn secondary_influence(scores: &AxisScores, primary: Axis) -> Option<Axis> {
    let mut others = Axis::ALL.into_iter().filter(|axis| *axis != primary);
    let (first, second) = (others.next()?, others.next()?);

    let diff = scores.get(first) - scores.get(second);
    if diff.abs() <= SECONDARY_GAP {
        return None;
    }
    Some(if diff > 0.0 { first } else { second })
}
