//! Ternary plot projection.

use serde::{Deserialize, Serialize};

use super::AxisScores;

/// sin(60°) as fixed by the stored plot coordinates.
pub const SIN_60: f64 = 0.866;

/// Cartesian position of a score inside the equilateral ternary triangle.
///
/// Vertices: PreModern at (100, 0), Modern at (50, 86.6), PostModern at
/// (0, 0). Coordinates are rounded to two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Projects three axis scores (raw totals or percentages) onto the plane.
    ///
    /// Returns the origin when the scores total zero.
    pub fn from_scores(scores: &AxisScores) -> Self {
        let total = scores.sum();
        if total == 0.0 {
            return Self::ORIGIN;
        }

        let x = (2.0 * scores.pre_modern + scores.modern) / (2.0 * total) * 100.0;
        let y = (scores.modern * SIN_60) / total * 100.0;

        Self {
            x: round_to_cents(x),
            y: round_to_cents(y),
        }
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::ScoreVector;

    fn project(pre: u32, modern: u32, post: u32) -> PlotPoint {
        PlotPoint::from_scores(&ScoreVector::new(pre, modern, post).into())
    }

    #[test]
    fn zero_scores_project_to_origin() {
        assert_eq!(project(0, 0, 0), PlotPoint::ORIGIN);
    }

    #[test]
    fn vertices_match_fixed_constants() {
        assert_eq!(project(600, 0, 0), PlotPoint { x: 100.0, y: 0.0 });
        assert_eq!(project(0, 600, 0), PlotPoint { x: 50.0, y: 86.6 });
        assert_eq!(project(0, 0, 600), PlotPoint { x: 0.0, y: 0.0 });
    }

    #[test]
    fn mixed_scores_round_to_two_decimals() {
        // x = (500 + 300) / 1400 * 100 = 57.142..., y = 300 * 0.866 / 700 * 100 = 37.114...
        assert_eq!(project(250, 300, 150), PlotPoint { x: 57.14, y: 37.11 });
    }

    #[test]
    fn projection_is_scale_invariant() {
        let raw = project(250, 300, 150);
        let percentages = PlotPoint::from_scores(&AxisScores::new(25.0, 30.0, 15.0));
        assert_eq!(raw, percentages);
    }
}
