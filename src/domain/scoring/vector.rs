//! Score vectors: raw weighted totals and their normalised percentages.

use serde::{Deserialize, Serialize};

use super::{Axis, WeightTriple};

/// Tenths of a percent in a full normalised score.
const TENTHS_TOTAL: u32 = 1000;

/// Weighted vote totals per axis.
///
/// Each answered question adds a triple summing to 100, so the total of all
/// three components is `100 × answered questions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreVector {
    pub pre_modern: u32,
    pub modern: u32,
    pub post_modern: u32,
}

impl ScoreVector {
    pub const ZERO: Self = Self {
        pre_modern: 0,
        modern: 0,
        post_modern: 0,
    };

    pub fn new(pre_modern: u32, modern: u32, post_modern: u32) -> Self {
        Self {
            pre_modern,
            modern,
            post_modern,
        }
    }

    /// Component-wise addition of one answer's weights. Saturates at
    /// `u32::MAX` per axis.
    pub fn add(self, weights: &WeightTriple) -> Self {
        Self {
            pre_modern: self.pre_modern.saturating_add(weights.get(Axis::PreModern)),
            modern: self.modern.saturating_add(weights.get(Axis::Modern)),
            post_modern: self.post_modern.saturating_add(weights.get(Axis::PostModern)),
        }
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::PreModern => self.pre_modern,
            Axis::Modern => self.modern,
            Axis::PostModern => self.post_modern,
        }
    }

    /// Sum of all three axes. Widened so any three `u32` components fit.
    pub fn total(&self) -> u64 {
        u64::from(self.pre_modern) + u64::from(self.modern) + u64::from(self.post_modern)
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

/// Percentages per axis summing to exactly 100, or all zero when nothing
/// was scored.
///
/// Stored in tenths of a percent so the sum invariant is exact rather than
/// subject to floating point error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "AxisScores")]
pub struct NormalizedScore {
    tenths: [u32; 3],
}

impl NormalizedScore {
    pub const ZERO: Self = Self { tenths: [0; 3] };

    /// Scales a raw vector to percentages rounded to one decimal place.
    ///
    /// Each component is rounded half-to-even; the remainder needed to reach
    /// exactly 100 is then added to PostModern.
    pub fn from_vector(vector: &ScoreVector) -> Self {
        let total = vector.total();
        if total == 0 {
            return Self::ZERO;
        }

        let pre_modern = round_tenths(vector.pre_modern, total);
        let modern = round_tenths(vector.modern, total);
        let post_modern = TENTHS_TOTAL.saturating_sub(pre_modern + modern);

        Self {
            tenths: [pre_modern, modern, post_modern],
        }
    }

    /// Percentage of one axis, to one decimal place.
    pub fn get(&self, axis: Axis) -> f64 {
        f64::from(self.tenths[axis.index()]) / 10.0
    }

    /// Percentage of one axis in tenths of a percent.
    pub fn tenths(&self, axis: Axis) -> u32 {
        self.tenths[axis.index()]
    }

    pub fn pre_modern(&self) -> f64 {
        self.get(Axis::PreModern)
    }

    pub fn modern(&self) -> f64 {
        self.get(Axis::Modern)
    }

    pub fn post_modern(&self) -> f64 {
        self.get(Axis::PostModern)
    }

    /// Exact sum: 100.0, or 0.0 for the all-zero score.
    pub fn sum(&self) -> f64 {
        f64::from(self.tenths.iter().sum::<u32>()) / 10.0
    }

    pub fn is_zero(&self) -> bool {
        self.tenths == [0; 3]
    }
}

/// Rounds `1000 × part / total` to the nearest integer, ties to even.
fn round_tenths(part: u32, total: u64) -> u32 {
    let numerator = u64::from(part) * u64::from(TENTHS_TOTAL);
    let quotient = numerator / total;
    let twice_remainder = 2 * (numerator % total);

    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    // part <= total, so the result never exceeds 1000.
    rounded as u32
}

/// Three per-axis scores as plain floating point values.
///
/// Common input shape for classification and plotting, convertible from both
/// raw vectors and normalised scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    pub pre_modern: f64,
    pub modern: f64,
    pub post_modern: f64,
}

impl AxisScores {
    pub fn new(pre_modern: f64, modern: f64, post_modern: f64) -> Self {
        Self {
            pre_modern,
            modern,
            post_modern,
        }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::PreModern => self.pre_modern,
            Axis::Modern => self.modern,
            Axis::PostModern => self.post_modern,
        }
    }

    pub fn sum(&self) -> f64 {
        self.pre_modern + self.modern + self.post_modern
    }
}

impl From<ScoreVector> for AxisScores {
    fn from(vector: ScoreVector) -> Self {
        Self::new(
            f64::from(vector.pre_modern),
            f64::from(vector.modern),
            f64::from(vector.post_modern),
        )
    }
}

impl From<NormalizedScore> for AxisScores {
    fn from(score: NormalizedScore) -> Self {
        Self::new(score.pre_modern(), score.modern(), score.post_modern())
    }
}
