//! Property tests for the score engine.
//!
//! Uses the shipped question catalogue so the properties hold for the
//! weights actually loaded at startup.

use proptest::prelude::*;

use modernity_survey::domain::scoring::{
    Axis, AxisScores, PlotPoint, RawAnswers, ScoreEngine, ScoreVector, ScoringError, Strength,
    WeightTable,
};

const CATALOGUE: &str = include_str!("../data/questions_responses.json");

fn engine() -> ScoreEngine {
    ScoreEngine::new(WeightTable::from_catalogue_json(CATALOGUE).unwrap())
}

fn answers_from(codes: &[Option<i64>]) -> RawAnswers {
    let mut answers = RawAnswers::new();
    for (index, code) in codes.iter().enumerate() {
        answers.insert(format!("Q{}", index + 1), *code);
    }
    answers
}

fn answer_codes() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(1i64..=6), 6)
}

fn score_vectors() -> impl Strategy<Value = ScoreVector> {
    (0u32..10_000, 0u32..10_000, 0u32..10_000)
        .prop_map(|(pre, modern, post)| ScoreVector::new(pre, modern, post))
}

proptest! {
    #[test]
    fn aggregate_totals_one_hundred_per_answer(codes in answer_codes()) {
        let answers = answers_from(&codes);
        let vector = engine().aggregate(&answers).unwrap();
        let answered = codes.iter().filter(|code| code.is_some()).count() as u64;

        prop_assert_eq!(vector.total(), 100 * answered);
    }

    #[test]
    fn unknown_questions_do_not_change_the_vector(codes in answer_codes(), extra in 1i64..=6) {
        let answers = answers_from(&codes);
        let with_extra = answers.clone().with_answer("Q99", extra);
        let engine = engine();

        prop_assert_eq!(
            engine.aggregate(&answers).unwrap(),
            engine.aggregate(&with_extra).unwrap()
        );
    }

    #[test]
    fn normalize_sums_to_exactly_one_hundred(vector in score_vectors()) {
        let normalized = ScoreEngine::normalize(&vector);

        if vector.total() == 0 {
            prop_assert!(normalized.is_zero());
        } else {
            let tenths: u32 = Axis::ALL.iter().map(|axis| normalized.tenths(*axis)).sum();
            prop_assert_eq!(tenths, 1000);
            prop_assert_eq!(normalized.sum(), 100.0);
        }
    }

    #[test]
    fn normalize_stays_within_rounding_of_exact_share(vector in score_vectors()) {
        prop_assume!(vector.total() > 0);
        let normalized = ScoreEngine::normalize(&vector);

        for axis in [Axis::PreModern, Axis::Modern] {
            let exact = 100.0 * f64::from(vector.get(axis)) / vector.total() as f64;
            prop_assert!((normalized.get(axis) - exact).abs() <= 0.05 + 1e-9);
        }
    }

    #[test]
    fn plot_point_leaves_origin_unless_all_post_modern(codes in answer_codes()) {
        let vector = engine().aggregate(&answers_from(&codes)).unwrap();
        let point = ScoreEngine::to_plot_point(vector);

        if vector.pre_modern + vector.modern == 0 {
            prop_assert_eq!(point, PlotPoint::ORIGIN);
        } else {
            prop_assert_ne!(point, PlotPoint::ORIGIN);
        }
    }

    #[test]
    fn plot_point_stays_inside_triangle(vector in score_vectors()) {
        let point = ScoreEngine::to_plot_point(vector);

        prop_assert!((0.0..=100.0).contains(&point.x));
        prop_assert!((0.0..=86.6).contains(&point.y));
    }

    #[test]
    fn plot_point_is_scale_invariant(vector in score_vectors(), factor in 1u32..5) {
        let scaled = ScoreVector::new(
            vector.pre_modern * factor,
            vector.modern * factor,
            vector.post_modern * factor,
        );
        let unscaled = ScoreEngine::to_plot_point(vector);
        let rescaled = ScoreEngine::to_plot_point(scaled);

        prop_assert!((unscaled.x - rescaled.x).abs() <= 0.01 + 1e-9);
        prop_assert!((unscaled.y - rescaled.y).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn normalized_scores_always_classify(vector in score_vectors()) {
        prop_assume!(vector.total() > 0);
        let normalized = ScoreEngine::normalize(&vector);

        let analysis = ScoreEngine::classify(normalized).unwrap();
        let max = Axis::ALL
            .iter()
            .map(|axis| normalized.get(*axis))
            .fold(0.0, f64::max);

        prop_assert_eq!(normalized.get(analysis.primary), max);
        if analysis.strength != Strength::Moderate {
            prop_assert_eq!(analysis.secondary, None);
        }
        if let Some(secondary) = analysis.secondary {
            prop_assert_ne!(secondary, analysis.primary);
        }
    }

    #[test]
    fn classify_rejects_sums_off_by_more_than_tolerance(
        pre in 0.0f64..100.0,
        modern in 0.0f64..100.0,
        offset in 0.2f64..50.0,
        above in any::<bool>(),
    ) {
        let target = if above { 100.0 + offset } else { 100.0 - offset };
        let post = target - pre - modern;
        let result = ScoreEngine::classify(AxisScores::new(pre, modern, post));

        let is_sum_error = matches!(result, Err(ScoringError::ScoresDoNotSumTo100 { .. }));
        prop_assert!(is_sum_error);
    }
}

#[test]
fn all_pure_pre_modern_answers() {
    let answers = answers_from(&[Some(1); 6]);

    let card = engine().score(&answers).unwrap();

    assert_eq!(card.vector, ScoreVector::new(600, 0, 0));
    assert_eq!(card.normalized.pre_modern(), 100.0);
    assert_eq!(card.normalized.modern(), 0.0);
    assert_eq!(card.normalized.post_modern(), 0.0);
    assert_eq!(card.plot_point, PlotPoint { x: 100.0, y: 0.0 });
    assert_eq!(card.analysis.primary, Axis::PreModern);
    assert_eq!(card.analysis.strength, Strength::Pure);
    assert_eq!(card.description(), "Pure PreModern");
}

#[test]
fn mixed_answers_are_mixed() {
    // Q1 PreModern, Q2 Modern, Q3 Modern/PostModern, Q4 PreModern/Modern,
    // Q5 Modern, Q6 PreModern/PostModern -> (200, 300, 100)
    let answers = answers_from(&[Some(1), Some(2), Some(5), Some(4), Some(2), Some(6)]);
    let card = engine().score(&answers).unwrap();
    assert_eq!(card.vector, ScoreVector::new(200, 300, 100));
    assert_eq!(card.analysis.strength, Strength::Moderate);

    let normalized = ScoreEngine::normalize(&ScoreVector::new(250, 300, 150));
    assert_eq!(normalized.pre_modern(), 35.7);
    assert_eq!(normalized.modern(), 42.9);
    assert_eq!(normalized.post_modern(), 21.4);
    assert_eq!(normalized.sum(), 100.0);

    let analysis = ScoreEngine::classify(normalized).unwrap();
    assert_eq!(analysis.primary, Axis::Modern);
    assert_eq!(analysis.strength, Strength::Mixed);
    assert_eq!(analysis.secondary, None);
    assert_eq!(ScoreEngine::describe(&analysis), "Mixed Perspective");
}

#[test]
fn classify_tolerance_examples() {
    assert!(ScoreEngine::classify(AxisScores::new(30.0, 30.0, 30.0)).is_err());
    assert!(ScoreEngine::classify(AxisScores::new(33.3, 33.3, 33.4)).is_ok());
}

#[test]
fn exact_ties_prefer_earlier_axis() {
    let analysis = ScoreEngine::classify(AxisScores::new(50.0, 50.0, 0.0)).unwrap();
    assert_eq!(analysis.primary, Axis::PreModern);

    let analysis = ScoreEngine::classify(AxisScores::new(0.0, 50.0, 50.0)).unwrap();
    assert_eq!(analysis.primary, Axis::Modern);
}

#[test]
fn empty_submission_cannot_be_classified() {
    let result = engine().score(&RawAnswers::new());
    assert!(matches!(result, Err(ScoringError::ScoresDoNotSumTo100 { .. })));
}
