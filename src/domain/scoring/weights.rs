//! Answer weight table.
//!
//! Maps `(question id, choice code)` to a weight triple. The table is loaded
//! once at startup from the question catalogue and then shared read-only.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{Axis, ScoringError};

/// Total weight every registered answer distributes across the axes.
pub const WEIGHT_PER_ANSWER: u32 = 100;

/// Weights one answer contributes to each axis. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightTriple {
    pre_modern: u32,
    modern: u32,
    post_modern: u32,
}

impl WeightTriple {
    /// Creates a triple, rejecting ones that do not sum to 100.
    pub fn new(pre_modern: u32, modern: u32, post_modern: u32) -> Result<Self, ScoringError> {
        let sum = pre_modern + modern + post_modern;
        if sum != WEIGHT_PER_ANSWER {
            return Err(ScoringError::invalid_weight_table(format!(
                "weights ({}, {}, {}) sum to {}, expected {}",
                pre_modern, modern, post_modern, sum, WEIGHT_PER_ANSWER
            )));
        }
        Ok(Self {
            pre_modern,
            modern,
            post_modern,
        })
    }

    /// A triple putting the whole weight on one axis.
    pub fn pure(axis: Axis) -> Self {
        let mut components = [0; 3];
        components[axis.index()] = WEIGHT_PER_ANSWER;
        Self {
            pre_modern: components[0],
            modern: components[1],
            post_modern: components[2],
        }
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::PreModern => self.pre_modern,
            Axis::Modern => self.modern,
            Axis::PostModern => self.post_modern,
        }
    }

    pub fn components(&self) -> [u32; 3] {
        [self.pre_modern, self.modern, self.post_modern]
    }
}

/// Registered weight triples per question, indexed by choice code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightTable {
    // Choice code `k` lives at index `k - 1`.
    questions: BTreeMap<String, Vec<WeightTriple>>,
}

/// Outcome of looking up one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightLookup<'a> {
    Found(&'a WeightTriple),
    /// The question id is not in the table; the answer is ignored.
    UnknownQuestion,
    /// The question exists but the code is not registered for it.
    UnknownCode,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the ordered choices of a question. The first triple is
    /// choice code 1.
    pub fn with_question(
        mut self,
        question: impl Into<String>,
        choices: Vec<WeightTriple>,
    ) -> Self {
        self.questions.insert(question.into(), choices);
        self
    }

    pub fn lookup(&self, question: &str, code: i64) -> WeightLookup<'_> {
        let Some(choices) = self.questions.get(question) else {
            return WeightLookup::UnknownQuestion;
        };
        let index = usize::try_from(code).ok().and_then(|c| c.checked_sub(1));
        match index.and_then(|i| choices.get(i)) {
            Some(triple) => WeightLookup::Found(triple),
            None => WeightLookup::UnknownCode,
        }
    }

    pub fn contains_question(&self, question: &str) -> bool {
        self.questions.contains_key(question)
    }

    /// Number of registered choices for a question.
    pub fn choice_count(&self, question: &str) -> usize {
        self.questions.get(question).map_or(0, Vec::len)
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.questions.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Builds the table from the question catalogue JSON.
    ///
    /// The catalogue has the shape `{"questions": {"Q1": {"text": .., "responses": [..]}}}`
    /// where each response carries `{"id": .., "text": .., "scores": [p, m, q]}`.
    pub fn from_catalogue_json(json: &str) -> Result<Self, ScoringError> {
        let catalogue: Catalogue = serde_json::from_str(json).map_err(|e| {
            ScoringError::invalid_weight_table(format!("malformed catalogue: {}", e))
        })?;

        if catalogue.questions.is_empty() {
            return Err(ScoringError::invalid_weight_table("catalogue has no questions"));
        }

        let mut table = WeightTable::new();
        for (question_id, question) in catalogue.questions {
            if question.responses.is_empty() {
                return Err(ScoringError::invalid_weight_table(format!(
                    "question '{}' has no responses",
                    question_id
                )));
            }
            if question.responses.len() > usize::from(u8::MAX) {
                return Err(ScoringError::invalid_weight_table(format!(
                    "question '{}' has too many responses",
                    question_id
                )));
            }
            let choices = question
                .responses
                .iter()
                .map(|response| triple_from_scores(&question_id, response))
                .collect::<Result<Vec<_>, _>>()?;
            table = table.with_question(question_id, choices);
        }
        Ok(table)
    }

    /// Reads and parses the question catalogue from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScoringError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ScoringError::invalid_weight_table(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_catalogue_json(&json)
    }
}

#[derive(Debug, Deserialize)]
struct Catalogue {
    questions: BTreeMap<String, CatalogueQuestion>,
}

#[derive(Debug, Deserialize)]
struct CatalogueQuestion {
    #[allow(dead_code)]
    #[serde(default)]
    text: String,
    responses: Vec<CatalogueResponse>,
}

#[derive(Debug, Deserialize)]
struct CatalogueResponse {
    #[serde(default)]
    id: String,
    scores: [f64; 3],
}

fn triple_from_scores(
    question_id: &str,
    response: &CatalogueResponse,
) -> Result<WeightTriple, ScoringError> {
    let mut components = [0u32; 3];
    for (slot, score) in components.iter_mut().zip(response.scores) {
        if !score.is_finite() || score < 0.0 || score.fract() != 0.0 || score > 100.0 {
            return Err(ScoringError::invalid_weight_table(format!(
                "response '{}' of question '{}' has invalid weight {}",
                response.id, question_id, score
            )));
        }
        *slot = score as u32;
    }
    WeightTriple::new(components[0], components[1], components[2])
}
