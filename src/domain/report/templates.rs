//! Narrative responses per category, chosen by perspective.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::scoring::{PerspectiveAnalysis, Strength};

/// Template key used for every `Mixed` result without a secondary axis.
pub const BALANCED_KEY: &str = "Modern-Balanced";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("malformed response templates: {0}")]
    Malformed(String),

    #[error("no '{perspective}' response for category '{category}'")]
    Missing {
        category: String,
        perspective: String,
    },
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        let code = match err {
            TemplateError::Malformed(_) => ErrorCode::ConfigurationError,
            TemplateError::Missing { .. } => ErrorCode::TemplateNotFound,
        };
        DomainError::new(code, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TemplateEntry {
    response: String,
}

/// Category narratives keyed by perspective type.
///
/// JSON shape: `{"categories": {"Truth": {"PreModern": {"response": ".."}, ..}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseTemplates {
    categories: BTreeMap<String, BTreeMap<String, TemplateEntry>>,
}

impl ResponseTemplates {
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(json).map_err(|e| TemplateError::Malformed(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            TemplateError::Malformed(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// The template key for an analysis.
    ///
    /// `"{primary}-{secondary}"` for non-strong results with a secondary axis,
    /// [`BALANCED_KEY`] for mixed results, otherwise the primary axis name.
    pub fn perspective_key(analysis: &PerspectiveAnalysis) -> String {
        match (analysis.strength, analysis.secondary) {
            (strength, Some(secondary)) if strength != Strength::Strong => {
                format!("{}-{}", analysis.primary, secondary)
            }
            (Strength::Mixed, _) => BALANCED_KEY.to_string(),
            _ => analysis.primary.to_string(),
        }
    }

    /// One response per category for the analysis.
    ///
    /// A blended key missing from a category falls back to its leading
    /// (primary) part.
    pub fn responses_for(
        &self,
        analysis: &PerspectiveAnalysis,
    ) -> Result<BTreeMap<String, String>, TemplateError> {
        let key = Self::perspective_key(analysis);
        let fallback = key.split('-').next().unwrap_or(&key);

        self.categories
            .iter()
            .map(|(category, entries)| {
                entries
                    .get(&key)
                    .or_else(|| entries.get(fallback))
                    .map(|entry| (category.clone(), entry.response.clone()))
                    .ok_or_else(|| TemplateError::Missing {
                        category: category.clone(),
                        perspective: key.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::{Axis, AxisScores};
    use std::io::Write;

    const TEMPLATES: &str = r#"{
        "categories": {
            "Truth": {
                "PreModern": {"response": "truth-pre"},
                "Modern": {"response": "truth-mod"},
                "Modern-PostModern": {"response": "truth-mod-post"}
            },
            "Morality": {
                "PreModern": {"response": "moral-pre"},
                "Modern": {"response": "moral-mod"}
            }
        }
    }"#;

    fn analysis(pre: f64, modern: f64, post: f64) -> PerspectiveAnalysis {
        PerspectiveAnalysis::classify(&AxisScores::new(pre, modern, post)).unwrap()
    }

    #[test]
    fn key_for_moderate_with_secondary_is_blend() {
        let key = ResponseTemplates::perspective_key(&analysis(10.0, 60.0, 30.0));
        assert_eq!(key, "Modern-PostModern");
    }

    #[test]
    fn key_for_mixed_is_balanced() {
        let key = ResponseTemplates::perspective_key(&analysis(35.7, 42.9, 21.4));
        assert_eq!(key, BALANCED_KEY);
    }

    #[test]
    fn key_for_strong_and_pure_is_primary() {
        assert_eq!(
            ResponseTemplates::perspective_key(&analysis(80.0, 10.0, 10.0)),
            "PreModern"
        );
        assert_eq!(
            ResponseTemplates::perspective_key(&analysis(0.0, 100.0, 0.0)),
            "Modern"
        );
    }

    #[test]
    fn responses_use_blend_or_fall_back_to_primary() {
        let templates = ResponseTemplates::from_json(TEMPLATES).unwrap();
        let responses = templates.responses_for(&analysis(10.0, 60.0, 30.0)).unwrap();

        assert_eq!(responses["Truth"], "truth-mod-post");
        assert_eq!(responses["Morality"], "moral-mod");
    }

    #[test]
    fn mixed_results_fall_back_to_modern() {
        let templates = ResponseTemplates::from_json(TEMPLATES).unwrap();
        let responses = templates.responses_for(&analysis(35.7, 42.9, 21.4)).unwrap();
        assert_eq!(responses["Truth"], "truth-mod");
    }

    #[test]
    fn missing_primary_template_is_an_error() {
        let templates = ResponseTemplates::from_json(TEMPLATES).unwrap();
        let pure_post = analysis(0.0, 0.0, 100.0);
        assert_eq!(pure_post.primary, Axis::PostModern);

        let result = templates.responses_for(&pure_post);
        assert!(matches!(result, Err(TemplateError::Missing { .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            ResponseTemplates::from_json("{\"categories\": 3}"),
            Err(TemplateError::Malformed(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEMPLATES.as_bytes()).unwrap();

        let templates = ResponseTemplates::load(file.path()).unwrap();
        assert_eq!(templates.categories().collect::<Vec<_>>(), vec!["Morality", "Truth"]);
    }
}
