//! Scoring data configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Locations of the question catalogue and narrative templates
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Question catalogue with per-response weights
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,

    /// Category narratives keyed by perspective type
    #[serde(default = "default_templates_path")]
    pub templates_path: PathBuf,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
            templates_path: default_templates_path(),
        }
    }
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("data/questions_responses.json")
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("data/response_templates.json")
}
