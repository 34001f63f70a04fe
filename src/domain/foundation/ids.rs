//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Maximum stored length of a session identifier.
pub const MAX_SESSION_ID_LEN: usize = 64;

/// Opaque identifier of one survey-taking session.
///
/// Supplied by the caller or generated as a random UUID. Not unique per
/// stored row: the same session may submit several times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SurveySessionId(String);

impl SurveySessionId {
    /// Generates a new random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a session id from caller input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if value.len() > MAX_SESSION_ID_LEN {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("must be at most {} characters", MAX_SESSION_ID_LEN),
            ));
        }
        Ok(Self(value))
    }

    /// Uses the supplied id, or generates one when absent.
    pub fn or_generate(value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            Some(v) => Self::new(v),
            None => Ok(Self::generate()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveySessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SurveySessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SurveySessionId> for String {
    fn from(id: SurveySessionId) -> Self {
        id.0
    }
}

/// Backend-generated identifier of a stored survey row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_session_ids_are_unique_uuids() {
        let a = SurveySessionId::generate();
        let b = SurveySessionId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn session_id_trims_caller_input() {
        let id = SurveySessionId::new("  abc-123 ").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn session_id_rejects_empty() {
        assert_eq!(
            SurveySessionId::new("   "),
            Err(ValidationError::empty_field("session_id"))
        );
    }

    #[test]
    fn session_id_rejects_overlong() {
        let long = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(matches!(
            SurveySessionId::new(long),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn or_generate_keeps_supplied_value() {
        let id = SurveySessionId::or_generate(Some("given".to_string())).unwrap();
        assert_eq!(id.as_str(), "given");

        let generated = SurveySessionId::or_generate(None).unwrap();
        assert!(!generated.as_str().is_empty());
    }

    #[test]
    fn session_id_deserialization_validates() {
        let ok: SurveySessionId = serde_json::from_str("\"s-1\"").unwrap();
        assert_eq!(ok.as_str(), "s-1");
        assert!(serde_json::from_str::<SurveySessionId>("\"\"").is_err());
    }

    #[test]
    fn record_id_serializes_as_number() {
        let id = RecordId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(id.to_string(), "42");
    }
}
