//! Opaque email/session hash stored with a submission.

use sha2::{Digest, Sha256};

use crate::domain::foundation::SurveySessionId;

/// Lower-hex SHA-256 of the normalised email joined with the session id.
///
/// Lets repeat submissions from one respondent be correlated without storing
/// the email itself.
pub fn hash_email_session(email: &str, session_id: &SurveySessionId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    hasher.update(b":");
    hasher.update(session_id.as_str().as_bytes());
    format!("{:x}", hasher.finalize())
}
