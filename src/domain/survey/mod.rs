//! Survey domain module.
//!
//! The stored submission (`SurveyRecord`) and the context captured with it.
//! Records are created once per submission and never updated or deleted.

mod record;
mod session_hash;

pub use record::{SurveyContext, SurveyRecord, DEFAULT_SOURCE, PERSISTED_QUESTIONS};
pub use session_hash::hash_email_session;
