//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SurveyStore` - Hands out connections to the survey results store
//! - `StoreConnection` - Transactional insert of one survey record

mod survey_store;

pub use survey_store::{FailureKind, StoreConnection, StoreError, SurveyStore};
