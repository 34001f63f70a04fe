//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `connect_pool` / `run_migrations` - Pool lifecycle and schema setup
//! - `PostgresSurveyStore` - Transactional inserts into `survey_results`

mod pool;
mod survey_store;

pub use pool::{connect_pool, run_migrations};
pub use survey_store::{PgStoreConnection, PostgresSurveyStore};
