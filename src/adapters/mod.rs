//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL survey store and pool lifecycle
//! - `memory` - In-memory survey store with scripted failures

pub mod memory;
pub mod postgres;

pub use memory::{InMemorySurveyStore, ScriptedFailure};
pub use postgres::{connect_pool, run_migrations, PostgresSurveyStore};
