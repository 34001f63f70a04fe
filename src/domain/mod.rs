//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `scoring` - Pure score engine: aggregation, normalisation, plotting, classification
//! - `survey` - The stored submission record and its context
//! - `report` - Narrative responses chosen from an analysis

pub mod foundation;
pub mod report;
pub mod scoring;
pub mod survey;
