//! Report module - Display content derived from a perspective analysis.

mod templates;

pub use templates::{ResponseTemplates, TemplateError, BALANCED_KEY};
