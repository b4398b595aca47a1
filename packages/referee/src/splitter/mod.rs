//! Section splitting for comparison documents.
//!
//! A comparison arrives as markdown with an optional `# ` title, a free
//! summary paragraph, and `## ` sections (one per comparison dimension plus
//! the final recommendation). This module turns it into a [`ParsedResult`].

mod config;
mod engine;
mod types;

pub use config::{RecommendationTriggers, DEFAULT_TRIGGER_PHRASES};
pub use engine::{parse, SectionSplitter, SECTION_DELIMITER};
pub use types::{ParsedResult, Section};
