//! Tech Stack Referee - Compare technology options side by side.
//!
//! This crate is a client for a comparison API that answers questions like
//! "React or Vue for an admin dashboard?" with a markdown document. The
//! document is split into sections and rendered as terminal cards, with
//! recommendation sections highlighted.
//!
//! # Example
//!
//! ```
//! use tech_stack_referee::splitter::parse;
//!
//! let parsed = parse("# React vs Vue\n\nBoth work.\n## Verdict\nPick React.");
//! assert_eq!(parsed.summary, "Both work.");
//! assert_eq!(parsed.sections[0].title, "Verdict");
//! assert!(parsed.sections[0].is_recommendation);
//! ```
//!
//! # Architecture
//!
//! - [`splitter`]: Markdown section splitting and recommendation detection
//! - [`types`]: API request and response types
//! - [`config`]: Configuration constants, validation and client config
//! - [`error`]: Error types and Result alias
//! - [`http`]: Blocking HTTP helpers with retry
//! - [`api`]: Comparison API trait and HTTP implementation
//! - [`form`]: Guided comparison form
//! - [`state`]: View state and its transitions
//! - [`chat`]: Chat transcript
//! - [`markdown`]: Markdown to terminal text
//! - [`render`]: Result cards and listings
//! - [`referee`]: Service tying the API to the state
//! - [`cli`]: Command-line interface

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod markdown;
pub mod referee;
pub mod render;
pub mod splitter;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use api::{ComparisonApi, HttpComparisonApi};
pub use config::ClientConfig;
pub use error::{RefereeError, Result};
pub use referee::Referee;
pub use render::{render_comparison, CardRenderer};
pub use splitter::{parse, ParsedResult, Section, SectionSplitter};
pub use types::{ComparisonRequest, ComparisonResponse};
