//! Section splitting engine.
//!
//! Splits a comparison document on the literal `"\n## "` delimiter. No
//! markdown validation happens here; anything that is not exactly that
//! delimiter passes through as text.

use regex::Regex;
use std::sync::LazyLock;

use super::config::RecommendationTriggers;
use super::types::{ParsedResult, Section};

/// Literal boundary between sections.
pub const SECTION_DELIMITER: &str = "\n## ";

/// Leading title line: a single `#`, horizontal whitespace, the rest of the
/// line, and at most one blank line after it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[ \t]+[^\n]*(?:\n|$)(?:[ \t\r]*\n)?").expect("valid regex"));

/// Splits comparison markdown into a summary and classified sections.
#[derive(Debug, Clone, Default)]
pub struct SectionSplitter {
    triggers: RecommendationTriggers,
}

impl SectionSplitter {
    /// Create a splitter with a custom trigger set.
    #[must_use]
    pub fn new(triggers: RecommendationTriggers) -> Self {
        Self { triggers }
    }

    /// Split a document. Never fails; missing structure yields an empty
    /// summary and/or no sections.
    #[must_use]
    pub fn split(&self, markdown: &str) -> ParsedResult {
        // A header on the very first line has no newline before it.
        let normalized;
        let source = if markdown.starts_with("## ") {
            normalized = format!("\n{markdown}");
            normalized.as_str()
        } else {
            markdown
        };

        let mut chunks = source.split(SECTION_DELIMITER);
        let summary = chunks.next().map(strip_title_line).unwrap_or_default();

        let sections: Vec<Section> = chunks.map(|chunk| self.section_from_chunk(chunk)).collect();

        tracing::debug!(
            sections = sections.len(),
            summary_len = summary.len(),
            "Split comparison document"
        );

        ParsedResult { summary, sections }
    }

    fn section_from_chunk(&self, chunk: &str) -> Section {
        let (title, content) = chunk.split_once('\n').unwrap_or((chunk, ""));
        let title = title.trim().to_string();
        let is_recommendation = self.triggers.matches(&title);

        Section {
            title,
            content: content.trim().to_string(),
            is_recommendation,
        }
    }
}

/// Remove a leading first-level title line and trim what remains.
fn strip_title_line(chunk: &str) -> String {
    TITLE_LINE.replace(chunk, "").trim().to_string()
}

/// Split a document using the default recommendation triggers.
///
/// # Examples
/// ```
/// use tech_stack_referee::splitter::parse;
///
/// let result = parse("# Title\n\nIntro text.\n## Performance\nFast.\n## Verdict\nChoose A.");
/// assert_eq!(result.summary, "Intro text.");
/// assert_eq!(result.sections.len(), 2);
/// assert!(result.sections[1].is_recommendation);
/// ```
#[must_use]
pub fn parse(markdown: &str) -> ParsedResult {
    SectionSplitter::default().split(markdown)
}
