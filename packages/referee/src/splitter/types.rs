//! Types produced by the section splitter.

use serde::Serialize;

/// One `## `-introduced block of a comparison document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Text of the header line, trimmed.
    pub title: String,

    /// Everything between this header and the next one, trimmed. May be empty.
    pub content: String,

    /// Whether the title matched a recommendation trigger phrase.
    pub is_recommendation: bool,
}

impl Section {
    /// Reassemble the section as markdown, without the leading newline.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        if self.content.is_empty() {
            format!("## {}\n", self.title)
        } else {
            format!("## {}\n{}", self.title, self.content)
        }
    }
}

/// A comparison document split into a summary and ordered sections.
///
/// Built fresh from each API response and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    /// Free text before the first section, with any title line removed.
    pub summary: String,

    /// Sections in source order. Repeated titles are kept.
    pub sections: Vec<Section>,
}

impl ParsedResult {
    /// True when there is neither a summary nor any section to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.sections.is_empty()
    }

    /// Sections classified as recommendations.
    pub fn recommendations(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_recommendation)
    }

    /// Sections describing a single comparison dimension.
    pub fn dimensions(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_recommendation)
    }

    /// Rebuild a markdown document with the same summary and section order.
    ///
    /// For documents without indented `## ` lines the output splits back
    /// into the same summary and sections, modulo whitespace. Trimming an
    /// indented `  ## ` at the start of the summary or a body turns it into
    /// a boundary, so such documents gain sections on a second pass.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = self.summary.clone();
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.to_markdown());
        }
        out
    }
}
