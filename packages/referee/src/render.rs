//! Terminal rendering of comparison results, chat messages and API listings.
//!
//! A comparison becomes a header, an optional summary card, and one card per
//! section. Recommendation sections get their own emphasis.

use console::style;

use crate::chat::{ChatMessage, Role};
use crate::config::MIN_WRAP_WIDTH;
use crate::markdown::render_markdown;
use crate::splitter::{ParsedResult, Section, SectionSplitter};
use crate::types::{Categories, ComparisonResponse, HealthResponse, HealthStatus, Suggestion};

/// Shown while a guided comparison is loading.
pub const LOADING_MESSAGE: &str = "🤔 Analyzing options and building comparison...";

/// Shown while a chat answer is loading.
pub const CHAT_LOADING_MESSAGE: &str = "Analyzing and comparing your options...";

/// Fallback text for failures without a message.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Left border of card bodies.
const CARD_BORDER: &str = "│ ";

/// Metadata shown above the cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultHeader<'a> {
    pub query: Option<&'a str>,
    pub execution_time: Option<f64>,
}

/// Renders comparisons as cards at a fixed width.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    width: usize,
    splitter: SectionSplitter,
}

impl CardRenderer {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WRAP_WIDTH),
            splitter: SectionSplitter::default(),
        }
    }

    /// Use a custom splitter (e.g., with extra recommendation triggers).
    #[must_use]
    pub fn with_splitter(mut self, splitter: SectionSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Render an API response: an error card on failure, cards otherwise.
    #[must_use]
    pub fn render_response(&self, response: &ComparisonResponse) -> String {
        if !response.success {
            return self.render_error(response.error.as_deref().unwrap_or(UNKNOWN_ERROR));
        }

        let parsed = self.splitter.split(&response.comparison);
        let header = ResultHeader {
            query: Some(response.query.as_str()).filter(|q| !q.is_empty()),
            execution_time: response.display_time(),
        };
        self.render_parsed(&header, &parsed)
    }

    /// Render raw comparison markdown without API metadata.
    #[must_use]
    pub fn render_markdown_document(&self, markdown: &str) -> String {
        self.render_parsed(&ResultHeader::default(), &self.splitter.split(markdown))
    }

    /// Render an already split document.
    #[must_use]
    pub fn render_parsed(&self, header: &ResultHeader<'_>, parsed: &ParsedResult) -> String {
        let mut blocks = vec![self.render_header(header)];

        if !parsed.summary.is_empty() {
            blocks.push(self.card(
                &style("🎯 Quick Summary").bold().to_string(),
                &parsed.summary,
            ));
        }

        blocks.extend(parsed.sections.iter().map(|section| self.render_section(section)));
        blocks.join("\n\n")
    }

    fn render_header(&self, header: &ResultHeader<'_>) -> String {
        let mut title = style("📊 Comparison Complete").bold().to_string();
        if let Some(time) = header.execution_time {
            title.push_str(&format!("  {}", style(format!("⚡ {time:.1}s")).yellow()));
        }
        match header.query {
            Some(query) => format!("{title}\n{}", style(query).dim()),
            None => title,
        }
    }

    fn render_section(&self, section: &Section) -> String {
        let heading = if section.is_recommendation {
            style(format!("💡 {}", section.title)).green().bold().to_string()
        } else {
            style(format!("📌 {}", section.title)).cyan().bold().to_string()
        };
        self.card(&heading, &section.content)
    }

    /// Error card with the message.
    #[must_use]
    pub fn render_error(&self, message: &str) -> String {
        let body = textwrap::fill(message, self.body_width());
        self.bordered(&style("⚠️ Error").red().bold().to_string(), &body)
    }

    /// One chat transcript entry.
    #[must_use]
    pub fn render_chat_message(&self, message: &ChatMessage) -> String {
        match message.role {
            Role::User => format!("👤 {}", style(&message.content).bold()),
            Role::Assistant if message.is_error => {
                format!("🤖 {}", style(&message.content).red())
            }
            Role::Assistant => {
                let mut heading = "🤖".to_string();
                if let Some(time) = message.execution_time.filter(|t| *t > 0.0) {
                    heading.push_str(&format!(" {}", style(format!("⚡ {time:.2}s")).yellow()));
                }
                let body = render_markdown(&message.content, self.body_width());
                self.bordered(&heading, &body)
            }
        }
    }

    fn card(&self, heading: &str, markdown: &str) -> String {
        let body = render_markdown(markdown, self.body_width());
        self.bordered(heading, &body)
    }

    fn bordered(&self, heading: &str, body: &str) -> String {
        let mut out = heading.to_string();
        for line in body.lines() {
            out.push('\n');
            if line.is_empty() {
                out.push_str(CARD_BORDER.trim_end());
            } else {
                out.push_str(CARD_BORDER);
                out.push_str(line);
            }
        }
        out
    }

    fn body_width(&self) -> usize {
        self.width - console::measure_text_width(CARD_BORDER)
    }
}

/// Render an API response as cards.
#[must_use]
pub fn render_comparison(response: &ComparisonResponse, width: usize) -> String {
    CardRenderer::new(width).render_response(response)
}

/// Health summary for the `health` command.
#[must_use]
pub fn render_health(health: &HealthResponse) -> String {
    let status = match health.status {
        HealthStatus::Healthy => style(health.status.as_str()).green(),
        HealthStatus::Degraded => style(health.status.as_str()).yellow(),
        HealthStatus::Unhealthy | HealthStatus::Unknown => style(health.status.as_str()).red(),
    };

    let mut lines = vec![
        format!("{} {status}", style("Status:").bold()),
        format!("  Message: {}", health.message),
        format!("  Version: {}", health.version),
    ];
    if let Some(available) = health.kiro_cli_available {
        lines.push(format!("  Agent CLI available: {}", yes_no(available)));
    }
    if let Some(configured) = health.agent_configured {
        lines.push(format!("  Agent configured: {}", yes_no(configured)));
    }
    lines.join("\n")
}

/// Numbered suggestion list; numbers are 1-based for `/suggest N`.
#[must_use]
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return style("No suggestions available").dim().to_string();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{:>2}. {} {}\n    {}",
                i + 1,
                style(&s.title).bold(),
                style(format!("[{}]", s.category)).dim(),
                s.query
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Category catalogue listing.
#[must_use]
pub fn render_categories(categories: &Categories) -> String {
    if categories.is_empty() {
        return style("No categories available").dim().to_string();
    }
    categories
        .iter()
        .map(|c| format!("{}\n  {}", style(&c.name).bold(), c.options.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
