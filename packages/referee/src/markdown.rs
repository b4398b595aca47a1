//! Markdown to terminal text.
//!
//! Renders section bodies for display: inline emphasis becomes ANSI styling
//! (when the terminal supports it), lists get bullets or numbers, and
//! paragraphs are wrapped to the card width.

use console::style;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use textwrap::Options as WrapOptions;

/// Indentation per list nesting level.
const LIST_INDENT: &str = "  ";

/// Indentation of code block lines.
const CODE_INDENT: &str = "    ";

/// Renders markdown to wrapped terminal text.
#[derive(Debug, Clone, Copy)]
pub struct TerminalMarkdown {
    width: usize,
}

impl TerminalMarkdown {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    /// Render a markdown fragment. Never fails; unknown constructs fall
    /// back to their text.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut writer = Writer::new(self.width);
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
        for event in parser {
            writer.event(event);
        }
        writer.finish()
    }
}

/// Render with the given wrap width.
#[must_use]
pub fn render_markdown(markdown: &str, width: usize) -> String {
    TerminalMarkdown::new(width).render(markdown)
}

#[derive(Default)]
struct InlineStyle {
    bold: usize,
    italic: usize,
    strike: usize,
}

struct Writer {
    width: usize,
    out: String,
    buffer: String,
    style: InlineStyle,
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    /// Open links: destination and where their text starts in the buffer.
    links: Vec<(String, usize)>,
    code: Option<String>,
    last_block_in_list: bool,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            width,
            out: String::new(),
            buffer: String::new(),
            style: InlineStyle::default(),
            lists: Vec::new(),
            item_marker: None,
            links: Vec::new(),
            code: None,
            last_block_in_list: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.push_inline(&text);
                }
            }
            Event::Code(code) => self
                .buffer
                .push_str(&style(code.to_string()).yellow().to_string()),
            Event::Html(html) | Event::InlineHtml(html) => self.buffer.push_str(&html),
            Event::SoftBreak => self.buffer.push(' '),
            Event::HardBreak => self.buffer.push('\n'),
            Event::Rule => {
                self.flush();
                let rule = "─".repeat(self.width.min(40));
                self.push_block(&style(rule).dim().to_string(), false);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.style.bold += 1;
            }
            Tag::Strong => self.style.bold += 1,
            Tag::Emphasis => self.style.italic += 1,
            Tag::Strikethrough => self.style.strike += 1,
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                self.item_marker = Some(self.next_marker());
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                if let CodeBlockKind::Fenced(lang) = kind {
                    tracing::trace!(lang = %lang, "Rendering fenced code block");
                }
                self.code = Some(String::new());
            }
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.links.push((dest_url.to_string(), self.buffer.len()));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.style.bold = self.style.bold.saturating_sub(1);
                self.flush();
            }
            TagEnd::Strong => self.style.bold = self.style.bold.saturating_sub(1),
            TagEnd::Emphasis => self.style.italic = self.style.italic.saturating_sub(1),
            TagEnd::Strikethrough => self.style.strike = self.style.strike.saturating_sub(1),
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                self.item_marker = None;
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let block = code
                        .trim_end_matches('\n')
                        .lines()
                        .map(|line| format!("{CODE_INDENT}{}", style(line).cyan()))
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.push_block(&block, !self.lists.is_empty());
                }
            }
            TagEnd::Link | TagEnd::Image => {
                if let Some((url, start)) = self.links.pop() {
                    let text = self.buffer.get(start..).unwrap_or_default();
                    if !url.is_empty() && console::strip_ansi_codes(text) != url {
                        self.buffer.push_str(&style(format!(" ({url})")).dim().to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn push_inline(&mut self, text: &str) {
        let mut styled = style(text);
        if self.style.bold > 0 {
            styled = styled.bold();
        }
        if self.style.italic > 0 {
            styled = styled.italic();
        }
        if self.style.strike > 0 {
            styled = styled.strikethrough();
        }
        self.buffer.push_str(&styled.to_string());
    }

    fn next_marker(&mut self) -> String {
        match self.lists.last_mut() {
            Some(Some(number)) => {
                let marker = format!("{number}. ");
                *number += 1;
                marker
            }
            _ => "• ".to_string(),
        }
    }

    /// Wrap the pending inline text as one block.
    fn flush(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        let marker = self.item_marker.take();
        let text = text.trim();
        if text.is_empty() {
            self.item_marker = marker;
            return;
        }

        let depth = self.lists.len();
        let indent = LIST_INDENT.repeat(depth.saturating_sub(1));
        let (first, rest) = match marker {
            Some(marker) => {
                let hang = " ".repeat(console::measure_text_width(&marker));
                (format!("{indent}{marker}"), format!("{indent}{hang}"))
            }
            None if depth > 0 => {
                let hang = LIST_INDENT.to_string();
                (format!("{indent}{hang}"), format!("{indent}{hang}"))
            }
            None => (String::new(), String::new()),
        };

        let options = WrapOptions::new(self.width)
            .initial_indent(&first)
            .subsequent_indent(&rest);
        let wrapped = textwrap::fill(text, options);
        self.push_block(&wrapped, depth > 0);
    }

    fn push_block(&mut self, block: &str, in_list: bool) {
        if !self.out.is_empty() {
            if in_list && self.last_block_in_list {
                self.out.push('\n');
            } else {
                self.out.push_str("\n\n");
            }
        }
        self.out.push_str(block);
        self.last_block_in_list = in_list;
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}
