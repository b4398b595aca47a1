//! Trigger phrases that mark a section as a recommendation.

/// Phrases recognised out of the box, in lower case.
pub const DEFAULT_TRIGGER_PHRASES: &[&str] = &["when to choose", "recommendation", "verdict"];

/// Case-insensitive substring predicate over a fixed set of phrases.
///
/// A title is a recommendation when its lower-cased form contains any phrase.
///
/// # Examples
/// ```
/// use tech_stack_referee::splitter::RecommendationTriggers;
///
/// let triggers = RecommendationTriggers::default().with_phrase("Bottom Line");
/// assert!(triggers.matches("Final Verdict"));
/// assert!(triggers.matches("The bottom line"));
/// assert!(!triggers.matches("Performance"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTriggers {
    phrases: Vec<String>,
}

impl RecommendationTriggers {
    /// Create an empty trigger set that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self { phrases: Vec::new() }
    }

    /// Create a trigger set from the given phrases.
    #[must_use]
    pub fn from_phrases(phrases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        phrases
            .into_iter()
            .fold(Self::empty(), |triggers, phrase| triggers.with_phrase(phrase))
    }

    /// Add a phrase. Blank phrases and duplicates are ignored.
    #[must_use]
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into().trim().to_lowercase();
        if !phrase.is_empty() && !self.phrases.contains(&phrase) {
            self.phrases.push(phrase);
        }
        self
    }

    /// Registered phrases, lower-cased, in insertion order.
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Check whether a section title matches any trigger phrase.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.phrases.iter().any(|phrase| title.contains(phrase.as_str()))
    }
}

impl Default for RecommendationTriggers {
    fn default() -> Self {
        Self::from_phrases(DEFAULT_TRIGGER_PHRASES.iter().copied())
    }
}
