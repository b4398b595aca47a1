//! Guided comparison form.
//!
//! Collects two options from a category plus optional project context and
//! turns them into a [`ComparisonRequest`]. A custom mode bypasses the
//! guided fields and sends a free-text query as-is.

use crate::config::{
    validate_choice, validate_query, validate_team_size, DEFAULT_CATEGORY, DEFAULT_TEAM_SIZE,
    EXPERTISE_CHOICES, TIMELINE_CHOICES,
};
use crate::error::{RefereeError, Result};
use crate::types::{Categories, ComparisonContext, ComparisonRequest};

/// State of the guided comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedForm {
    pub category: String,
    pub option1: String,
    pub option2: String,
    pub use_case: String,
    pub team_size: Option<u32>,
    pub timeline: String,
    pub expertise: String,
    pub custom_query: String,
    pub use_custom: bool,
}

impl Default for GuidedForm {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            option1: String::new(),
            option2: String::new(),
            use_case: String::new(),
            team_size: Some(DEFAULT_TEAM_SIZE),
            timeline: String::new(),
            expertise: String::new(),
            custom_query: String::new(),
            use_custom: false,
        }
    }
}

impl GuidedForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form in custom-query mode.
    #[must_use]
    pub fn custom(query: impl Into<String>) -> Self {
        Self {
            custom_query: query.into(),
            use_custom: true,
            ..Self::default()
        }
    }

    /// Switch category. Both selected options are cleared.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.option1.clear();
        self.option2.clear();
    }

    /// Options offered for the first choice.
    #[must_use]
    pub fn available_options<'a>(&self, categories: &'a Categories) -> &'a [String] {
        categories.options(&self.category).unwrap_or_default()
    }

    /// Options offered for the second choice: everything except option 1.
    #[must_use]
    pub fn second_options<'a>(&self, categories: &'a Categories) -> Vec<&'a str> {
        self.available_options(categories)
            .iter()
            .map(String::as_str)
            .filter(|opt| *opt != self.option1)
            .collect()
    }

    /// Build the API request from the form.
    ///
    /// # Examples
    /// ```
    /// use tech_stack_referee::form::GuidedForm;
    ///
    /// let mut form = GuidedForm::new();
    /// form.option1 = "React".into();
    /// form.option2 = "Vue".into();
    /// form.use_case = "a dashboard".into();
    ///
    /// let request = form.build_request().unwrap();
    /// assert_eq!(request.query, "Compare React vs Vue for a dashboard");
    /// assert_eq!(request.context.unwrap().team_size, Some(3));
    /// ```
    pub fn build_request(&self) -> Result<ComparisonRequest> {
        if self.use_custom {
            validate_query(&self.custom_query)?;
            return Ok(ComparisonRequest::new(self.custom_query.clone()));
        }

        if self.option1.trim().is_empty() || self.option2.trim().is_empty() {
            return Err(RefereeError::InvalidForm(
                "Please select both options".to_string(),
            ));
        }

        let use_case = self.use_case.trim();
        let mut query = format!("Compare {} vs {}", self.option1, self.option2);
        if !use_case.is_empty() {
            query.push_str(" for ");
            query.push_str(use_case);
        }

        let context = ComparisonContext {
            team_size: self.team_size.filter(|size| *size > 0),
            timeline: non_empty(&self.timeline),
            expertise: non_empty(&self.expertise),
            use_case: non_empty(use_case),
            budget: None,
        };

        Ok(ComparisonRequest::new(query).with_context(context))
    }

    /// Check team size, timeline and expertise against their fixed ranges.
    pub fn validate_choices(&self) -> Result<()> {
        if let Some(size) = self.team_size {
            validate_team_size(size)?;
        }
        if !self.timeline.is_empty() {
            validate_choice("timeline", &self.timeline, TIMELINE_CHOICES)?;
        }
        if !self.expertise.is_empty() {
            validate_choice("expertise", &self.expertise, EXPERTISE_CHOICES)?;
        }
        Ok(())
    }

    /// Check the form against the category catalogue and the fixed choices.
    ///
    /// The catalogue check is skipped in custom mode.
    pub fn validate_against(&self, categories: &Categories) -> Result<()> {
        self.validate_choices()?;

        if self.use_custom {
            return Ok(());
        }

        let available = categories
            .options(&self.category)
            .ok_or_else(|| RefereeError::UnknownCategory(self.category.clone()))?;

        for option in [&self.option1, &self.option2] {
            if !option.is_empty() && !available.contains(option) {
                return Err(RefereeError::InvalidOption {
                    option: option.clone(),
                    category: self.category.clone(),
                    available: available.to_vec(),
                });
            }
        }

        if !self.option1.is_empty() && self.option1 == self.option2 {
            return Err(RefereeError::InvalidForm(format!(
                "Cannot compare {} with itself",
                self.option1
            )));
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
