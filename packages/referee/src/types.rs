//! Request and response types of the comparison API.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Optional context that sharpens a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonContext {
    /// Size of the team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,

    /// Project timeline (e.g., "3 months").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,

    /// Team expertise level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,

    /// Specific use case or project type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,

    /// Budget constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl ComparisonContext {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Comparison query (e.g., "Compare React vs Vue").
    pub query: String,

    /// Optional context; sent as `null` when absent.
    pub context: Option<ComparisonContext>,
}

impl ComparisonRequest {
    /// A request without context.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: None,
        }
    }

    /// Attach context. An empty context is dropped.
    #[must_use]
    pub fn with_context(mut self, context: ComparisonContext) -> Self {
        self.context = (!context.is_empty()).then_some(context);
        self
    }
}

/// Body returned by `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Whether the comparison succeeded.
    pub success: bool,

    /// The markdown comparison text.
    #[serde(default)]
    pub comparison: String,

    /// The query the API actually sent to its agent (context folded in).
    #[serde(default)]
    pub query: String,

    /// Server-side execution time in seconds.
    #[serde(default)]
    pub execution_time: Option<f64>,

    /// Error message, if any.
    #[serde(default)]
    pub error: Option<String>,
}

impl ComparisonResponse {
    /// Execution time when it is worth showing (present and non-zero).
    #[must_use]
    pub fn display_time(&self) -> Option<f64> {
        self.execution_time.filter(|t| *t > 0.0)
    }
}

/// Service status reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
            Self::Unknown => "unknown",
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kiro_cli_available: Option<bool>,
    #[serde(default)]
    pub agent_configured: Option<bool>,
}

/// A ready-made comparison offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub query: String,
}

/// Envelope of `GET /api/suggestions`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsEnvelope {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// One category of comparable technologies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub options: Vec<String>,
}

/// Category catalogue, in the order the API lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories(Vec<Category>);

impl Categories {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    /// Options of a category, if the category exists.
    #[must_use]
    pub fn options(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.options.as_slice())
    }

    /// Category names in catalogue order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for Categories {
    /// Deserializes a JSON object of `name -> [options]`, keeping key order.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        map.into_iter()
            .map(|(name, value)| {
                let options = serde_json::from_value::<Vec<String>>(value)
                    .map_err(|e| D::Error::custom(format!("category '{name}': {e}")))?;
                Ok(Category { name, options })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Envelope of `GET /api/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Categories,
}
