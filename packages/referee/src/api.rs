//! Comparison API client.
//!
//! [`ComparisonApi`] is the seam between the client logic and the network;
//! [`HttpComparisonApi`] is the production implementation.

use reqwest::blocking::Client;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{create_client, get_json, post_json};
use crate::types::{
    Categories, CategoriesEnvelope, ComparisonRequest, ComparisonResponse, HealthResponse,
    Suggestion, SuggestionsEnvelope,
};

/// Operations offered by the comparison API.
pub trait ComparisonApi {
    /// `GET /health`.
    fn health(&self) -> Result<HealthResponse>;

    /// `GET /api/categories`.
    fn categories(&self) -> Result<Categories>;

    /// `GET /api/suggestions`.
    fn suggestions(&self) -> Result<Vec<Suggestion>>;

    /// `POST /api/compare`.
    fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResponse>;
}

/// Blocking HTTP implementation of [`ComparisonApi`].
pub struct HttpComparisonApi {
    client: Client,
    config: ClientConfig,
}

impl HttpComparisonApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = create_client(&config)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "GET");
        get_json(&self.client, &url, self.config.max_retries).inspect_err(|e| {
            tracing::error!(%url, error = %e, "API request failed");
        })
    }
}

impl ComparisonApi for HttpComparisonApi {
    fn health(&self) -> Result<HealthResponse> {
        self.get("/health")
    }

    fn categories(&self) -> Result<Categories> {
        self.get::<CategoriesEnvelope>("/api/categories")
            .map(|envelope| envelope.categories)
    }

    fn suggestions(&self) -> Result<Vec<Suggestion>> {
        self.get::<SuggestionsEnvelope>("/api/suggestions")
            .map(|envelope| envelope.suggestions)
    }

    fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResponse> {
        let url = self.config.endpoint("/api/compare");
        tracing::info!(query = %request.query, "Requesting comparison");
        let response: ComparisonResponse =
            post_json(&self.client, &url, request).inspect_err(|e| {
                tracing::error!(%url, error = %e, "Comparison request failed");
            })?;
        tracing::info!(
            success = response.success,
            execution_time = ?response.execution_time,
            "Comparison received"
        );
        Ok(response)
    }
}

/// Test utilities for the comparison API.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use crate::error::RefereeError;
    use std::sync::Mutex;

    /// Mock API. Serves fixed catalogue data and queued compare results in order.
    pub struct MockComparisonApi {
        pub health: HealthResponse,
        pub categories: Categories,
        pub suggestions: Vec<Suggestion>,
        compare_results: Mutex<Vec<Result<ComparisonResponse>>>,
        requests: Mutex<Vec<ComparisonRequest>>,
    }

    impl MockComparisonApi {
        pub fn new(compare_results: Vec<Result<ComparisonResponse>>) -> Self {
            // Reverse so we can pop from the end
            let mut compare_results = compare_results;
            compare_results.reverse();
            Self {
                health: HealthResponse {
                    status: crate::types::HealthStatus::Healthy,
                    message: "API is running".into(),
                    version: "1.0.0".into(),
                    kiro_cli_available: Some(true),
                    agent_configured: Some(true),
                },
                categories: Categories::new(vec![crate::types::Category {
                    name: "Frontend Frameworks".into(),
                    options: vec!["React".into(), "Vue".into(), "Svelte".into()],
                }]),
                suggestions: Vec::new(),
                compare_results: Mutex::new(compare_results),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// A mock whose single comparison succeeds with the given markdown.
        pub fn with_comparison(markdown: &str) -> Self {
            Self::new(vec![Ok(ComparisonResponse {
                success: true,
                comparison: markdown.to_string(),
                query: String::new(),
                execution_time: Some(1.5),
                error: None,
            })])
        }

        pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
            self.suggestions = suggestions;
            self
        }

        /// Requests received by `compare`, in order.
        pub fn requests(&self) -> Vec<ComparisonRequest> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    impl ComparisonApi for MockComparisonApi {
        fn health(&self) -> Result<HealthResponse> {
            Ok(self.health.clone())
        }

        fn categories(&self) -> Result<Categories> {
            Ok(self.categories.clone())
        }

        fn suggestions(&self) -> Result<Vec<Suggestion>> {
            Ok(self.suggestions.clone())
        }

        fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResponse> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            let mut results = self.compare_results.lock().map_err(|e| RefereeError::Api {
                status: 500,
                message: format!("mock lock poisoned: {e}"),
            })?;
            results.pop().unwrap_or(Err(RefereeError::Api {
                status: 500,
                message: "no mock response queued".into(),
            }))
        }
    }
}
