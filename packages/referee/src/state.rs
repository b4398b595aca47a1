//! View state of the referee client.
//!
//! State is immutable: every change goes through [`AppState::apply`] with a
//! named [`Action`], which consumes the old state and returns the next one.

use crate::types::{
    Categories, ComparisonContext, ComparisonResponse, HealthResponse, HealthStatus, Suggestion,
};

/// Input mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Guided form: pick a category and two options.
    #[default]
    Guided,
    /// Free-text chat.
    Chat,
}

impl Mode {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Guided => "🎯 Guided Compare",
            Self::Chat => "💬 Ask the Referee",
        }
    }
}

/// Lifecycle of the current comparison request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        query: String,
        context: Option<ComparisonContext>,
    },
    Success(ComparisonResponse),
    Failed(String),
}

/// Named state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchMode(Mode),
    SubmitQuery {
        query: String,
        context: Option<ComparisonContext>,
    },
    ReceiveResult(ComparisonResponse),
    ReceiveError(String),
    Clear,
    HealthLoaded(HealthResponse),
    CategoriesLoaded(Categories),
    SuggestionsLoaded(Vec<Suggestion>),
}

/// Complete view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub mode: Mode,
    pub request: RequestState,
    pub health: Option<HealthResponse>,
    pub categories: Categories,
    pub suggestions: Vec<Suggestion>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition and return the next state.
    ///
    /// Replies (`ReceiveResult`, `ReceiveError`) only land while a request
    /// is loading; a reply after `Clear` is dropped.
    #[must_use]
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::SwitchMode(mode) => Self { mode, ..self },
            Action::SubmitQuery { query, context } => Self {
                request: RequestState::Loading { query, context },
                ..self
            },
            Action::ReceiveResult(response) if self.is_loading() => Self {
                request: RequestState::Success(response),
                ..self
            },
            Action::ReceiveError(message) if self.is_loading() => Self {
                request: RequestState::Failed(message),
                ..self
            },
            Action::ReceiveResult(_) | Action::ReceiveError(_) => {
                tracing::debug!("Dropping reply that arrived outside a request");
                self
            }
            Action::Clear => Self {
                request: RequestState::Idle,
                ..self
            },
            Action::HealthLoaded(health) => Self {
                health: Some(health),
                ..self
            },
            Action::CategoriesLoaded(categories) => Self { categories, ..self },
            Action::SuggestionsLoaded(suggestions) => Self { suggestions, ..self },
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.request, RequestState::Loading { .. })
    }

    /// The finished comparison, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ComparisonResponse> {
        match &self.request {
            RequestState::Success(response) => Some(response),
            _ => None,
        }
    }

    /// The request error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Status to show in the header: only known, non-degraded health.
    #[must_use]
    pub fn health_badge(&self) -> Option<HealthStatus> {
        self.health
            .as_ref()
            .map(|h| h.status)
            .filter(|status| *status != HealthStatus::Degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(markdown: &str) -> ComparisonResponse {
        ComparisonResponse {
            success: true,
            comparison: markdown.into(),
            query: "Compare A vs B".into(),
            execution_time: Some(2.0),
            error: None,
        }
    }

    fn health(status: HealthStatus) -> HealthResponse {
        HealthResponse {
            status,
            message: "API is running".into(),
            version: "1.0.0".into(),
            kiro_cli_available: None,
            agent_configured: None,
        }
    }

    fn submit() -> Action {
        Action::SubmitQuery {
            query: "Compare A vs B".into(),
            context: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.mode, Mode::Guided);
        assert_eq!(state.request, RequestState::Idle);
        assert!(state.health_badge().is_none());
    }

    #[test]
    fn test_submit_then_result() {
        let state = AppState::new().apply(submit());
        assert!(state.is_loading());

        let state = state.apply(Action::ReceiveResult(response("## Verdict\nA")));
        assert!(!state.is_loading());
        assert_eq!(state.result().map(|r| r.comparison.as_str()), Some("## Verdict\nA"));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_submit_then_error() {
        let state = AppState::new()
            .apply(submit())
            .apply(Action::ReceiveError("HTTP 500".into()));
        assert_eq!(state.error(), Some("HTTP 500"));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_resubmit_clears_previous_error() {
        let state = AppState::new()
            .apply(submit())
            .apply(Action::ReceiveError("HTTP 500".into()))
            .apply(submit());
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let state = AppState::new()
            .apply(submit())
            .apply(Action::ReceiveResult(response("x")))
            .apply(Action::Clear);
        assert_eq!(state.request, RequestState::Idle);
    }

    #[test]
    fn test_reply_after_clear_is_dropped() {
        let state = AppState::new()
            .apply(submit())
            .apply(Action::Clear)
            .apply(Action::ReceiveResult(response("late")));
        assert_eq!(state.request, RequestState::Idle);

        let state = state.apply(Action::ReceiveError("late".into()));
        assert_eq!(state.request, RequestState::Idle);
    }

    #[test]
    fn test_switch_mode_keeps_request() {
        let state = AppState::new()
            .apply(submit())
            .apply(Action::SwitchMode(Mode::Chat));
        assert_eq!(state.mode, Mode::Chat);
        assert!(state.is_loading());
    }

    #[test]
    fn test_health_badge_hides_degraded() {
        let state = AppState::new().apply(Action::HealthLoaded(health(HealthStatus::Degraded)));
        assert!(state.health_badge().is_none());

        let state = state.apply(Action::HealthLoaded(health(HealthStatus::Healthy)));
        assert_eq!(state.health_badge(), Some(HealthStatus::Healthy));
    }

    #[test]
    fn test_catalogue_loads() {
        let suggestion = Suggestion {
            id: 1,
            title: "React vs Vue".into(),
            category: "Frontend Frameworks".into(),
            query: "Compare React vs Vue for a dashboard project".into(),
        };
        let state = AppState::new().apply(Action::SuggestionsLoaded(vec![suggestion.clone()]));
        assert_eq!(state.suggestions, vec![suggestion]);
    }
}
