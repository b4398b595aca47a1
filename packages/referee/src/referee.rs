//! Main referee service that ties the API, view state and chat together.

use crate::api::ComparisonApi;
use crate::chat::{ChatEvent, ChatSession};
use crate::error::Result;
use crate::form::GuidedForm;
use crate::render::UNKNOWN_ERROR;
use crate::state::{Action, AppState, Mode};
use crate::types::{ComparisonRequest, ComparisonResponse};

/// Drives comparison requests against an API and tracks the view state.
pub struct Referee<A> {
    api: A,
    state: AppState,
}

impl<A: ComparisonApi> Referee<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: AppState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.dispatch(Action::SwitchMode(mode));
    }

    /// Load health, categories and suggestions.
    ///
    /// Each load is independent; a failure is logged and leaves that part
    /// of the state at its default.
    pub fn load_catalogue(&mut self) {
        match self.api.health() {
            Ok(health) => self.dispatch(Action::HealthLoaded(health)),
            Err(e) => tracing::warn!(error = %e, "Health check failed"),
        }
        match self.api.categories() {
            Ok(categories) => self.dispatch(Action::CategoriesLoaded(categories)),
            Err(e) => tracing::warn!(error = %e, "Failed to load categories"),
        }
        match self.api.suggestions() {
            Ok(suggestions) => self.dispatch(Action::SuggestionsLoaded(suggestions)),
            Err(e) => tracing::warn!(error = %e, "Failed to load suggestions"),
        }
    }

    /// Load only the category catalogue. Returns whether it is available.
    pub fn load_categories(&mut self) -> bool {
        match self.api.categories() {
            Ok(categories) => {
                self.dispatch(Action::CategoriesLoaded(categories));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories");
                false
            }
        }
    }

    /// Send a request and record the outcome in the state.
    ///
    /// A transport or API failure is recorded as the request error and also
    /// returned.
    pub fn submit(&mut self, request: ComparisonRequest) -> Result<&AppState> {
        let ComparisonRequest { query, context } = request.clone();
        self.dispatch(Action::SubmitQuery { query, context });

        match self.api.compare(&request) {
            Ok(response) => {
                self.dispatch(Action::ReceiveResult(response));
                Ok(&self.state)
            }
            Err(e) => {
                tracing::error!(error = %e, "Comparison failed");
                self.dispatch(Action::ReceiveError(e.to_string()));
                Err(e)
            }
        }
    }

    /// Build a request from the form and send it.
    ///
    /// Form errors are returned without touching the request state. Options
    /// are checked against the catalogue only when one is loaded.
    pub fn compare(&mut self, form: &GuidedForm) -> Result<&AppState> {
        if self.state.categories.is_empty() {
            form.validate_choices()?;
        } else {
            form.validate_against(&self.state.categories)?;
        }
        let request = form.build_request()?;
        self.submit(request)
    }

    /// Return to the idle state.
    pub fn clear(&mut self) {
        self.dispatch(Action::Clear);
    }

    /// Send the session's pending input as a chat turn.
    ///
    /// Blank input or a turn already in flight leaves the session unchanged.
    pub fn chat_turn(&self, session: ChatSession) -> ChatSession {
        let mut session = session.apply(ChatEvent::Submit);
        let Some(query) = session.take_submission() else {
            return session;
        };

        let event = match self.api.compare(&ComparisonRequest::new(query)) {
            Ok(response) if response.success => ChatEvent::Reply(response),
            Ok(ComparisonResponse { error, .. }) => {
                ChatEvent::Failed(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Chat request failed");
                ChatEvent::Failed(e.to_string())
            }
        };
        session.apply(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::MockComparisonApi;
    use crate::chat::Role;
    use crate::error::RefereeError;
    use crate::state::RequestState;
    use crate::types::Suggestion;
    use pretty_assertions::assert_eq;

    fn api_error(message: &str) -> RefereeError {
        RefereeError::Api {
            status: 500,
            message: message.into(),
        }
    }

    #[test]
    fn test_guided_compare_success() {
        let mut referee = Referee::new(MockComparisonApi::with_comparison("## Verdict\nReact"));
        referee.load_catalogue();

        let mut form = GuidedForm::new();
        form.option1 = "React".into();
        form.option2 = "Vue".into();

        let state = referee.compare(&form).unwrap();
        assert_eq!(state.result().map(|r| r.comparison.as_str()), Some("## Verdict\nReact"));

        let requests = referee.api().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "Compare React vs Vue");
    }

    #[test]
    fn test_compare_validates_against_loaded_catalogue() {
        let mut referee = Referee::new(MockComparisonApi::with_comparison("x"));
        referee.load_catalogue();

        let mut form = GuidedForm::new();
        form.option1 = "React".into();
        form.option2 = "Django".into();

        assert!(matches!(
            referee.compare(&form),
            Err(RefereeError::InvalidOption { .. })
        ));
        assert!(referee.api().requests().is_empty());
        assert_eq!(referee.state().request, RequestState::Idle);
    }

    #[test]
    fn test_compare_without_catalogue_skips_membership_check() {
        let mut referee = Referee::new(MockComparisonApi::with_comparison("x"));

        let mut form = GuidedForm::new();
        form.option1 = "Rocket".into();
        form.option2 = "Axum".into();

        assert!(referee.compare(&form).is_ok());

        form.timeline = "2 weeks".into();
        assert!(referee.compare(&form).is_err());
    }

    #[test]
    fn test_submit_failure_sets_error() {
        let mut referee = Referee::new(MockComparisonApi::new(vec![Err(api_error("Agent error"))]));
        let err = referee.submit(ComparisonRequest::new("Compare A vs B")).unwrap_err();
        assert_eq!(err.to_string(), "Agent error");
        assert_eq!(referee.state().error(), Some("Agent error"));

        referee.clear();
        assert_eq!(referee.state().request, RequestState::Idle);
    }

    #[test]
    fn test_chat_turn_success_and_failure() {
        let referee = Referee::new(MockComparisonApi::new(vec![
            Ok(ComparisonResponse {
                success: true,
                comparison: "Use Redis.".into(),
                query: "Redis or Memcached?".into(),
                execution_time: Some(1.0),
                error: None,
            }),
            Err(api_error("HTTP 500")),
        ]));

        let session = ChatSession::new().apply(ChatEvent::Input("Redis or Memcached?".into()));
        let session = referee.chat_turn(session);
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.messages[1].content, "Use Redis.");

        let session = referee.chat_turn(session.apply(ChatEvent::Input("again".into())));
        assert_eq!(session.messages.len(), 4);
        assert_eq!(session.messages[3].content, "⚠️ Error: HTTP 500");
        assert!(!session.loading);
    }

    #[test]
    fn test_chat_turn_unsuccessful_response() {
        let referee = Referee::new(MockComparisonApi::new(vec![Ok(ComparisonResponse {
            success: false,
            comparison: String::new(),
            query: String::new(),
            execution_time: None,
            error: None,
        })]));
        let session = referee.chat_turn(ChatSession::new().apply(ChatEvent::Input("q".into())));
        assert_eq!(
            session.messages.last().map(|m| m.content.as_str()),
            Some("⚠️ Error: An unknown error occurred")
        );
    }

    #[test]
    fn test_chat_turn_blank_input_sends_nothing() {
        let referee = Referee::new(MockComparisonApi::with_comparison("x"));
        let session = referee.chat_turn(ChatSession::new());
        assert!(session.messages.is_empty());
        assert!(referee.api().requests().is_empty());
    }

    #[test]
    fn test_load_catalogue() {
        let suggestion = Suggestion {
            id: 1,
            title: "React vs Vue".into(),
            category: "Frontend Frameworks".into(),
            query: "Compare React vs Vue for a dashboard project".into(),
        };
        let api = MockComparisonApi::with_comparison("x").with_suggestions(vec![suggestion]);
        let mut referee = Referee::new(api);
        referee.load_catalogue();

        let state = referee.state();
        assert!(state.health.is_some());
        assert_eq!(state.categories.len(), 1);
        assert_eq!(state.suggestions.len(), 1);
    }
}
