//! Command-line interface for the referee.

use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{ComparisonApi, HttpComparisonApi};
use crate::chat::{ChatEvent, ChatSession, Role};
use crate::config::{
    ClientConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_CATEGORY, DEFAULT_TEAM_SIZE,
    DEFAULT_WRAP_WIDTH, HTTP_TIMEOUT_SECS, TIMEOUT_ENV,
};
use crate::error::Result;
use crate::form::GuidedForm;
use crate::referee::Referee;
use crate::render::{
    render_categories, render_health, render_suggestions, CardRenderer, CHAT_LOADING_MESSAGE,
    LOADING_MESSAGE,
};
use crate::splitter::{RecommendationTriggers, SectionSplitter};
use crate::state::Mode;
use crate::types::{ComparisonResponse, Suggestion};

/// Tech Stack Referee - Compare technology options side by side.
#[derive(Parser)]
#[command(name = "referee")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the comparison API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = TIMEOUT_ENV, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Wrap width for rendered output
    #[arg(short, long, global = true, default_value_t = DEFAULT_WRAP_WIDTH)]
    pub width: usize,

    /// Extra phrase marking a section title as a recommendation (repeatable)
    #[arg(long = "trigger", global = true, value_name = "PHRASE")]
    pub triggers: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two options from a category.
    Compare {
        /// First option (e.g., React)
        option1: String,

        /// Second option (e.g., Vue)
        option2: String,

        /// Category the options belong to
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,

        /// What the project is for (e.g., "admin dashboard")
        #[arg(short, long)]
        use_case: Option<String>,

        /// Number of developers
        #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
        team_size: u32,

        /// Project timeline (e.g., "3 months")
        #[arg(long)]
        timeline: Option<String>,

        /// Team expertise (Beginner, Intermediate, Advanced, Expert)
        #[arg(long)]
        expertise: Option<String>,
    },

    /// Ask a free-text comparison question.
    Ask {
        /// The question (e.g., "Redis or Memcached for session storage?")
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Interactive chat with the referee.
    Chat,

    /// List suggested comparisons.
    Suggestions,

    /// List categories and their options.
    Categories,

    /// Show API health.
    Health,

    /// Render a markdown comparison offline (reads stdin without FILE).
    Render {
        /// Markdown file to render
        file: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let renderer = CardRenderer::new(cli.width).with_splitter(splitter(&cli.triggers));

    match &cli.command {
        Commands::Compare {
            option1,
            option2,
            category,
            use_case,
            team_size,
            timeline,
            expertise,
        } => {
            let form = GuidedForm {
                category: category.clone(),
                option1: option1.clone(),
                option2: option2.clone(),
                use_case: use_case.clone().unwrap_or_default(),
                team_size: Some(*team_size),
                timeline: timeline.clone().unwrap_or_default(),
                expertise: expertise.clone().unwrap_or_default(),
                ..GuidedForm::default()
            };
            compare_command(&mut Referee::new(api(&cli)?), &form, &renderer)
        }
        Commands::Ask { query } => {
            let form = GuidedForm::custom(query.join(" "));
            compare_command(&mut Referee::new(api(&cli)?), &form, &renderer)
        }
        Commands::Chat => {
            let mut referee = Referee::new(api(&cli)?);
            with_spinner("Connecting...", || referee.load_catalogue());
            let stdin = std::io::stdin();
            chat_loop(&mut referee, stdin.lock(), &mut std::io::stdout(), &renderer)
        }
        Commands::Suggestions => {
            let api = api(&cli)?;
            let suggestions = with_spinner("Loading suggestions...", || api.suggestions())?;
            println!("{}", render_suggestions(&suggestions));
            Ok(())
        }
        Commands::Categories => {
            let api = api(&cli)?;
            let categories = with_spinner("Loading categories...", || api.categories())?;
            println!("{}", render_categories(&categories));
            Ok(())
        }
        Commands::Health => {
            let api = api(&cli)?;
            let health = with_spinner("Checking API health...", || api.health())?;
            println!("{}", render_health(&health));
            Ok(())
        }
        Commands::Render { file } => render_command(file.as_deref(), &renderer),
    }
}

/// Default triggers plus any given on the command line.
fn splitter(extra: &[String]) -> SectionSplitter {
    let triggers = extra
        .iter()
        .fold(RecommendationTriggers::default(), |triggers, phrase| {
            triggers.with_phrase(phrase.as_str())
        });
    SectionSplitter::new(triggers)
}

fn api(cli: &Cli) -> Result<HttpComparisonApi> {
    let config = ClientConfig::builder()
        .api_base_url(&cli.api_url)
        .timeout_secs(cli.timeout)
        .build()?;
    HttpComparisonApi::new(config)
}

/// Run `f` behind a spinner on stderr.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}

/// Send a guided or custom comparison and print the cards.
fn compare_command<A: ComparisonApi>(
    referee: &mut Referee<A>,
    form: &GuidedForm,
    renderer: &CardRenderer,
) -> Result<()> {
    if !form.use_custom {
        println!(
            "{} {} vs {}",
            style("Comparing").bold(),
            style(&form.option1).cyan(),
            style(&form.option2).cyan()
        );
        println!();

        // Without a catalogue the options are sent unchecked
        with_spinner("Loading categories...", || referee.load_categories());
    }

    let response: Option<ComparisonResponse> = with_spinner(LOADING_MESSAGE, || {
        referee.compare(form).map(|state| state.result().cloned())
    })?;

    if let Some(response) = response {
        println!("{}", renderer.render_response(&response));
    }
    Ok(())
}

/// Render a markdown comparison from a file or stdin.
fn render_command(file: Option<&Path>, renderer: &CardRenderer) -> Result<()> {
    let markdown = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    println!("{}", renderer.render_markdown_document(&markdown));
    Ok(())
}

/// A line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand {
    Quit,
    Clear,
    Suggest(Option<usize>),
    Send(String),
    Empty,
}

impl ChatCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Empty,
            "/quit" | "/exit" => Self::Quit,
            "/clear" => Self::Clear,
            _ => match line.strip_prefix("/suggest") {
                Some(rest) => Self::Suggest(rest.trim().parse().ok()),
                None => Self::Send(line.to_string()),
            },
        }
    }
}

/// Interactive chat over `input`, writing the transcript to `out`.
///
/// Ends on `/quit` or end of input.
pub fn chat_loop<A, R, W>(
    referee: &mut Referee<A>,
    input: R,
    out: &mut W,
    renderer: &CardRenderer,
) -> Result<()>
where
    A: ComparisonApi,
    R: BufRead,
    W: Write,
{
    referee.switch_mode(Mode::Chat);
    let state = referee.state();
    let suggestions = state.suggestions.clone();

    write!(out, "{}", style(state.mode.label()).bold())?;
    if let Some(status) = state.health_badge() {
        write!(out, "  {}", style(format!("API {}", status.as_str())).dim())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        style("Type a question, /suggest N, /clear or /quit.").dim()
    )?;

    let mut session = ChatSession::new();
    print_visible_suggestions(out, &session, &suggestions)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", style(">").bold())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };

        let (text, echo) = match ChatCommand::parse(&line?) {
            ChatCommand::Quit => break,
            ChatCommand::Empty => continue,
            ChatCommand::Clear => {
                session = session.apply(ChatEvent::Clear);
                writeln!(out, "{}", style("Chat cleared").dim())?;
                print_visible_suggestions(out, &session, &suggestions)?;
                continue;
            }
            ChatCommand::Suggest(number) => {
                let Some(suggestion) = number
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| suggestions.get(i))
                else {
                    let hint = format!("Pick a suggestion between 1 and {}", suggestions.len());
                    writeln!(out, "{}", style(hint).yellow())?;
                    continue;
                };
                session = session.apply(ChatEvent::PickSuggestion(suggestion.clone()));
                (None, true)
            }
            ChatCommand::Send(text) => (Some(text), false),
        };

        if let Some(text) = text {
            session = session.apply(ChatEvent::Input(text));
        }

        let before = session.messages.len();
        session = with_spinner(CHAT_LOADING_MESSAGE, || referee.chat_turn(session));

        for message in &session.messages[before..] {
            if message.role == Role::User && !echo {
                continue;
            }
            writeln!(out, "{}", renderer.render_chat_message(message))?;
        }
    }

    Ok(())
}

fn print_visible_suggestions<W: Write>(
    out: &mut W,
    session: &ChatSession,
    suggestions: &[Suggestion],
) -> Result<()> {
    let visible = session.visible_suggestions(suggestions);
    if !visible.is_empty() {
        writeln!(out, "{}", style("Try one of these:").bold())?;
        writeln!(out, "{}", render_suggestions(visible))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::MockComparisonApi;
    use crate::error::RefereeError;

    fn run_chat(api: MockComparisonApi, input: &str) -> (String, Referee<MockComparisonApi>) {
        let mut referee = Referee::new(api);
        referee.load_catalogue();
        let mut out = Vec::new();
        chat_loop(&mut referee, input.as_bytes(), &mut out, &CardRenderer::new(80)).unwrap();
        let text = String::from_utf8(out).unwrap();
        (console::strip_ansi_codes(&text).to_string(), referee)
    }

    #[test]
    fn test_cli_parse_compare() {
        let cli = Cli::parse_from(["referee", "compare", "React", "Vue"]);

        let Commands::Compare {
            option1,
            option2,
            category,
            team_size,
            use_case,
            ..
        } = cli.command
        else {
            panic!("expected compare");
        };
        assert_eq!(option1, "React");
        assert_eq!(option2, "Vue");
        assert_eq!(category, "Frontend Frameworks");
        assert_eq!(team_size, 3);
        assert!(use_case.is_none());
        assert_eq!(cli.width, 100);
    }

    #[test]
    fn test_cli_parse_compare_with_context() {
        let cli = Cli::parse_from([
            "referee",
            "compare",
            "PostgreSQL",
            "MongoDB",
            "--category",
            "Databases",
            "--use-case",
            "analytics",
            "--team-size",
            "8",
            "--timeline",
            "6 months",
            "--width",
            "60",
        ]);

        let Commands::Compare {
            category,
            use_case,
            team_size,
            timeline,
            ..
        } = cli.command
        else {
            panic!("expected compare");
        };
        assert_eq!(category, "Databases");
        assert_eq!(use_case.as_deref(), Some("analytics"));
        assert_eq!(team_size, 8);
        assert_eq!(timeline.as_deref(), Some("6 months"));
        assert_eq!(cli.width, 60);
    }

    #[test]
    fn test_cli_parse_ask_joins_words() {
        let cli = Cli::parse_from(["referee", "ask", "Redis", "or", "Memcached?"]);
        let Commands::Ask { query } = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(query.join(" "), "Redis or Memcached?");
    }

    #[test]
    fn test_cli_parse_ask_requires_query() {
        assert!(Cli::try_parse_from(["referee", "ask"]).is_err());
    }

    #[test]
    fn test_cli_parse_api_url() {
        let cli = Cli::parse_from(["referee", "--api-url", "http://referee:9000", "health"]);
        assert_eq!(cli.api_url, "http://referee:9000");
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_cli_parse_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["referee", "--timeout", "soon", "health"]).is_err());
    }

    #[test]
    fn test_cli_parse_triggers() {
        let cli = Cli::parse_from([
            "referee",
            "render",
            "--trigger",
            "Bottom Line",
            "--trigger",
            "our pick",
        ]);
        assert_eq!(cli.triggers, vec!["Bottom Line", "our pick"]);

        let splitter = splitter(&cli.triggers);
        let parsed = splitter.split("## The Bottom Line
A.
## Our Pick
B.
## Cost
C.");
        let flags: Vec<bool> = parsed.sections.iter().map(|s| s.is_recommendation).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_default_splitter_keeps_builtin_triggers() {
        let parsed = splitter(&[]).split("## Verdict
A.
## Bottom Line
B.");
        assert!(parsed.sections[0].is_recommendation);
        assert!(!parsed.sections[1].is_recommendation);
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from(["referee", "render", "result.md"]);
        let Commands::Render { file } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(file, Some(PathBuf::from("result.md")));
    }

    #[test]
    fn test_chat_command_parse() {
        assert_eq!(ChatCommand::parse("  "), ChatCommand::Empty);
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/clear"), ChatCommand::Clear);
        assert_eq!(ChatCommand::parse("/suggest 2"), ChatCommand::Suggest(Some(2)));
        assert_eq!(ChatCommand::parse("/suggest x"), ChatCommand::Suggest(None));
        assert_eq!(
            ChatCommand::parse(" Redis or Memcached? "),
            ChatCommand::Send("Redis or Memcached?".into())
        );
    }

    #[test]
    fn test_chat_loop_sends_question() {
        let (out, referee) = run_chat(
            MockComparisonApi::with_comparison("**Use Redis**"),
            "Redis or Memcached?\n/quit\n",
        );
        assert!(out.contains("💬 Ask the Referee"));
        assert!(out.contains("🤖 ⚡ 1.50s\n│ Use Redis"));
        assert!(!out.contains("👤"));
        assert_eq!(referee.state().mode, Mode::Chat);
        assert_eq!(referee.api().requests()[0].query, "Redis or Memcached?");
    }

    #[test]
    fn test_chat_loop_shows_errors_and_continues() {
        let api = MockComparisonApi::new(vec![Err(RefereeError::Api {
            status: 500,
            message: "HTTP 500".into(),
        })]);
        let (out, referee) = run_chat(api, "first\nsecond\n");
        assert!(out.contains("🤖 ⚠️ Error: HTTP 500"));
        assert!(out.contains("no mock response queued"));
        assert_eq!(referee.api().requests().len(), 2);
    }

    #[test]
    fn test_chat_loop_suggestions() {
        let suggestion = Suggestion {
            id: 3,
            title: "PostgreSQL vs MongoDB".into(),
            category: "Databases".into(),
            query: "Compare PostgreSQL vs MongoDB for e-commerce".into(),
        };
        let api = MockComparisonApi::with_comparison("Pick PostgreSQL.")
            .with_suggestions(vec![suggestion]);
        let (out, referee) = run_chat(api, "/suggest 5\n/suggest 1\n");

        assert!(out.contains("Try one of these:"));
        assert!(out.contains(" 1. PostgreSQL vs MongoDB [Databases]"));
        assert!(out.contains("Pick a suggestion between 1 and 1"));
        assert!(out.contains("👤 Compare PostgreSQL vs MongoDB for e-commerce"));
        assert!(out.contains("│ Pick PostgreSQL."));
        assert_eq!(
            referee.api().requests()[0].query,
            "Compare PostgreSQL vs MongoDB for e-commerce"
        );
    }

    #[test]
    fn test_chat_loop_clear_shows_suggestions_again() {
        let suggestion = Suggestion {
            id: 1,
            title: "Redis vs Memcached".into(),
            category: "Caching".into(),
            query: "Compare Redis vs Memcached for sessions".into(),
        };
        let api =
            MockComparisonApi::with_comparison("Use Redis.").with_suggestions(vec![suggestion]);
        let (out, referee) = run_chat(api, "q\n/clear\n");

        let (before, after) = out.split_once("Chat cleared").expect("clear acknowledged");
        assert!(before.contains("Try one of these:"));
        assert!(before.contains("│ Use Redis."));
        assert!(after.contains("Try one of these:"));
        assert!(after.contains(" 1. Redis vs Memcached [Caching]"));
        assert_eq!(referee.api().requests().len(), 1);
    }

    #[test]
    fn test_chat_loop_eof_without_input() {
        let (out, referee) = run_chat(MockComparisonApi::with_comparison("x"), "");
        assert!(out.contains("API healthy"));
        assert!(referee.api().requests().is_empty());
    }
}
