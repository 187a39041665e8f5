//! CodeQuest terminal driver entry point.

use std::error::Error;
use std::sync::Arc;

use codequest_app::clients::catalog::HttpProblemSource;
use codequest_app::clients::dialogue::HttpDialogueService;
use codequest_app::clients::execution::HttpExecutionService;
use codequest_app::clients::http::HttpBackend;
use codequest_app::clients::story::HttpStoryService;
use codequest_app::config::AppConfig;
use codequest_app::error::AppError;
use codequest_app::telemetry;
use codequest_app::terminal::{
    Command, HELP, parse_command, render_choices, render_outcome, render_problem,
    render_progression, render_story, render_topics, render_utterance,
};
use codequest_catalog::application::gateway::ProblemGateway;
use codequest_catalog::application::resolver::ProblemResolver;
use codequest_catalog::domain::bank::ProblemBank;
use codequest_companion::application::companion::Companion;
use codequest_companion::domain::playback::{CompanionView, PlaybackState};
use codequest_core::clock::SystemClock;
use codequest_core::dialogue::DialogueService;
use codequest_core::rng::SystemRng;
use codequest_execution::application::coordinator::ExecutionCoordinator;
use codequest_narrative::application::playthrough::NarrativeSession;
use codequest_progress::application::ledger::DifficultyLedger;
use codequest_session::application::practice::PracticeSession;
use codequest_session::application::presenter::PathPresenter;
use codequest_store::file_store::JsonFileProgressStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        catalog = %config.catalog_url,
        state = %config.state_path.display(),
        companion_online = config.dialogue_api_key.is_some(),
        "Starting CodeQuest"
    );

    let mut session = build_session(&config)?;
    let printer = tokio::spawn(print_companion(session.companion().subscribe()));

    println!("Welcome to CodeQuest! Type `topics` to begin or `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => run(&mut session, command).await,
            Err(message) => println!("{message}"),
        }
    }

    printer.abort();
    Ok(())
}

fn build_session(config: &AppConfig) -> Result<PracticeSession, AppError> {
    let timeout = config.http_timeout;
    let store = Arc::new(JsonFileProgressStore::new(config.state_path.clone()));
    let source = Arc::new(HttpProblemSource::new(HttpBackend::new(
        &config.catalog_url,
        timeout,
    )?));
    let story = Arc::new(HttpStoryService::new(HttpBackend::new(&config.story_url, timeout)?));
    let execution = Arc::new(HttpExecutionService::new(HttpBackend::new(
        &config.execution_url,
        timeout,
    )?));
    let dialogue: Option<Arc<dyn DialogueService>> = match &config.dialogue_api_key {
        Some(key) => Some(Arc::new(HttpDialogueService::new(
            HttpBackend::new(&config.dialogue_url, timeout)?.with_bearer(key.clone()),
        ))),
        None => None,
    };

    Ok(PracticeSession::new(
        DifficultyLedger::new(store),
        ProblemResolver::new(ProblemGateway::new(source), Arc::new(ProblemBank::builtin()?)),
        NarrativeSession::new(story),
        ExecutionCoordinator::new(execution),
        Arc::new(Companion::new(dialogue.clone(), Arc::new(SystemClock))),
        PathPresenter::new(dialogue),
        Box::new(SystemRng::new()),
    ))
}

async fn run(session: &mut PracticeSession, command: Command) {
    match command {
        Command::Help => println!("{HELP}"),
        Command::Topics => match session.topics().await {
            Ok(topics) => print!("{}", render_topics(&topics)),
            Err(err) => println!("Could not read progress: {err}"),
        },
        Command::Topic(name) => match session.select_topic(&name).await {
            Ok(opening) => {
                println!("{} (tier: {})\n", opening.topic_id, opening.tier);
                print!("{}", render_story(&opening.story));
                print_choices(session).await;
            }
            Err(err) => println!("{err}"),
        },
        Command::Story => match session.settled_story().await {
            Ok(story) => {
                print!("{}", render_story(&story));
                print_choices(session).await;
            }
            Err(err) => println!("{err}"),
        },
        Command::Path(path) => match session.choose_path(path).await {
            Ok(progression) => print!("{}", render_progression(&progression)),
            Err(err) => println!("{err}"),
        },
        Command::Problem => match session.current_problem() {
            Some(problem) => print!("{}", render_problem(problem)),
            None => println!("No problem is open."),
        },
        Command::Submit { language, file } => match tokio::fs::read_to_string(&file).await {
            Ok(code) => match session.submit(&code, &language).await {
                Ok(outcome) => print!("{}", render_outcome(&outcome)),
                Err(err) => println!("{err}"),
            },
            Err(err) => println!("Could not read {}: {err}", file.display()),
        },
        Command::Chat(message) => {
            session.chat(&message).await;
        }
        Command::Skip => session.companion().advance(),
        Command::Next => match session.next_problem().await {
            Ok(progression) => print!("{}", render_progression(&progression)),
            Err(err) => println!("{err}"),
        },
        Command::Leave => {
            session.leave_problem();
            println!("Left the problem.");
        }
        Command::Quit => {}
    }
}

async fn print_choices(session: &PracticeSession) {
    match session.choice_screen().await {
        Ok(screen) => print!("{}", render_choices(&screen)),
        Err(err) => println!("{err}"),
    }
}

/// Prints each utterance as the companion starts speaking it.
async fn print_companion(mut views: watch::Receiver<CompanionView>) {
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        match (view.state, view.utterance) {
            (PlaybackState::Thinking, _) => println!("companion is thinking..."),
            (PlaybackState::Speaking(_), Some(utterance)) => {
                println!("{}", render_utterance(&utterance));
            }
            _ => {}
        }
    }
}
