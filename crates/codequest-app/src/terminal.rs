//! Line commands and text rendering for the terminal driver.

use std::fmt::Write as _;
use std::path::PathBuf;

use codequest_catalog::domain::bank::TopicSummary;
use codequest_catalog::domain::selector::PathChoice;
use codequest_companion::domain::transcript::Utterance;
use codequest_core::execution::Language;
use codequest_narrative::domain::state::NarrativeState;
use codequest_session::domain::paths::ChoiceScreen;
use codequest_session::domain::progression::{Progression, ProblemView, Step, SubmissionOutcome};

/// One line of learner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Topics,
    Topic(String),
    Story,
    Path(PathChoice),
    Problem,
    Submit { language: String, file: PathBuf },
    Chat(String),
    /// Skip to the companion's next utterance.
    Skip,
    Next,
    Leave,
    Quit,
}

/// Usage text shown by `help` and after a bad command.
pub const HELP: &str = "\
commands:
  topics                     list topics with progress
  topic <name>               start a topic (name as listed)
  story                      show the story so far
  path <1|2|other>           choose a path; any other word explores at random
  problem                    show the open problem
  submit <language> <file>   run the code in <file>
  chat <message>             ask the companion
  skip                       skip to the companion's next line
  next                       move on to the next problem
  leave                      close the open problem
  quit                       exit";

/// Parses one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns a message for unknown commands or missing arguments.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "topics" => Command::Topics,
        "topic" => Command::Topic(required(rest, "topic <name>")?.to_owned()),
        "story" => Command::Story,
        "path" => Command::Path(match required(rest, "path <1|2|other>")? {
            "1" => PathChoice::Path1,
            "2" => PathChoice::Path2,
            other => PathChoice::from(other),
        }),
        "problem" => Command::Problem,
        "submit" => {
            let (language, file) = required(rest, "submit <language> <file>")?
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: submit <language> <file>".to_owned())?;
            Command::Submit {
                language: language.to_owned(),
                file: PathBuf::from(file.trim()),
            }
        }
        "chat" => Command::Chat(required(rest, "chat <message>")?.to_owned()),
        "skip" => Command::Skip,
        "next" => Command::Next,
        "leave" => Command::Leave,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}, try `help`")),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

#[must_use]
pub fn render_topics(topics: &[TopicSummary]) -> String {
    let mut out = String::new();
    for topic in topics {
        let _ = writeln!(out, "  {:<28} {}/{}", topic.name, topic.completed, topic.total);
    }
    out
}

#[must_use]
pub fn render_story(story: &NarrativeState) -> String {
    format!("{}\n\n", story.story_text)
}

#[must_use]
pub fn render_choices(screen: &ChoiceScreen) -> String {
    let mut out = format!("{}\n\n", screen.journey);
    for (index, path) in screen.paths.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}: {}", index + 1, path.title, path.description);
    }
    out
}

#[must_use]
pub fn render_problem(problem: &ProblemView) -> String {
    let detail = &problem.detail;
    let mut out = String::new();
    for notice in &problem.notices {
        let _ = writeln!(out, "! {notice}");
    }
    let _ = writeln!(out, "{} ({})\n", detail.title, detail.difficulty);
    let _ = writeln!(out, "{}", detail.statement);
    for (index, example) in detail.examples.iter().enumerate() {
        let _ = writeln!(out, "\nExample {}:", index + 1);
        let _ = writeln!(out, "  Input:  {}", example.input);
        let _ = writeln!(out, "  Output: {}", example.output);
        if !example.explanation.is_empty() {
            let _ = writeln!(out, "  {}", example.explanation);
        }
    }
    if let Some(starter) = detail.starter_code(Language::Python.id()) {
        let _ = writeln!(out, "\nStarter code (python):\n{starter}");
    }
    out
}

#[must_use]
pub fn render_progression(progression: &Progression) -> String {
    let mut out = String::new();
    for chapter in &progression.chapters {
        let _ = writeln!(out, "{}\n", chapter.story_text);
    }
    match &progression.step {
        Step::Problem(problem) => out.push_str(&render_problem(problem)),
        Step::TopicComplete(epilogue) => {
            let _ = writeln!(out, "{}", epilogue.story_text);
        }
    }
    out
}

#[must_use]
pub fn render_outcome(outcome: &SubmissionOutcome) -> String {
    let report = outcome.report();
    let mut out = format!("{}\n", report.headline());
    for case in report.outcome.results() {
        let mark = if case.passed { "pass" } else { "FAIL" };
        let _ = write!(out, "  case {}: {mark}", case.test_case);
        if let Some(error) = &case.error {
            let _ = write!(out, " ({error})");
        }
        out.push('\n');
    }
    if matches!(outcome, SubmissionOutcome::Solved(_)) {
        out.push_str("Solved! Type `next` for another problem.\n");
    }
    out
}

#[must_use]
pub fn render_utterance(utterance: &Utterance) -> String {
    if utterance.is_code {
        format!("companion [{}]:\n{}", utterance.emotion, utterance.text)
    } else {
        format!("companion [{}]: {}", utterance.emotion, utterance.text)
    }
}
