//! End-to-end practice flows against in-memory collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use codequest_catalog::application::gateway::ProblemGateway;
use codequest_catalog::application::resolver::{FallbackCause, ProblemOrigin, ProblemResolver};
use codequest_catalog::domain::bank::ProblemBank;
use codequest_catalog::domain::selector::PathChoice;
use codequest_companion::application::companion::Companion;
use codequest_companion::domain::playback::PlaybackState;
use codequest_core::dialogue::DialogueService;
use codequest_core::error::ServiceError;
use codequest_core::execution::{CaseResult, ExecutionReport, ExecutionService};
use codequest_core::problem::ProblemSummary;
use codequest_core::source::ProblemSource;
use codequest_core::story::{ContinueStory, StoryReply, StoryService};
use codequest_core::tier::{Difficulty, Tier};
use codequest_execution::application::coordinator::{ExecutionCoordinator, SubmissionError};
use codequest_execution::domain::outcome::ExecutionOutcome;
use codequest_narrative::application::playthrough::NarrativeSession;
use codequest_progress::application::ledger::DifficultyLedger;
use codequest_session::application::practice::PracticeSession;
use codequest_session::application::presenter::PathPresenter;
use codequest_session::domain::progression::{Step, SubmissionOutcome};
use codequest_session::error::SessionError;
use codequest_test_support::{
    FailingExecutionService, FixedClock, InMemoryProgressStore, MockRng, ScriptedDialogueService,
    ScriptedExecutionService, ScriptedStoryService, StaticProblemSource, UnavailableProblemSource,
    sample_detail,
};

const TOPIC: &str = "Arrays & Hashing";
const SOLUTION: &str = "def twoSum(nums, target):\n    return [0, 1]";

struct Harness {
    store: Arc<InMemoryProgressStore>,
    source: Arc<dyn ProblemSource>,
    story: Arc<dyn StoryService>,
    execution: Arc<dyn ExecutionService>,
    dialogue: Arc<ScriptedDialogueService>,
}

impl Harness {
    fn new(source: Arc<dyn ProblemSource>) -> Self {
        Self {
            store: Arc::new(InMemoryProgressStore::new()),
            source,
            story: Arc::new(ScriptedStoryService::new()),
            execution: Arc::new(ScriptedExecutionService::all_passed()),
            dialogue: Arc::new(ScriptedDialogueService::new(
                "Two cases failed. Check the loop bounds.",
                "Try a hash map.",
            )),
        }
    }

    fn session(&self) -> PracticeSession {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap()));
        let dialogue: Arc<dyn DialogueService> = self.dialogue.clone();
        PracticeSession::new(
            DifficultyLedger::new(self.store.clone()),
            ProblemResolver::new(
                ProblemGateway::new(self.source.clone()),
                Arc::new(ProblemBank::builtin().unwrap()),
            ),
            NarrativeSession::new(self.story.clone()),
            ExecutionCoordinator::new(self.execution.clone()),
            Arc::new(Companion::new(Some(dialogue.clone()), clock)),
            PathPresenter::new(Some(dialogue)),
            Box::new(MockRng),
        )
    }
}

fn easy_pair_source() -> StaticProblemSource {
    StaticProblemSource::new()
        .with_topic(
            TOPIC,
            vec![
                ProblemSummary::new("two-sum", TOPIC, Difficulty::Easy),
                ProblemSummary::new("contains-duplicate", TOPIC, Difficulty::Easy),
                ProblemSummary::new("group-anagrams", TOPIC, Difficulty::Medium),
            ],
        )
        .with_detail(sample_detail("two-sum", Difficulty::Easy))
        .with_detail(sample_detail("contains-duplicate", Difficulty::Easy))
        .with_detail(sample_detail("group-anagrams", Difficulty::Medium))
}

fn problem_id(step: &Step) -> &str {
    match step {
        Step::Problem(view) => &view.detail.id,
        Step::TopicComplete(_) => panic!("expected a problem, topic was complete"),
    }
}

fn failing_report() -> ExecutionReport {
    ExecutionReport::Completed {
        all_passed: false,
        results: vec![CaseResult {
            test_case: 1,
            passed: false,
            actual_output: Some("[1,0]".into()),
            expected_output: Some("[0,1]".into()),
            error: None,
        }],
        code_output: String::new(),
    }
}

/// Story service that records how many progress writes had landed when
/// each continuation was requested.
struct WriteAwareStory {
    store: Arc<InMemoryProgressStore>,
    seen: Mutex<Vec<(Tier, Vec<String>)>>,
}

#[async_trait]
impl StoryService for WriteAwareStory {
    async fn start(&self, topic_id: &str) -> Result<StoryReply, ServiceError> {
        Ok(StoryReply {
            conversation_id: "conv-9".into(),
            checkpoint_id: "cp-0".into(),
            story: format!("{topic_id} begins."),
        })
    }

    async fn continue_story(&self, request: &ContinueStory) -> Result<StoryReply, ServiceError> {
        self.seen
            .lock()
            .unwrap()
            .push((request.tier, self.store.writes()));
        Ok(StoryReply {
            conversation_id: request.conversation_id.clone(),
            checkpoint_id: "cp-1".into(),
            story: "The medium trials begin.".into(),
        })
    }
}

#[tokio::test]
async fn test_path_choices_diverge_on_two_easy_problems() {
    // Arrange
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut first = harness.session();
    let mut second = harness.session();
    first.select_topic(TOPIC).await.unwrap();
    second.select_topic(TOPIC).await.unwrap();

    // Act
    let via_path1 = first.choose_path(PathChoice::Path1).await.unwrap();
    let via_path2 = second.choose_path(PathChoice::Path2).await.unwrap();

    // Assert
    assert_eq!(problem_id(&via_path1.step), "two-sum");
    assert_eq!(problem_id(&via_path2.step), "contains-duplicate");
    assert!(via_path1.chapters.is_empty());
}

#[tokio::test]
async fn test_passing_submission_records_completion_without_review() {
    // Arrange
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();

    // Act
    let outcome = session.submit(SOLUTION, "python").await.unwrap();

    // Assert
    assert!(matches!(outcome, SubmissionOutcome::Solved(_)));
    assert!(harness.store.completed().contains("two-sum"));
    assert!(harness.dialogue.calls().is_empty());
    assert_eq!(session.companion().view().state, PlaybackState::Idle);
}

#[tokio::test]
async fn test_failing_submission_starts_companion_review() {
    // Arrange
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.execution = Arc::new(ScriptedExecutionService::new(failing_report()));
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();

    // Act
    let outcome = session.submit(SOLUTION, "python").await.unwrap();

    // Assert
    let SubmissionOutcome::NeedsWork { report, critique } = outcome else {
        panic!("expected a review");
    };
    assert!(matches!(report.outcome, ExecutionOutcome::SomeFailed(_)));
    assert_eq!(critique.len(), 2);
    assert_eq!(harness.dialogue.calls(), vec!["review(python)"]);
    assert_eq!(session.companion().view().state, PlaybackState::Speaking(0));
    assert!(harness.store.completed().is_empty());
}

#[tokio::test]
async fn test_unreachable_execution_service_still_gets_a_review() {
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.execution = Arc::new(FailingExecutionService::default());
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();

    let outcome = session.submit(SOLUTION, "python").await.unwrap();

    assert!(matches!(
        outcome.report().outcome,
        ExecutionOutcome::TransportError(_)
    ));
    assert!(outcome.report().headline().contains("retry"));
    assert!(matches!(outcome, SubmissionOutcome::NeedsWork { .. }));
}

#[tokio::test]
async fn test_blank_code_is_rejected_before_any_network_call() {
    // Arrange
    let execution = Arc::new(FailingExecutionService::default());
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.execution = execution.clone();
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();

    // Act
    let result = session.submit("   \n", "python").await;

    // Assert
    assert!(matches!(
        result,
        Err(SessionError::Submission(SubmissionError::InvalidInput(_)))
    ));
    assert_eq!(execution.attempts(), 0);
    assert!(harness.dialogue.calls().is_empty());
}

#[tokio::test]
async fn test_tier_is_recorded_before_story_continues() {
    // Arrange
    let store = Arc::new(InMemoryProgressStore::seeded(
        &[],
        &["two-sum", "contains-duplicate"],
    ));
    let story = Arc::new(WriteAwareStory {
        store: store.clone(),
        seen: Mutex::new(Vec::new()),
    });
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.store = store.clone();
    harness.story = story.clone();
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();

    // Act
    let progression = session.choose_path(PathChoice::Path1).await.unwrap();

    // Assert
    assert_eq!(problem_id(&progression.step), "group-anagrams");
    assert_eq!(progression.chapters.len(), 1);
    let seen = story.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![(Tier::Medium, vec![format!("tier:{TOPIC}=Medium")])]
    );
}

#[tokio::test]
async fn test_each_tier_transition_is_narrated_once() {
    // Arrange
    let scripted = Arc::new(ScriptedStoryService::new());
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.store = Arc::new(InMemoryProgressStore::seeded(
        &[],
        &["two-sum", "contains-duplicate", "group-anagrams"],
    ));
    harness.story = scripted.clone();
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();

    // Act
    let progression = session.choose_path(PathChoice::Path1).await.unwrap();
    let again = session.next_problem().await.unwrap();

    // Assert
    let tiers: Vec<Tier> = scripted.continuations().iter().map(|c| c.tier).collect();
    assert_eq!(tiers, vec![Tier::Medium, Tier::Hard]);
    assert_eq!(progression.chapters.len(), 2);
    assert!(again.chapters.is_empty());
    assert!(matches!(progression.step, Step::TopicComplete(_)));
    assert!(matches!(again.step, Step::TopicComplete(_)));
}

#[tokio::test]
async fn test_exhausted_topic_concludes_without_story_call() {
    // Arrange
    let scripted = Arc::new(ScriptedStoryService::new());
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.store = Arc::new(InMemoryProgressStore::seeded(&[(TOPIC, Tier::Hard)], &[]));
    harness.story = scripted.clone();
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();

    // Act
    let progression = session.choose_path(PathChoice::Path2).await.unwrap();

    // Assert
    let Step::TopicComplete(epilogue) = progression.step else {
        panic!("expected the topic to be complete");
    };
    assert!(epilogue.story_text.contains("every problem Arrays & Hashing had to offer"));
    assert!(scripted.continuations().is_empty());
    assert_eq!(harness.store.writes(), vec![format!("tier:{TOPIC}=Exhausted")]);
}

#[tokio::test]
async fn test_unreachable_catalog_serves_builtin_problem() {
    let harness = Harness::new(Arc::new(UnavailableProblemSource));
    let mut session = harness.session();
    session.select_topic("Stack").await.unwrap();

    let progression = session.choose_path(PathChoice::Path1).await.unwrap();

    let Step::Problem(view) = progression.step else {
        panic!("expected a problem");
    };
    assert_eq!(view.detail.id, "valid-parentheses");
    assert_eq!(
        view.origin,
        ProblemOrigin::BuiltIn {
            cause: FallbackCause::Unavailable { transient: true },
        }
    );
    assert_eq!(view.notices.len(), 1);
    assert!(view.notices[0].contains("Retry in a moment"));
}

#[tokio::test]
async fn test_next_problem_moves_past_solved_one() {
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();
    session.submit(SOLUTION, "python").await.unwrap();

    let progression = session.next_problem().await.unwrap();

    assert_eq!(problem_id(&progression.step), "contains-duplicate");
}

#[tokio::test]
async fn test_leaving_a_problem_clears_chat() {
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut session = harness.session();
    session.select_topic(TOPIC).await.unwrap();
    session.choose_path(PathChoice::Path1).await.unwrap();
    session.chat("Where do I start?").await;
    assert_eq!(session.companion().chat_log().len(), 2);

    session.leave_problem();

    assert!(session.companion().chat_log().is_empty());
    assert!(session.current_problem().is_none());
    assert!(matches!(
        session.submit(SOLUTION, "python").await,
        Err(SessionError::NoProblem)
    ));
}

#[tokio::test]
async fn test_actions_out_of_order_are_rejected() {
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut session = harness.session();

    assert!(matches!(
        session.choose_path(PathChoice::Path1).await,
        Err(SessionError::NoTopic)
    ));
    assert!(matches!(
        session.select_topic("Underwater Basket Weaving").await,
        Err(SessionError::UnknownTopic(_))
    ));
    session.select_topic(TOPIC).await.unwrap();
    assert!(matches!(
        session.next_problem().await,
        Err(SessionError::NoPath)
    ));
}

#[tokio::test]
async fn test_topic_list_counts_completed_problems() {
    let mut harness = Harness::new(Arc::new(easy_pair_source()));
    harness.store = Arc::new(InMemoryProgressStore::seeded(
        &[],
        &["two-sum", "contains-duplicate", "valid-parentheses"],
    ));
    let session = harness.session();

    let topics = session.topics().await.unwrap();

    assert_eq!(topics.len(), 17);
    let arrays = topics.iter().find(|t| t.name == TOPIC).unwrap();
    assert_eq!(arrays.completed, 2);
    assert_eq!(arrays.total, 9);
}

#[tokio::test]
async fn test_choice_screen_describes_both_paths_for_the_topic() {
    // Arrange
    let harness = Harness::new(Arc::new(easy_pair_source()));
    let mut session = harness.session();
    assert!(matches!(
        session.choice_screen().await,
        Err(SessionError::NoTopic)
    ));
    session.select_topic(TOPIC).await.unwrap();

    // Act
    let screen = session.choice_screen().await.unwrap();

    // Assert
    assert_eq!(screen.paths[0].choice, PathChoice::Path1);
    assert_eq!(
        screen.paths[0].title,
        "pathTitle: approach A: the systematic path through Arrays & Hashing"
    );
    assert_eq!(
        screen.paths[1].title,
        "pathTitle: approach B: the creative path through Arrays & Hashing"
    );
    let presents = harness
        .dialogue
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("present("))
        .count();
    assert_eq!(presents, 5);
}
