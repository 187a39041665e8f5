//! The practice session: one learner moving through topics.
//!
//! Pure decisions live in the catalog, narrative and companion crates; this
//! module sequences the I/O around them. Within one progression step every
//! ledger write is awaited before the story continuation that depends on it
//! is requested.

use std::fmt;
use std::sync::Arc;

use codequest_catalog::application::resolver::{ProblemResolver, Resolution};
use codequest_catalog::domain::bank::TopicSummary;
use codequest_catalog::domain::selector::PathChoice;
use codequest_companion::application::companion::Companion;
use codequest_companion::domain::transcript::Utterance;
use codequest_core::rng::DeterministicRng;
use codequest_execution::application::coordinator::ExecutionCoordinator;
use codequest_narrative::application::playthrough::{NarrativeSession, Playthrough};
use codequest_narrative::domain::state::NarrativeState;
use codequest_progress::application::ledger::DifficultyLedger;
use tracing::{debug, info, instrument};

use crate::application::presenter::PathPresenter;
use crate::domain::paths::ChoiceScreen;
use crate::domain::progression::{Progression, ProblemView, Step, SubmissionOutcome, TopicOpening};
use crate::error::SessionError;

struct TopicRun {
    playthrough: Playthrough,
    path: Option<PathChoice>,
    problem: Option<ProblemView>,
}

/// Orchestrates a learner's session.
pub struct PracticeSession {
    ledger: DifficultyLedger,
    resolver: ProblemResolver,
    narrative: NarrativeSession,
    executor: ExecutionCoordinator,
    companion: Arc<Companion>,
    presenter: PathPresenter,
    rng: Box<dyn DeterministicRng>,
    run: Option<TopicRun>,
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("topic", &self.run.as_ref().map(|run| run.playthrough.topic_id()))
            .finish_non_exhaustive()
    }
}

impl PracticeSession {
    #[must_use]
    pub fn new(
        ledger: DifficultyLedger,
        resolver: ProblemResolver,
        narrative: NarrativeSession,
        executor: ExecutionCoordinator,
        companion: Arc<Companion>,
        presenter: PathPresenter,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            ledger,
            resolver,
            narrative,
            executor,
            companion,
            presenter,
            rng,
            run: None,
        }
    }

    #[must_use]
    pub fn companion(&self) -> &Arc<Companion> {
        &self.companion
    }

    /// Every topic with its completion count.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Progress`] if the completed set cannot be read.
    pub async fn topics(&self) -> Result<Vec<TopicSummary>, SessionError> {
        let completed = self.ledger.completed().await?;
        Ok(self.resolver.bank().topic_summaries(completed.as_set()))
    }

    /// Starts a playthrough of `topic_id`, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTopic`] for a topic the bank does not
    /// list, or [`SessionError::Progress`] if the tier cannot be read.
    #[instrument(skip(self))]
    pub async fn select_topic(&mut self, topic_id: &str) -> Result<TopicOpening, SessionError> {
        if self.resolver.bank().topic(topic_id).is_none() {
            return Err(SessionError::UnknownTopic(topic_id.to_owned()));
        }
        let tier = self.ledger.get_tier(topic_id).await?;

        self.companion.leave();
        let playthrough = self.narrative.begin(topic_id);
        let story = playthrough.current();
        self.run = Some(TopicRun {
            playthrough,
            path: None,
            problem: None,
        });

        info!(%tier, "topic selected");
        Ok(TopicOpening {
            topic_id: topic_id.to_owned(),
            tier,
            story,
        })
    }

    /// The story as it currently reads, if a topic is selected.
    #[must_use]
    pub fn story(&self) -> Option<NarrativeState> {
        self.run.as_ref().map(|run| run.playthrough.current())
    }

    /// Waits for the opening story to arrive or time out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTopic`] if no topic is selected.
    pub async fn settled_story(&mut self) -> Result<NarrativeState, SessionError> {
        let run = self.run.as_mut().ok_or(SessionError::NoTopic)?;
        Ok(run.playthrough.settled().await)
    }

    /// Writes the journey line and the two path presentations for the
    /// story as it currently reads.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTopic`] if no topic is selected.
    pub async fn choice_screen(&self) -> Result<ChoiceScreen, SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoTopic)?;
        let story = run.playthrough.current();
        Ok(self
            .presenter
            .present(run.playthrough.topic_id(), &story.story_text)
            .await)
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&ProblemView> {
        self.run.as_ref().and_then(|run| run.problem.as_ref())
    }

    /// Records the learner's path and presents the first problem on it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTopic`] if no topic is selected, or
    /// [`SessionError::Progress`] if the ledger fails.
    #[instrument(skip(self, path), fields(%path))]
    pub async fn choose_path(&mut self, path: PathChoice) -> Result<Progression, SessionError> {
        let run = self.run.as_mut().ok_or(SessionError::NoTopic)?;
        run.path = Some(path);
        self.progress().await
    }

    /// Leaves the current problem and presents the next one on the same
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTopic`] or [`SessionError::NoPath`] when
    /// there is nothing to continue, or [`SessionError::Progress`] if the
    /// ledger fails.
    #[instrument(skip(self))]
    pub async fn next_problem(&mut self) -> Result<Progression, SessionError> {
        self.progress().await
    }

    /// Closes the current problem. Pending companion output is discarded
    /// and the chat log cleared.
    pub fn leave_problem(&mut self) {
        self.companion.leave();
        if let Some(run) = self.run.as_mut() {
            run.problem = None;
        }
    }

    /// Runs the learner's code against the open problem's examples.
    ///
    /// A pass is recorded in the ledger before returning and triggers no
    /// review. Every other outcome, including an unreachable execution
    /// service, is handed to the companion.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoProblem`] if no problem is open,
    /// [`SessionError::Submission`] if the submission is rejected locally,
    /// or [`SessionError::Progress`] if the completion cannot be recorded.
    #[instrument(skip(self, code))]
    pub async fn submit(&self, code: &str, language: &str) -> Result<SubmissionOutcome, SessionError> {
        let problem = self.current_problem().ok_or(SessionError::NoProblem)?;
        let problem_id = problem.detail.id.as_str();
        let test_cases = problem.detail.test_cases();

        let report = self
            .executor
            .run(code, language, problem_id, &test_cases)
            .await?;

        if report.outcome.is_all_passed() {
            self.ledger.mark_completed(problem_id).await?;
            return Ok(SubmissionOutcome::Solved(report));
        }

        let critique = self.companion.review(code, language).await;
        Ok(SubmissionOutcome::NeedsWork { report, critique })
    }

    /// Asks the companion a question. Never fails.
    pub async fn chat(&self, message: &str) -> Utterance {
        self.companion.chat(message).await
    }

    async fn progress(&mut self) -> Result<Progression, SessionError> {
        self.companion.leave();
        let Self {
            ledger,
            resolver,
            rng,
            run,
            ..
        } = self;
        let run = run.as_mut().ok_or(SessionError::NoTopic)?;
        let path = run.path.clone().ok_or(SessionError::NoPath)?;
        run.problem = None;
        let topic_id = run.playthrough.topic_id().to_owned();
        let mut chapters = Vec::new();

        // Each pass either returns or moves the tier forward, so this ends
        // after at most three advances.
        loop {
            let tier = ledger.get_tier(&topic_id).await?;
            let completed = ledger.completed().await?;

            match resolver
                .resolve(&topic_id, tier, &path, completed.as_set(), &mut **rng)
                .await
            {
                Resolution::Selected(resolved) => {
                    let loaded = resolver.load_detail(&resolved).await;
                    let view = ProblemView::new(&topic_id, tier, &resolved, loaded);
                    info!(problem_id = %view.detail.id, %tier, origin = ?view.origin, "problem ready");
                    run.problem = Some(view.clone());
                    return Ok(Progression {
                        chapters,
                        step: Step::Problem(view),
                    });
                }
                Resolution::TierExhausted => {
                    let next = ledger.advance_tier(&topic_id).await?;
                    if next.is_exhausted() {
                        if run.playthrough.conclude().is_none() {
                            debug!("topic already concluded");
                        }
                        info!("topic complete");
                        return Ok(Progression {
                            chapters,
                            step: Step::TopicComplete(run.playthrough.current()),
                        });
                    }
                    if let Some(chapter) = run.playthrough.advance_to(next).await {
                        chapters.push(chapter);
                    }
                }
            }
        }
    }
}
