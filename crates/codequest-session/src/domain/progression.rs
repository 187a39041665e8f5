//! Values handed back to the interface layer after each learner action.

use codequest_catalog::application::resolver::{LoadedProblem, ProblemOrigin, ResolvedProblem};
use codequest_companion::domain::transcript::Utterance;
use codequest_core::problem::ProblemDetail;
use codequest_core::tier::Tier;
use codequest_execution::application::coordinator::SubmissionReport;
use codequest_narrative::domain::state::NarrativeState;

/// Result of picking a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicOpening {
    pub topic_id: String,
    pub tier: Tier,
    /// Opening story; usually still the placeholder.
    pub story: NarrativeState,
}

/// A problem on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemView {
    pub topic_id: String,
    /// Tier the learner was on when this problem was chosen.
    pub tier: Tier,
    pub origin: ProblemOrigin,
    pub detail: ProblemDetail,
    /// Degradation messages to show above the problem.
    pub notices: Vec<String>,
}

impl ProblemView {
    #[must_use]
    pub fn new(topic_id: &str, tier: Tier, resolved: &ResolvedProblem, loaded: LoadedProblem) -> Self {
        let notices = resolved
            .origin
            .notice()
            .into_iter()
            .chain(loaded.notice().map(str::to_owned))
            .collect();
        Self {
            topic_id: topic_id.to_owned(),
            tier,
            origin: resolved.origin,
            detail: loaded.detail,
            notices,
        }
    }
}

/// Where the learner goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Problem(ProblemView),
    /// Every tier of the topic is done; carries the closing story.
    TopicComplete(NarrativeState),
}

/// Outcome of choosing a path or asking for the next problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Story chapters unlocked on the way, oldest first.
    pub chapters: Vec<NarrativeState>,
    pub step: Step,
}

/// Outcome of a submission that reached the execution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Every test case passed and the problem is recorded as completed.
    Solved(SubmissionReport),
    /// Anything else; the companion is reviewing the attempt.
    NeedsWork {
        report: SubmissionReport,
        critique: Vec<Utterance>,
    },
}

impl SubmissionOutcome {
    #[must_use]
    pub fn report(&self) -> &SubmissionReport {
        match self {
            Self::Solved(report) | Self::NeedsWork { report, .. } => report,
        }
    }
}
