//! Story lifecycle for one topic playthrough.
//!
//! `begin` hands back a placeholder at once and refines it in the
//! background for at most [`STORY_REFINE_BUDGET`]. Continuations block on
//! the story service and fall back to canned text; neither path surfaces an
//! error.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use codequest_core::story::StoryService;
use codequest_core::tier::Tier;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::domain::state::NarrativeState;

/// How long the opening story may take before the placeholder is final.
pub const STORY_REFINE_BUDGET: Duration = Duration::from_secs(3);

/// Front for the story service.
#[derive(Clone)]
pub struct NarrativeSession {
    service: Arc<dyn StoryService>,
    refine_budget: Duration,
}

impl fmt::Debug for NarrativeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeSession")
            .field("refine_budget", &self.refine_budget)
            .finish_non_exhaustive()
    }
}

impl NarrativeSession {
    #[must_use]
    pub fn new(service: Arc<dyn StoryService>) -> Self {
        Self::with_refine_budget(service, STORY_REFINE_BUDGET)
    }

    #[must_use]
    pub fn with_refine_budget(service: Arc<dyn StoryService>, refine_budget: Duration) -> Self {
        Self {
            service,
            refine_budget,
        }
    }

    /// Starts a playthrough of `topic_id`.
    ///
    /// Must be called from within a Tokio runtime: the refinement runs as a
    /// spawned task.
    #[instrument(skip(self))]
    pub fn begin(&self, topic_id: &str) -> Playthrough {
        let (tx, rx) = watch::channel(NarrativeState::placeholder(topic_id));
        let service = Arc::clone(&self.service);
        let budget = self.refine_budget;
        let topic = topic_id.to_owned();

        let refine = tokio::spawn(async move {
            match tokio::time::timeout(budget, service.start(&topic)).await {
                Ok(Ok(reply)) => {
                    if tx.send(NarrativeState::from(reply)).is_err() {
                        debug!(topic_id = %topic, "playthrough ended before the story arrived");
                    }
                }
                Ok(Err(err)) => {
                    warn!(topic_id = %topic, error = %err, "story service failed, keeping placeholder");
                }
                Err(_) => {
                    warn!(topic_id = %topic, ?budget, "story service too slow, keeping placeholder");
                }
            }
        });

        Playthrough {
            topic_id: topic_id.to_owned(),
            session: self.clone(),
            opening: rx,
            refine: Some(refine),
            chapter: None,
            advanced: BTreeSet::new(),
        }
    }

    /// Continues `state` into the tier the learner just reached.
    ///
    /// Never fails: a service error yields [`NarrativeState::congratulated`],
    /// so the result is always a valid input to another continuation.
    #[instrument(skip(self, state), fields(conversation_id = %state.conversation_id))]
    pub async fn continue_story(&self, state: &NarrativeState, tier: Tier) -> NarrativeState {
        match self.service.continue_story(&state.continuation(tier)).await {
            Ok(reply) => {
                info!(checkpoint_id = %reply.checkpoint_id, "story continued");
                NarrativeState::from(reply)
            }
            Err(err) => {
                warn!(error = %err, "story continuation failed, using canned chapter");
                state.congratulated(tier)
            }
        }
    }
}

/// The story of one topic playthrough.
///
/// Each tier transition is narrated at most once. Dropping the playthrough
/// cancels a refinement still in flight.
#[derive(Debug)]
pub struct Playthrough {
    topic_id: String,
    session: NarrativeSession,
    opening: watch::Receiver<NarrativeState>,
    refine: Option<JoinHandle<()>>,
    chapter: Option<NarrativeState>,
    advanced: BTreeSet<Tier>,
}

impl Playthrough {
    #[must_use]
    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    /// The story as it stands now. May still be the placeholder.
    #[must_use]
    pub fn current(&self) -> NarrativeState {
        self.chapter
            .clone()
            .unwrap_or_else(|| self.opening.borrow().clone())
    }

    /// Waits for the opening refinement to finish or run out of budget.
    pub async fn settled(&mut self) -> NarrativeState {
        if let Some(refine) = self.refine.take() {
            if let Err(err) = refine.await {
                debug!(error = %err, "story refinement task ended early");
            }
        }
        self.current()
    }

    /// Narrates the move into `tier`.
    ///
    /// Returns `None` without contacting the story service when `tier` is
    /// not `Medium` or `Hard`, or when this transition was already narrated.
    pub async fn advance_to(&mut self, tier: Tier) -> Option<NarrativeState> {
        if !matches!(tier, Tier::Medium | Tier::Hard) {
            return None;
        }
        if !self.advanced.insert(tier) {
            debug!(topic_id = %self.topic_id, %tier, "tier already narrated");
            return None;
        }
        if let Some(refine) = self.refine.take() {
            refine.abort();
        }

        let next = self.session.continue_story(&self.current(), tier).await;
        self.chapter = Some(next.clone());
        Some(next)
    }

    /// Appends the closing chapter once the topic is exhausted. Returns
    /// `None` if the playthrough was already concluded.
    pub fn conclude(&mut self) -> Option<NarrativeState> {
        if !self.advanced.insert(Tier::Exhausted) {
            return None;
        }
        let done = self.current().concluded(&self.topic_id);
        self.chapter = Some(done.clone());
        Some(done)
    }
}

impl Drop for Playthrough {
    fn drop(&mut self) {
        if let Some(refine) = self.refine.take() {
            refine.abort();
        }
    }
}
