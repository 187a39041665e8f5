//! Next-problem resolution with degraded fallbacks.
//!
//! Resolution runs the selector over the topic listing. When the topic
//! itself yields nothing (the listing fails or is empty) it re-runs the
//! selector over the global catalog, first at Easy and then at Medium, and
//! finally hands out the built-in default problem. Each step is reported
//! through [`ProblemOrigin`] so the caller can tell the learner they are
//! looking at a general problem.

use std::collections::BTreeSet;
use std::sync::Arc;

use codequest_core::problem::{ProblemDetail, ProblemSummary};
use codequest_core::rng::DeterministicRng;
use codequest_core::tier::{Difficulty, Tier};
use tracing::{info, instrument, warn};

use crate::application::gateway::{GatewayError, ProblemGateway};
use crate::domain::bank::ProblemBank;
use crate::domain::selector::{PathChoice, Selection, select_next};

const FALLBACK_DIFFICULTIES: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Medium];

/// Why the topic listing could not supply a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCause {
    /// The catalog answered but lists nothing usable.
    Empty,
    /// A catalog call failed. `transient` failures are worth retrying soon.
    Unavailable { transient: bool },
}

impl From<&GatewayError> for FallbackCause {
    fn from(err: &GatewayError) -> Self {
        Self::Unavailable {
            transient: err.is_transient(),
        }
    }
}

impl FallbackCause {
    fn retry_hint(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Unavailable { transient: true } => {
                " Retry in a moment to get a problem from this topic."
            }
            Self::Unavailable { transient: false } => {
                " Retry later; if this keeps happening the catalog service needs attention."
            }
        }
    }
}

/// Where a resolved problem came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemOrigin {
    /// The topic listing, at the learner's tier.
    Topic,
    /// The global catalog, at the given difficulty.
    GeneralCatalog {
        difficulty: Difficulty,
        cause: FallbackCause,
    },
    /// The built-in bank; no catalog problem was usable.
    BuiltIn { cause: FallbackCause },
}

impl ProblemOrigin {
    /// Informational message for degraded origins. Failures carry a retry
    /// hint; an empty catalog does not.
    #[must_use]
    pub fn notice(self) -> Option<String> {
        match self {
            Self::Topic => None,
            Self::GeneralCatalog { difficulty, cause } => {
                let lead = match cause {
                    FallbackCause::Empty => "No problems are listed for this topic yet",
                    FallbackCause::Unavailable { .. } => "This topic's problems could not be loaded",
                };
                Some(format!(
                    "{lead}, showing a general {difficulty} problem instead.{}",
                    cause.retry_hint()
                ))
            }
            Self::BuiltIn { cause } => {
                let lead = match cause {
                    FallbackCause::Empty => "The problem catalog has nothing left to offer",
                    FallbackCause::Unavailable { .. } => "The problem catalog is unavailable",
                };
                Some(format!(
                    "{lead}, showing a built-in problem instead.{}",
                    cause.retry_hint()
                ))
            }
        }
    }

    #[must_use]
    pub fn is_built_in(self) -> bool {
        matches!(self, Self::BuiltIn { .. })
    }
}

/// A problem chosen for the learner, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProblem {
    pub summary: ProblemSummary,
    pub origin: ProblemOrigin,
}

/// Outcome of [`ProblemResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Selected(ResolvedProblem),
    /// The topic has problems, but none remain at this tier.
    TierExhausted,
}

/// Where a loaded problem detail came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSource {
    Catalog,
    /// The bank's copy of the requested problem.
    Bank,
    /// The requested problem was unavailable; this is the topic default.
    Substitute,
}

/// A problem ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProblem {
    pub detail: ProblemDetail,
    pub source: DetailSource,
}

impl LoadedProblem {
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            DetailSource::Catalog | DetailSource::Bank => None,
            DetailSource::Substitute => {
                Some(
                    "That problem could not be loaded, showing a general problem instead. \
                     Retry in a moment to open it again.",
                )
            }
        }
    }
}

/// Chooses and loads problems, degrading instead of failing.
#[derive(Debug, Clone)]
pub struct ProblemResolver {
    gateway: ProblemGateway,
    bank: Arc<ProblemBank>,
}

impl ProblemResolver {
    #[must_use]
    pub fn new(gateway: ProblemGateway, bank: Arc<ProblemBank>) -> Self {
        Self { gateway, bank }
    }

    #[must_use]
    pub fn bank(&self) -> &ProblemBank {
        &self.bank
    }

    /// Picks the next problem for `topic_id` at `tier`.
    ///
    /// Never fails. An `Exhausted` tier resolves to
    /// [`Resolution::TierExhausted`] without contacting the catalog.
    #[instrument(skip(self, path, completed, rng), fields(path = %path))]
    pub async fn resolve(
        &self,
        topic_id: &str,
        tier: Tier,
        path: &PathChoice,
        completed: &BTreeSet<String>,
        rng: &mut dyn DeterministicRng,
    ) -> Resolution {
        if tier.is_exhausted() {
            return Resolution::TierExhausted;
        }

        let cause = match self.gateway.list_by_topic(topic_id).await {
            Ok(listing) if !listing.is_empty() => {
                return match select_next(&listing, tier, path, completed, rng) {
                    Selection::Problem(summary) => Resolution::Selected(ResolvedProblem {
                        summary,
                        origin: ProblemOrigin::Topic,
                    }),
                    Selection::Exhausted => Resolution::TierExhausted,
                };
            }
            Ok(_) => {
                info!("topic listing is empty, using the general catalog");
                FallbackCause::Empty
            }
            Err(err) => {
                warn!(error = %err, "topic listing unavailable, using the general catalog");
                FallbackCause::from(&err)
            }
        };

        Resolution::Selected(self.fallback(topic_id, path, completed, cause, rng).await)
    }

    async fn fallback(
        &self,
        topic_id: &str,
        path: &PathChoice,
        completed: &BTreeSet<String>,
        cause: FallbackCause,
        rng: &mut dyn DeterministicRng,
    ) -> ResolvedProblem {
        let (all, cause) = match self.gateway.list_all().await {
            Ok(all) => (all, cause),
            Err(err) => {
                warn!(error = %err, "general catalog unavailable");
                (Vec::new(), FallbackCause::from(&err))
            }
        };

        for difficulty in FALLBACK_DIFFICULTIES {
            if let Selection::Problem(summary) =
                select_next(&all, Tier::from(difficulty), path, completed, rng)
            {
                return ResolvedProblem {
                    summary,
                    origin: ProblemOrigin::GeneralCatalog { difficulty, cause },
                };
            }
        }

        warn!("no catalog problem available, using the built-in default");
        ResolvedProblem {
            summary: self.bank.default_summary(topic_id),
            origin: ProblemOrigin::BuiltIn { cause },
        }
    }

    /// Loads the detail for a resolved problem.
    ///
    /// Built-in problems come straight from the bank. Otherwise the catalog
    /// is asked first; if it fails, the bank's copy of the same problem is
    /// used, then the topic's default problem.
    #[instrument(skip(self, resolved), fields(problem_id = %resolved.summary.id))]
    pub async fn load_detail(&self, resolved: &ResolvedProblem) -> LoadedProblem {
        let summary = &resolved.summary;
        if !resolved.origin.is_built_in() {
            match self.gateway.fetch_detail(&summary.id).await {
                Ok(detail) => {
                    return LoadedProblem {
                        detail,
                        source: DetailSource::Catalog,
                    };
                }
                Err(err) => warn!(error = %err, "problem detail unavailable, using the bank"),
            }
        }

        match self.bank.detail(&summary.id) {
            Some(detail) => LoadedProblem {
                detail: detail.clone(),
                source: DetailSource::Bank,
            },
            None => LoadedProblem {
                detail: self.bank.default_for_topic(&summary.topic_id).clone(),
                source: DetailSource::Substitute,
            },
        }
    }
}
