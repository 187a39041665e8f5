//! Pure next-problem selection.
//!
//! `path1` always takes the first eligible candidate and `path2` the second
//! (or the first when only one exists), so the two named paths diverge
//! whenever they can. Any other choice is free exploration and picks a
//! uniformly random candidate through the injected RNG.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use codequest_core::problem::ProblemSummary;
use codequest_core::rng::DeterministicRng;
use codequest_core::tier::Tier;

/// Path chosen by the learner on the choice screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathChoice {
    /// First path: takes the first eligible candidate.
    Path1,
    /// Second path: takes the second eligible candidate.
    Path2,
    /// Any other choice value: a random eligible candidate.
    Explore(String),
}

impl From<&str> for PathChoice {
    fn from(s: &str) -> Self {
        match s.trim() {
            "path1" => Self::Path1,
            "path2" => Self::Path2,
            other => Self::Explore(other.to_owned()),
        }
    }
}

impl FromStr for PathChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for PathChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path1 => f.write_str("path1"),
            Self::Path2 => f.write_str("path2"),
            Self::Explore(value) => f.write_str(value),
        }
    }
}

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The next problem to present.
    Problem(ProblemSummary),
    /// No uncompleted candidate remains at the requested tier.
    Exhausted,
}

/// Candidates matching `tier` that have not been completed, in input order.
#[must_use]
pub fn eligible<'a>(
    candidates: &'a [ProblemSummary],
    tier: Tier,
    completed: &BTreeSet<String>,
) -> Vec<&'a ProblemSummary> {
    let Some(difficulty) = tier.difficulty() else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|p| p.difficulty == difficulty && !completed.contains(&p.id))
        .collect()
}

/// Chooses the next problem for a learner.
///
/// Never fails: an empty eligible set is reported as
/// [`Selection::Exhausted`]. The RNG is consulted only on the exploration
/// branch with two or more eligible candidates.
pub fn select_next(
    candidates: &[ProblemSummary],
    tier: Tier,
    path: &PathChoice,
    completed: &BTreeSet<String>,
    rng: &mut dyn DeterministicRng,
) -> Selection {
    let pool = eligible(candidates, tier, completed);
    let chosen = match (pool.as_slice(), path) {
        ([], _) => None,
        ([only], _) => Some(*only),
        ([first, ..], PathChoice::Path1) => Some(*first),
        ([_, second, ..], PathChoice::Path2) => Some(*second),
        (pool, PathChoice::Explore(_)) => {
            let max = u32::try_from(pool.len() - 1).unwrap_or(u32::MAX);
            let index = rng.next_u32_range(0, max) as usize;
            pool.get(index).or(pool.first()).copied()
        }
    };
    chosen.map_or(Selection::Exhausted, |p| Selection::Problem(p.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::tier::Difficulty;
    use codequest_test_support::{MockRng, SequenceRng};

    fn summary(id: &str, difficulty: Difficulty) -> ProblemSummary {
        ProblemSummary::new(id, "Arrays & Hashing", difficulty)
    }

    fn none_completed() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn test_path_choice_parsing() {
        assert_eq!(PathChoice::from("path1"), PathChoice::Path1);
        assert_eq!(PathChoice::from("path2"), PathChoice::Path2);
        assert_eq!(
            PathChoice::from("efficient"),
            PathChoice::Explore("efficient".into())
        );
    }

    #[test]
    fn test_path1_and_path2_diverge_on_two_candidates() {
        // Arrange
        let candidates = vec![summary("A", Difficulty::Easy), summary("B", Difficulty::Easy)];

        // Act
        let first = select_next(
            &candidates,
            Tier::Easy,
            &PathChoice::Path1,
            &none_completed(),
            &mut MockRng,
        );
        let second = select_next(
            &candidates,
            Tier::Easy,
            &PathChoice::Path2,
            &none_completed(),
            &mut MockRng,
        );

        // Assert
        assert_eq!(first, Selection::Problem(summary("A", Difficulty::Easy)));
        assert_eq!(second, Selection::Problem(summary("B", Difficulty::Easy)));
    }

    #[test]
    fn test_path2_with_single_candidate_returns_it() {
        let candidates = vec![summary("A", Difficulty::Easy), summary("M", Difficulty::Medium)];

        let selection = select_next(
            &candidates,
            Tier::Easy,
            &PathChoice::Path2,
            &none_completed(),
            &mut MockRng,
        );

        assert_eq!(selection, Selection::Problem(summary("A", Difficulty::Easy)));
    }

    #[test]
    fn test_single_candidate_skips_rng_on_explore() {
        let candidates = vec![summary("A", Difficulty::Easy)];
        let mut rng = SequenceRng::new(vec![]);

        let selection = select_next(
            &candidates,
            Tier::Easy,
            &PathChoice::Explore("wander".into()),
            &none_completed(),
            &mut rng,
        );

        assert_eq!(selection, Selection::Problem(summary("A", Difficulty::Easy)));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_filters_by_tier_and_completed() {
        let candidates = vec![
            summary("A", Difficulty::Easy),
            summary("M1", Difficulty::Medium),
            summary("M2", Difficulty::Medium),
            summary("M3", Difficulty::Medium),
        ];
        let completed: BTreeSet<String> = ["M1".to_owned()].into();

        let first = select_next(
            &candidates,
            Tier::Medium,
            &PathChoice::Path1,
            &completed,
            &mut MockRng,
        );
        let second = select_next(
            &candidates,
            Tier::Medium,
            &PathChoice::Path2,
            &completed,
            &mut MockRng,
        );

        assert_eq!(first, Selection::Problem(summary("M2", Difficulty::Medium)));
        assert_eq!(second, Selection::Problem(summary("M3", Difficulty::Medium)));
    }

    #[test]
    fn test_empty_eligible_set_is_exhausted() {
        let candidates = vec![summary("A", Difficulty::Easy)];
        let completed: BTreeSet<String> = ["A".to_owned()].into();

        let selection = select_next(
            &candidates,
            Tier::Easy,
            &PathChoice::Path1,
            &completed,
            &mut MockRng,
        );

        assert_eq!(selection, Selection::Exhausted);
        assert_eq!(
            select_next(&[], Tier::Hard, &PathChoice::Path2, &none_completed(), &mut MockRng),
            Selection::Exhausted
        );
    }

    #[test]
    fn test_exhausted_tier_never_selects() {
        let candidates = vec![summary("A", Difficulty::Easy), summary("H", Difficulty::Hard)];

        let selection = select_next(
            &candidates,
            Tier::Exhausted,
            &PathChoice::Path1,
            &none_completed(),
            &mut MockRng,
        );

        assert_eq!(selection, Selection::Exhausted);
    }

    #[test]
    fn test_explore_uses_rng_index() {
        let candidates = vec![
            summary("A", Difficulty::Hard),
            summary("B", Difficulty::Hard),
            summary("C", Difficulty::Hard),
        ];
        let mut rng = SequenceRng::new(vec![2, 0]);
        let explore = PathChoice::Explore("surprise me".into());

        let first = select_next(&candidates, Tier::Hard, &explore, &none_completed(), &mut rng);
        let second = select_next(&candidates, Tier::Hard, &explore, &none_completed(), &mut rng);

        assert_eq!(first, Selection::Problem(summary("C", Difficulty::Hard)));
        assert_eq!(second, Selection::Problem(summary("A", Difficulty::Hard)));
    }
}
