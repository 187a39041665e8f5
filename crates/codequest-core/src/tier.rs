//! Difficulty levels and per-topic progression tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty of a single problem as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Introductory problems.
    Easy,
    /// Intermediate problems.
    Medium,
    /// Advanced problems.
    Hard,
}

impl Difficulty {
    /// Returns the catalog spelling of this difficulty.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a difficulty or tier label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for Difficulty {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(UnknownLevel(s.to_owned())),
        }
    }
}

/// The tier a learner is currently working through for one topic.
///
/// Tiers only ever move forward: `Easy -> Medium -> Hard -> Exhausted`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// Working through easy problems. Default for unseen topics.
    #[default]
    Easy,
    /// Working through medium problems.
    Medium,
    /// Working through hard problems.
    Hard,
    /// No problems remain at any difficulty. Terminal.
    Exhausted,
}

impl Tier {
    /// Returns the tier after this one. `Exhausted` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard | Self::Exhausted => Self::Exhausted,
        }
    }

    /// Returns the problem difficulty served at this tier, or `None` once
    /// the topic is exhausted.
    #[must_use]
    pub const fn difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Easy => Some(Difficulty::Easy),
            Self::Medium => Some(Difficulty::Medium),
            Self::Hard => Some(Difficulty::Hard),
            Self::Exhausted => None,
        }
    }

    /// Returns `true` for the terminal tier.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the persisted spelling of this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Exhausted => "Exhausted",
        }
    }
}

impl From<Difficulty> for Tier {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("exhausted") {
            return Ok(Self::Exhausted);
        }
        s.parse::<Difficulty>()
            .map(Self::from)
            .map_err(|_| UnknownLevel(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_forward_and_stops_at_exhausted() {
        assert_eq!(Tier::Easy.next(), Tier::Medium);
        assert_eq!(Tier::Medium.next(), Tier::Hard);
        assert_eq!(Tier::Hard.next(), Tier::Exhausted);
        assert_eq!(Tier::Exhausted.next(), Tier::Exhausted);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(Tier::Easy < Tier::Medium);
        assert!(Tier::Hard < Tier::Exhausted);
        assert_eq!(Tier::default(), Tier::Easy);
    }

    #[test]
    fn test_exhausted_has_no_difficulty() {
        assert_eq!(Tier::Medium.difficulty(), Some(Difficulty::Medium));
        assert_eq!(Tier::Exhausted.difficulty(), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Tier>(), Ok(Tier::Hard));
        assert_eq!("exhausted".parse::<Tier>(), Ok(Tier::Exhausted));
        assert!("legendary".parse::<Tier>().is_err());
    }
}
