//! Playback state and timing.
//!
//! One review plays as `Idle -> Thinking -> Speaking(0) -> ... ->
//! Speaking(n - 1) -> Idle`. Each utterance stays on screen for
//! [`utterance_duration`]; the bubble hides [`AUTO_HIDE_AFTER`] once the
//! sequence returns to `Idle`.

use std::time::Duration;

use crate::domain::transcript::Utterance;

const PER_CHARACTER: Duration = Duration::from_millis(30);
const MAX_TYPING: Duration = Duration::from_millis(2000);
const READING_PAUSE: Duration = Duration::from_millis(1000);

/// Delay between the end of a sequence and hiding the bubble.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Waiting for the dialogue service.
    Thinking,
    /// Showing the utterance at this index.
    Speaking(usize),
}

/// What the companion currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionView {
    pub state: PlaybackState,
    /// Utterance on screen; kept after the sequence ends until hidden.
    pub utterance: Option<Utterance>,
    pub visible: bool,
}

impl CompanionView {
    #[must_use]
    pub fn thinking() -> Self {
        Self {
            state: PlaybackState::Thinking,
            utterance: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn speaking(index: usize, utterance: Utterance) -> Self {
        Self {
            state: PlaybackState::Speaking(index),
            utterance: Some(utterance),
            visible: true,
        }
    }
}

/// On-screen time for `text`: `min(len * 30ms, 2000ms) + 1000ms`, with
/// length counted in characters.
#[must_use]
pub fn utterance_duration(text: &str) -> Duration {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    PER_CHARACTER.saturating_mul(chars).min(MAX_TYPING) + READING_PAUSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_scales_with_length() {
        assert_eq!(utterance_duration("Great job."), Duration::from_millis(1300));
        assert_eq!(utterance_duration(""), Duration::from_millis(1000));
    }

    #[test]
    fn test_long_text_is_capped() {
        let long = "x".repeat(500);

        assert_eq!(utterance_duration(&long), Duration::from_millis(3000));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(utterance_duration("héllo"), Duration::from_millis(1150));
    }

    #[test]
    fn test_default_view_is_idle_and_hidden() {
        let view = CompanionView::default();

        assert_eq!(view.state, PlaybackState::Idle);
        assert!(!view.visible);
    }
}
