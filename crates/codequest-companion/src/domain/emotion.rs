//! Keyword-driven emotion tagging.

use std::fmt;

/// Expression the companion wears while speaking an utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Thinking,
    Surprised,
}

impl Emotion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Thinking => "thinking",
            Self::Surprised => "surprised",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const FAILURE_WORDS: &[&str] = &[
    "error",
    "errors",
    "fail",
    "fails",
    "failed",
    "failing",
    "failure",
    "wrong",
    "incorrect",
    "bug",
    "bugs",
    "crash",
    "crashed",
    "exception",
    "unfortunately",
    "sorry",
];

const PRAISE_WORDS: &[&str] = &[
    "great",
    "good",
    "nice",
    "excellent",
    "perfect",
    "awesome",
    "correct",
    "passed",
    "success",
    "congratulations",
    "well done",
    "nicely done",
];

const CONTRAST_WORDS: &[&str] = &[
    "but",
    "however",
    "although",
    "though",
    "instead",
    "whereas",
    "yet",
    "consider",
    "alternatively",
    "on the other hand",
];

const URGENCY_WORDS: &[&str] = &[
    "wow",
    "whoa",
    "careful",
    "watch out",
    "important",
    "warning",
    "immediately",
];

/// Rules in priority order; the first match wins.
const RULES: [(Emotion, &[&str]); 4] = [
    (Emotion::Sad, FAILURE_WORDS),
    (Emotion::Happy, PRAISE_WORDS),
    (Emotion::Thinking, CONTRAST_WORDS),
    (Emotion::Surprised, URGENCY_WORDS),
];

/// Lowercases `text` and reduces every run of non-alphanumeric characters
/// to one space, padded at both ends so whole words match as ` word `.
fn normalise(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' {
            out.extend(c.to_lowercase());
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    if !out.ends_with(' ') {
        out.push(' ');
    }
    out
}

/// Tags `text` with an emotion by whole-word keyword scan.
///
/// Rule order is sad, happy, thinking, surprised, neutral. An exclamation
/// mark counts as an urgency marker.
#[must_use]
pub fn classify_emotion(text: &str) -> Emotion {
    let words = normalise(text);
    let mentions = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|keyword| words.contains(&format!(" {keyword} ")))
    };

    for (emotion, keywords) in RULES {
        if mentions(keywords) || (emotion == Emotion::Surprised && text.contains('!')) {
            return emotion;
        }
    }
    Emotion::Neutral
}
