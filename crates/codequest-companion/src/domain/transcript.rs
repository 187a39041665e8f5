//! Review transcripts: AI text split into speakable utterances.

use crate::domain::emotion::{Emotion, classify_emotion};

/// One timed message from the companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// `true` for a code snippet, shown verbatim.
    pub is_code: bool,
    pub emotion: Emotion,
}

impl Utterance {
    /// Prose utterance tagged by [`classify_emotion`].
    #[must_use]
    pub fn spoken(text: impl Into<String>) -> Self {
        let text = text.into();
        let emotion = classify_emotion(&text);
        Self {
            text,
            is_code: false,
            emotion,
        }
    }

    /// Code snippet utterance tagged by [`classify_emotion`].
    #[must_use]
    pub fn code(text: impl Into<String>) -> Self {
        let text = text.into();
        let emotion = classify_emotion(&text);
        Self {
            text,
            is_code: true,
            emotion,
        }
    }

    /// Utterance with an explicit emotion, bypassing classification.
    #[must_use]
    pub fn with_emotion(text: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            text: text.into(),
            is_code: false,
            emotion,
        }
    }
}

const CANNED_CRITIQUE: [&str; 8] = [
    "Let me take a look at your code.",
    "Hmm, it looks like some of the test cases did not pass.",
    "Don't worry, every great programmer gets stuck sometimes.",
    "Start by checking how your code handles edge cases like empty input.",
    "Your approach may work, but think about its time complexity.",
    "Try tracing the first example by hand, one step at a time.",
    "Keep an eye out for off-by-one mistakes in your loops.",
    "You're close, keep going!",
];

/// Fixed eight-line critique used when no AI review is available.
#[must_use]
pub fn canned_critique() -> Vec<Utterance> {
    CANNED_CRITIQUE.iter().map(|line| Utterance::spoken(*line)).collect()
}

fn sentences(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if matches!(c, '.' | '!' | '?') && at_boundary {
            let end = index + c.len_utf8();
            out.push(line[start..end].trim());
            start = end;
        }
    }
    out.push(line[start..].trim());
    out.retain(|s| !s.is_empty());
    out
}

/// Splits AI review text into utterances.
///
/// Fenced code blocks become single code utterances; prose becomes one
/// utterance per sentence. An unterminated fence runs to the end of the
/// text.
#[must_use]
pub fn build_transcript(text: &str) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut code: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            match code.take() {
                None => code = Some(Vec::new()),
                Some(block) if !block.is_empty() => {
                    utterances.push(Utterance::code(block.join("\n")));
                }
                Some(_) => {}
            }
        } else if let Some(block) = code.as_mut() {
            block.push(line);
        } else {
            utterances.extend(sentences(line).into_iter().map(Utterance::spoken));
        }
    }
    if let Some(block) = code.filter(|b| !b.is_empty()) {
        utterances.push(Utterance::code(block.join("\n")));
    }
    utterances
}
