//! Splits a transcript into styled word runs.
//!
//! Each word renders as up to three runs: an unemphasized prefix, the
//! matched trigger substring, and an unemphasized suffix. Offsets come from
//! the matcher but slicing happens on the original word, so casing and
//! punctuation survive even though matching ignored them.

use crate::trigger::matcher::TriggerMatcher;

/// Render style of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    /// Matched trigger substring, rendered in the accent style.
    Emphasized,
}

/// A contiguous piece of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
}

impl StyledRun {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Normal,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Emphasized,
        }
    }
}

/// Builds the runs for one displayed word.
///
/// Empty runs are dropped, so a word is 1-3 runs; an unmatched word is a
/// single normal run.
pub fn highlight_word(word: &str, matcher: &TriggerMatcher) -> Vec<StyledRun> {
    let Some(span) = matcher.find_in_word(word) else {
        return vec![StyledRun::normal(word)];
    };

    let mut runs = Vec::with_capacity(3);
    if span.start > 0 {
        runs.push(StyledRun::normal(&word[..span.start]));
    }
    runs.push(StyledRun::emphasized(&word[span.start..span.end]));
    if span.end < word.len() {
        runs.push(StyledRun::normal(&word[span.end..]));
    }
    runs
}

/// Builds the styled words for a whole transcript.
///
/// The transcript splits on single spaces; empty words from repeated spaces
/// are skipped rather than kept as zero-width placeholders.
pub fn highlight_transcript(text: &str, matcher: &TriggerMatcher) -> Vec<Vec<StyledRun>> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| highlight_word(word, matcher))
        .collect()
}
