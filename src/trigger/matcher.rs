//! Substring trigger matching over transcripts and single words.
//!
//! Matching is deliberately substring-based and locale-naive: the vocabulary
//! is a small, hand-curated list of homophones covering the recognizer's
//! known error modes, not general NLP. Whole-transcript matching runs on
//! whitespace-stripped text so a trigger still fires when the recognizer
//! splits it across two words.

use crate::defaults;
use crate::trigger::dictionary::TriggerDictionary;
use std::sync::Arc;

/// Where a trigger variant was found inside a displayed word.
///
/// `start` and `end` are byte offsets into the original word, valid for
/// slicing; `0 <= start <= end <= word.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    /// The lowercased variant string that matched.
    pub variant: String,
}

/// Lowercases the transcript and strips all whitespace.
///
/// Punctuation is kept; only whitespace goes, so a trigger spanning a word
/// boundary ("cri peur" → "cripeur") still matches as a substring.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercases one word and strips the matching punctuation set.
fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| !defaults::WORD_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tests transcripts and words against a trigger dictionary.
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
    dict: Arc<TriggerDictionary>,
}

impl TriggerMatcher {
    /// Creates a matcher over a shared dictionary.
    pub fn new(dict: Arc<TriggerDictionary>) -> Self {
        Self { dict }
    }

    /// The dictionary this matcher scans.
    pub fn dictionary(&self) -> &TriggerDictionary {
        &self.dict
    }

    /// Returns true iff the whitespace-stripped, lowercased transcript
    /// contains any configured variant or item name as a substring.
    pub fn has_trigger(&self, text: &str) -> bool {
        let normalized = normalize(text);
        self.dict
            .trigger_strings()
            .any(|variant| !variant.is_empty() && normalized.contains(variant))
    }

    /// Finds the first trigger variant inside one displayed word.
    ///
    /// The word is cleaned (lowercased, `,.!?` stripped) for comparison
    /// only; the returned span indexes the original word so the caller can
    /// slice it with casing and punctuation intact. Only the first hit is
    /// reported; variants are scanned in group-declaration order, then item
    /// names.
    pub fn find_in_word(&self, word: &str) -> Option<MatchSpan> {
        let cleaned = clean_word(word);
        let variant = self
            .dict
            .trigger_strings()
            .find(|v| !v.is_empty() && cleaned.contains(*v))?;

        locate_in_original(word, variant)
    }
}

/// Maps a variant hit back to byte offsets in the original word.
///
/// The variant was found in the cleaned word; to slice the original we
/// search the lowercased original instead. A word with punctuation inside
/// the matched region ("cree,per") has no contiguous span to highlight, so
/// this returns None and the word is rendered unemphasized.
fn locate_in_original(word: &str, variant: &str) -> Option<MatchSpan> {
    let lower = word.to_lowercase();
    // Offsets in the lowercased word are only transferable when lowercasing
    // did not change the byte length.
    if lower.len() != word.len() {
        return None;
    }
    let start = lower.find(variant)?;
    Some(MatchSpan {
        start,
        end: start + variant.len(),
        variant: variant.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::dictionary::TriggerGroup;

    fn matcher_with(variants: &[&str]) -> TriggerMatcher {
        let dict = TriggerDictionary::new(
            vec![TriggerGroup {
                name: "test".to_string(),
                variants: variants.iter().map(|v| v.to_string()).collect(),
            }],
            vec![],
        );
        TriggerMatcher::new(Arc::new(dict))
    }

    #[test]
    fn test_normalize_strips_whitespace_not_punctuation() {
        assert_eq!(normalize("Un Creeper, là !"), "uncreeper,là!");
        assert_eq!(normalize("  a\tb\nc "), "abc");
    }

    #[test]
    fn test_has_trigger_simple() {
        let matcher = matcher_with(&["creeper"]);
        assert!(matcher.has_trigger("un creeper arrive"));
        assert!(!matcher.has_trigger("rien à voir"));
    }

    #[test]
    fn test_has_trigger_case_insensitive() {
        let matcher = matcher_with(&["creeper"]);
        assert!(matcher.has_trigger("Attention CREEPER"));
    }

    #[test]
    fn test_has_trigger_across_word_boundary() {
        // Normalization strips spaces before matching, so a variant split
        // across two recognized words still fires.
        let matcher = matcher_with(&["cripeur"]);
        assert!(matcher.has_trigger("un cri peur dans la nuit"));
    }

    #[test]
    fn test_has_trigger_via_item_name() {
        let dict = TriggerDictionary::new(
            vec![],
            vec![("Bateau".to_string(), "minecraft:boat".to_string())],
        );
        let matcher = TriggerMatcher::new(Arc::new(dict));
        assert!(matcher.has_trigger("un bateau au loin"));
    }

    #[test]
    fn test_empty_dictionary_never_matches() {
        let matcher = matcher_with(&[]);
        assert!(!matcher.has_trigger("creeper"));
        assert_eq!(matcher.find_in_word("creeper"), None);
    }

    #[test]
    fn test_find_in_word_preserves_case_and_punctuation() {
        let matcher = matcher_with(&["creeper"]);
        let span = matcher.find_in_word("Creeper!").unwrap();

        assert_eq!(span.start, 0);
        assert_eq!(span.end, 7);
        assert_eq!(&"Creeper!"[span.start..span.end], "Creeper");
        assert_eq!(&"Creeper!"[span.end..], "!");
        assert_eq!(span.variant, "creeper");
    }

    #[test]
    fn test_find_in_word_with_leading_punctuation() {
        let matcher = matcher_with(&["creeper"]);
        let span = matcher.find_in_word("!Creeper").unwrap();

        assert_eq!(&"!Creeper"[span.start..span.end], "Creeper");
        assert_eq!(span.start, 1);
    }

    #[test]
    fn test_find_in_word_substring_match() {
        let matcher = matcher_with(&["or"]);
        let span = matcher.find_in_word("alors").unwrap();
        assert_eq!(&"alors"[span.start..span.end], "or");
    }

    #[test]
    fn test_find_in_word_accented_variant() {
        let matcher = matcher_with(&["éclair"]);
        let span = matcher.find_in_word("Éclair!").unwrap();
        assert_eq!(&"Éclair!"[span.start..span.end], "Éclair");
    }

    #[test]
    fn test_find_in_word_first_hit_wins() {
        let dict = TriggerDictionary::new(
            vec![
                TriggerGroup {
                    name: "a".to_string(),
                    variants: vec!["lapin".to_string()],
                },
                TriggerGroup {
                    name: "b".to_string(),
                    variants: vec!["pin".to_string()],
                },
            ],
            vec![],
        );
        let matcher = TriggerMatcher::new(Arc::new(dict));

        let span = matcher.find_in_word("lapin").unwrap();
        assert_eq!(span.variant, "lapin");
    }

    #[test]
    fn test_find_in_word_interior_punctuation_yields_no_span() {
        // "cree,per" cleans to "creeper" and matches, but there is no
        // contiguous region of the original to highlight.
        let matcher = matcher_with(&["creeper"]);
        assert_eq!(matcher.find_in_word("cree,per"), None);
    }

    #[test]
    fn test_find_in_word_no_match() {
        let matcher = matcher_with(&["creeper"]);
        assert_eq!(matcher.find_in_word("zombie"), None);
    }

    #[test]
    fn test_span_invariant_holds() {
        let matcher = matcher_with(&["trou"]);
        let word = "Trous,";
        if let Some(span) = matcher.find_in_word(word) {
            assert!(span.start <= span.end);
            assert!(span.end <= word.len());
        } else {
            panic!("expected a match");
        }
    }
}
