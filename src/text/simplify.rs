// SPDX-License-Identifier: PMPL-1.0-or-later
//! Offline text simplification: plain-word substitution plus splitting long
//! sentences at a coordinating conjunction.

use crate::text::readability::ReadingLevel;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Complex words and their plain replacements
pub(crate) const SIMPLER_WORDS: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("implementation", "use"),
    ("functionality", "features"),
    ("subsequently", "later"),
    ("demonstrate", "show"),
    ("sufficient", "enough"),
    ("additional", "more"),
    ("approximately", "about"),
    ("requirements", "needs"),
    ("modification", "change"),
    ("assistance", "help"),
    ("initiate", "start"),
    ("terminate", "end"),
    ("comprehend", "understand"),
    ("endeavor", "try"),
];

/// Split points tried in order; the first present one becomes a full stop
const CONJUNCTIONS: &[&str] = &[", and ", ", but ", ", or ", ", so ", ", yet ", ", for ", ", nor "];

const MAX_SENTENCE_WORDS: usize = 15;

/// Reading level requested when the caller names none
pub const DEFAULT_TARGET_LEVEL: &str = "grade6";

static REPLACEMENTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SIMPLER_WORDS
        .iter()
        .map(|(word, plain)| (Regex::new(&format!(r"(?i)\b{}\b", word)).expect("valid regex"), *plain))
        .collect()
});
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));

/// Swap complex words for plain ones, then break up long sentences
pub fn simplify_locally(text: &str) -> String {
    let plain = REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (pattern, plain)| pattern.replace_all(&acc, *plain).into_owned());
    break_long_sentences(&plain)
}

/// Sentences over 15 words are split once, at the first conjunction in
/// [`CONJUNCTIONS`] order. Trailing text without end punctuation is kept.
///
/// Words are counted by splitting the sentence as matched on single spaces,
/// so the space after the previous terminator counts as one more word.
/// Sentences are trimmed only for output.
pub fn break_long_sentences(text: &str) -> String {
    let mut sentences: Vec<&str> = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE.find_iter(text) {
        sentences.push(m.as_str());
        consumed = m.end();
    }
    let tail = &text[consumed..];
    if !tail.trim().is_empty() {
        sentences.push(tail);
    }

    sentences
        .iter()
        .map(|sentence| split_sentence(sentence))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_sentence(matched: &str) -> String {
    let sentence = matched.trim();
    if matched.split(' ').count() <= MAX_SENTENCE_WORDS {
        return sentence.to_string();
    }
    CONJUNCTIONS
        .iter()
        .find(|conjunction| sentence.contains(*conjunction))
        .map_or_else(|| sentence.to_string(), |conjunction| sentence.replacen(conjunction, ". ", 1))
}

/// Text tagged with its measured reading level
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeveledText {
    pub text: String,
    pub reading_level: ReadingLevel,
}

impl LeveledText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let reading_level = ReadingLevel::of(&text);
        Self { text, reading_level }
    }
}

/// Original and simplified text side by side
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simplification {
    pub original: LeveledText,
    pub simplified: LeveledText,
    pub target_reading_level: String,
}

impl Simplification {
    pub fn new(original: &str, simplified: impl Into<String>, target: &str) -> Self {
        Self {
            original: LeveledText::new(original),
            simplified: LeveledText::new(simplified),
            target_reading_level: target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_substitution_keeps_boundaries() {
        assert_eq!(
            simplify_locally("Please UTILIZE this. Additional help is sufficient."),
            "Please use this. more help is enough."
        );
        assert_eq!(simplify_locally("The utilizer stays."), "The utilizer stays.");
    }

    #[test]
    fn test_long_sentence_is_split_once() {
        let long = "We tested every page on the site with three screen readers, and we found \
            many problems, but most were easy to fix.";
        assert_eq!(
            break_long_sentences(long),
            "We tested every page on the site with three screen readers. we found \
            many problems, but most were easy to fix."
        );
    }

    #[test]
    fn test_short_sentences_untouched() {
        assert_eq!(break_long_sentences("Short one, and fine. Another."), "Short one, and fine. Another.");
    }

    #[test]
    fn test_space_after_terminator_counts_as_a_word() {
        let fifteen = "One two three four five six seven eight nine ten eleven, and thirteen fourteen fifteen.";
        assert_eq!(break_long_sentences(fifteen), fifteen);
        assert_eq!(
            break_long_sentences(&format!("Hi. {fifteen}")),
            "Hi. One two three four five six seven eight nine ten eleven. thirteen fourteen fifteen."
        );
    }

    #[test]
    fn test_trailing_fragment_kept() {
        assert_eq!(break_long_sentences("Done. and then"), "Done. and then");
        assert_eq!(break_long_sentences("no punctuation at all"), "no punctuation at all");
    }

    #[test]
    fn test_simplification_levels() {
        let result = Simplification::new(
            "The implementation demonstrates sufficient functionality.",
            "It works.",
            DEFAULT_TARGET_LEVEL,
        );
        assert_eq!(result.simplified.reading_level, ReadingLevel::Grade5);
        assert!(result.original.reading_level > result.simplified.reading_level);
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["targetReadingLevel"], "grade6");
        assert_eq!(json["simplified"]["readingLevel"], "grade5");
    }
}
