// SPDX-License-Identifier: PMPL-1.0-or-later
//! Readability scoring - WCAG 3.1.5 Reading Level (Level AAA)
//!
//! Flesch reading ease decides the reported reading level and whether text
//! meets AAA (score >= 60, roughly lower secondary education). The
//! Flesch-Kincaid grade is used by the page audit.

use crate::text::simplify::SIMPLER_WORDS;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Reading ease at or above which text meets WCAG 3.1.5
pub const AAA_READING_EASE: f64 = 60.0;

/// Sentence length above which text reads as dense
const LONG_SENTENCE_WORDS: f64 = 15.0;
const LONG_WORD_CHARS: f64 = 5.0;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid regex"));
static SILENT_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^l]e|ed|es)$").expect("valid regex"));
static VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));
static PASSIVE_VOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(is|are|was|were|be|been|being)\s+\w+ed\b").expect("valid regex")
});
static COMPLEX_WORDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SIMPLER_WORDS
        .iter()
        .map(|(word, _)| (*word, Regex::new(&format!(r"(?i)\b{}\b", word)).expect("valid regex")))
        .collect()
});

/// School grade band derived from reading ease
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadingLevel {
    Grade5,
    Grade6,
    Grade7,
    Grade8To9,
    Grade10To12,
    College,
    Graduate,
}

impl ReadingLevel {
    pub fn from_reading_ease(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ReadingLevel::Grade5,
            s if s >= 80.0 => ReadingLevel::Grade6,
            s if s >= 70.0 => ReadingLevel::Grade7,
            s if s >= 60.0 => ReadingLevel::Grade8To9,
            s if s >= 50.0 => ReadingLevel::Grade10To12,
            s if s >= 30.0 => ReadingLevel::College,
            _ => ReadingLevel::Graduate,
        }
    }

    pub fn of(text: &str) -> Self {
        Self::from_reading_ease(flesch_reading_ease(text))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Grade5 => "grade5",
            ReadingLevel::Grade6 => "grade6",
            ReadingLevel::Grade7 => "grade7",
            ReadingLevel::Grade8To9 => "grade8-9",
            ReadingLevel::Grade10To12 => "grade10-12",
            ReadingLevel::College => "college",
            ReadingLevel::Graduate => "graduate",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grade5" => Ok(ReadingLevel::Grade5),
            "grade6" => Ok(ReadingLevel::Grade6),
            "grade7" => Ok(ReadingLevel::Grade7),
            "grade8-9" => Ok(ReadingLevel::Grade8To9),
            "grade10-12" => Ok(ReadingLevel::Grade10To12),
            "college" => Ok(ReadingLevel::College),
            "graduate" => Ok(ReadingLevel::Graduate),
            other => Err(format!("Unknown reading level: {}", other)),
        }
    }
}

impl Serialize for ReadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sentences ending in `.`, `!` or `?`; unpunctuated text counts as one
pub fn sentence_count(text: &str) -> usize {
    SENTENCE.find_iter(text).count().max(1)
}

fn words(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// English syllable estimate: vowel groups after dropping a silent ending
pub fn count_syllables(word: &str) -> usize {
    let word: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if word.len() <= 3 {
        return 1;
    }

    let stripped = SILENT_ENDING.replace(&word, "");
    VOWEL_GROUP.find_iter(&stripped).count().max(1)
}

struct TextCounts {
    sentences: usize,
    words: usize,
    syllables: usize,
    characters: usize,
}

impl TextCounts {
    fn of(text: &str) -> Self {
        let words = words(text);
        Self {
            sentences: sentence_count(text),
            words: words.len(),
            syllables: words.iter().map(|w| count_syllables(w)).sum(),
            characters: words.iter().map(|w| w.len()).sum(),
        }
    }
}

/// Flesch reading ease, clamped to 0..=100; 0 when there are no words
pub fn flesch_reading_ease(text: &str) -> f64 {
    let counts = TextCounts::of(text);
    if counts.words == 0 {
        return 0.0;
    }
    let words = counts.words as f64;
    let score = 206.835
        - 1.015 * (words / counts.sentences as f64)
        - 84.6 * (counts.syllables as f64 / words);
    score.clamp(0.0, 100.0)
}

/// Flesch-Kincaid grade level
///
/// Formula: 0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let counts = TextCounts::of(text);
    let words = counts.words.max(1) as f64;
    0.39 * (words / counts.sentences as f64) + 11.8 * (counts.syllables.max(1) as f64 / words) - 15.59
}

pub fn average_sentence_length(text: &str) -> f64 {
    let counts = TextCounts::of(text);
    counts.words as f64 / counts.sentences as f64
}

pub fn average_word_length(text: &str) -> f64 {
    let counts = TextCounts::of(text);
    if counts.words == 0 {
        return 0.0;
    }
    counts.characters as f64 / counts.words as f64
}

/// Concrete advice for text that fails the AAA reading level
pub fn recommendations(text: &str) -> Vec<String> {
    let mut advice = Vec::new();

    if average_sentence_length(text) > LONG_SENTENCE_WORDS {
        advice.push("Use shorter sentences (aim for 15 words or fewer per sentence)".to_string());
    }
    if average_word_length(text) > LONG_WORD_CHARS {
        advice.push("Use shorter, simpler words where possible".to_string());
    }
    if PASSIVE_VOICE.is_match(text) {
        advice.push("Reduce use of passive voice; use active voice instead".to_string());
    }

    let complex: Vec<&str> = COMPLEX_WORDS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(word, _)| *word)
        .collect();
    if !complex.is_empty() {
        advice.push(format!("Replace complex words like: {}", complex.join(", ")));
    }

    advice.push("Use bullet points for lists".to_string());
    advice.push("Add headings and subheadings to break up text".to_string());
    advice
}

/// Full readability breakdown for one text
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityReport {
    /// First 100 characters
    pub text: String,
    pub reading_level: ReadingLevel,
    pub flesch_kincaid_score: f64,
    pub average_sentence_length: f64,
    pub average_word_length: f64,
    #[serde(rename = "meetsWcagAAA")]
    pub meets_wcag_aaa: bool,
    pub recommendations: Vec<String>,
}

impl ReadabilityReport {
    pub fn analyze(text: &str) -> Self {
        let score = flesch_reading_ease(text);
        let meets_wcag_aaa = score >= AAA_READING_EASE;

        Self {
            text: super::preview(text),
            reading_level: ReadingLevel::from_reading_ease(score),
            flesch_kincaid_score: score,
            average_sentence_length: average_sentence_length(text),
            average_word_length: average_word_length(text),
            meets_wcag_aaa,
            recommendations: if meets_wcag_aaa { Vec::new() } else { recommendations(text) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENSE: &str = "The implementation of the aforementioned functionality was demonstrated \
        subsequently to be insufficiently comprehensive, necessitating additional modifications \
        to the organizational infrastructure and considerable reconsideration of requirements.";

    #[test]
    fn test_syllable_count() {
        assert_eq!(count_syllables("hello"), 2);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("a"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("jumped"), 1);
        assert_eq!(count_syllables("2024"), 1);
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("no punctuation here"), 1);
        assert_eq!(sentence_count("Wait... what?!"), 2);
    }

    #[test]
    fn test_simple_text_reads_easily() {
        let simple = "The cat sat on the mat. The dog ran fast. I am happy.";
        let score = flesch_reading_ease(simple);
        assert!(score >= 90.0, "got {:.1}", score);
        assert_eq!(ReadingLevel::of(simple), ReadingLevel::Grade5);
        assert!(flesch_kincaid_grade(simple) < 6.0);
    }

    #[test]
    fn test_dense_text() {
        let report = ReadabilityReport::analyze(DENSE);
        assert!(!report.meets_wcag_aaa);
        assert!(report.flesch_kincaid_score < 30.0);
        assert_eq!(report.reading_level, ReadingLevel::Graduate);
        assert!(report.text.ends_with("..."));
        assert_eq!(report.text.chars().count(), 103);

        let recs = &report.recommendations;
        assert!(recs.contains(&"Use shorter sentences (aim for 15 words or fewer per sentence)".to_string()));
        assert!(recs.contains(&"Use shorter, simpler words where possible".to_string()));
        assert!(recs.contains(&"Reduce use of passive voice; use active voice instead".to_string()));
        assert!(recs.contains(&"Replace complex words like: implementation, functionality, subsequently, additional, requirements".to_string()));
        assert_eq!(recs.last().map(String::as_str), Some("Add headings and subheadings to break up text"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(flesch_reading_ease(""), 0.0);
        assert_eq!(average_word_length(""), 0.0);
        assert_eq!(ReadingLevel::of(""), ReadingLevel::Graduate);
    }

    #[test]
    fn test_reading_level_bands() {
        assert_eq!(ReadingLevel::from_reading_ease(85.0), ReadingLevel::Grade6);
        assert_eq!(ReadingLevel::from_reading_ease(60.0), ReadingLevel::Grade8To9);
        assert_eq!(ReadingLevel::from_reading_ease(30.0), ReadingLevel::College);
        assert_eq!("grade10-12".parse::<ReadingLevel>(), Ok(ReadingLevel::Grade10To12));
        assert_eq!(serde_json::to_value(ReadingLevel::Grade8To9).expect("serialize"), "grade8-9");
    }

    #[test]
    fn test_report_serializes_aaa_flag() {
        let json = serde_json::to_value(ReadabilityReport::analyze("I like it. You do too.")).expect("serialize");
        assert_eq!(json["meetsWcagAAA"], true);
        assert_eq!(json["recommendations"].as_array().map(Vec::len), Some(0));
    }
}
