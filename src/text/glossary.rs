// SPDX-License-Identifier: PMPL-1.0-or-later
//! Dictionary lookups for WCAG 3.1.3 Unusual Words, 3.1.4 Abbreviations and
//! 3.1.6 Pronunciation (all Level AAA).
//!
//! Each hit carries the sentence it appears in so authors can find it.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

const UNUSUAL_WORDS: &[(&str, &str)] = &[
    ("paradigm", "A typical example or pattern of something; a model"),
    ("ubiquitous", "Present, appearing, or found everywhere"),
    ("mitigate", "Make less severe, serious, or painful"),
    ("caveat", "A warning or proviso of specific stipulations, conditions, or limitations"),
    ("cognizant", "Having knowledge or awareness"),
    ("esoteric", "Intended for or likely to be understood by only a small number of people with specialized knowledge"),
    ("juxtaposition", "The fact of two things being seen or placed close together with contrasting effect"),
    ("panacea", "A solution or remedy for all difficulties or diseases"),
    ("pragmatic", "Dealing with things sensibly and realistically"),
    ("quintessential", "Representing the most perfect or typical example of a quality or class"),
    ("rhetoric", "The art of effective or persuasive speaking or writing"),
    ("superfluous", "Unnecessary, especially through being more than enough"),
    ("sycophant", "A person who acts obsequiously toward someone important in order to gain advantage"),
    ("verbose", "Using or containing more words than are necessary"),
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("WCAG", "Web Content Accessibility Guidelines"),
    ("HTML", "Hypertext Markup Language"),
    ("CSS", "Cascading Style Sheets"),
    ("JS", "JavaScript"),
    ("API", "Application Programming Interface"),
    ("UI", "User Interface"),
    ("UX", "User Experience"),
    ("a11y", "Accessibility"),
    ("i18n", "Internationalization"),
    ("l10n", "Localization"),
    ("CMS", "Content Management System"),
    ("SEO", "Search Engine Optimization"),
    ("W3C", "World Wide Web Consortium"),
    ("WAI", "Web Accessibility Initiative"),
    ("ARIA", "Accessible Rich Internet Applications"),
    ("ADA", "Americans with Disabilities Act"),
    ("JAWS", "Job Access With Speech"),
    ("NVDA", "NonVisual Desktop Access"),
];

/// Heteronyms: (word, [(pronunciation, meaning, example)])
const HETERONYMS: &[(&str, [(&str, &str, &str); 2])] = &[
    ("read", [
        ("reed", "present tense", "I read [reed] books every day."),
        ("red", "past tense", "I read [red] that book last week."),
    ]),
    ("lead", [
        ("leed", "verb (to guide)", "She will lead [leed] the team to victory."),
        ("led", "noun (metal)", "The pipe is made of lead [led]."),
    ]),
    ("wind", [
        ("wind", "moving air", "The wind [wind] is blowing strongly today."),
        ("wynd", "to turn", "Wind [wynd] the clock before going to bed."),
    ]),
    ("tear", [
        ("teer", "liquid from eye", "A tear [teer] rolled down her cheek."),
        ("tair", "to rip", "Be careful not to tear [tair] the paper."),
    ]),
    ("bow", [
        ("bau", "to bend forward", "The performers bow [bau] to the audience."),
        ("boh", "weapon for arrows", "He used a bow [boh] and arrow for hunting."),
    ]),
    ("live", [
        ("liv", "to be alive", "They live [liv] in a small town."),
        ("lyve", "happening now", "The concert is live [lyve] tonight."),
    ]),
    ("content", [
        ("KON-tent", "noun (material)", "The content [KON-tent] of the book was interesting."),
        ("kun-TENT", "adjective (satisfied)", "She felt content [kun-TENT] with her decision."),
    ]),
];

static CANDIDATE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{5,}\b").expect("valid regex"));
static UPPERCASE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("valid regex"));
static KNOWN_ABBREVIATIONS: LazyLock<Vec<(&'static str, &'static str, Regex)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, expansion)| (*abbr, *expansion, whole_word(abbr, false)))
        .collect()
});
static HETERONYM_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| HETERONYMS.iter().map(|(word, _)| whole_word(word, true)).collect());

fn whole_word(word: &str, case_insensitive: bool) -> Regex {
    let flags = if case_insensitive { "(?i)" } else { "" };
    Regex::new(&format!(r"{}\b{}\b", flags, regex::escape(word))).expect("valid regex")
}

fn sentence_pattern(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)[^.!?]*\b{}\b[^.!?]*[.!?]", regex::escape(word))).expect("valid regex")
}

/// First sentence containing `word`, trimmed
fn context_of(text: &str, word: &str) -> Option<String> {
    sentence_pattern(word).find(text).map(|m| m.as_str().trim().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusualWord {
    pub word: String,
    pub definition: &'static str,
    pub context: Option<String>,
}

/// Uncommon words with definitions, once each, in order of first use
pub fn unusual_words(text: &str) -> Vec<UnusualWord> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for m in CANDIDATE_WORD.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if !seen.insert(word.clone()) {
            continue;
        }
        if let Some((_, definition)) = UNUSUAL_WORDS.iter().find(|(w, _)| *w == word) {
            found.push(UnusualWord {
                context: context_of(text, &word),
                word,
                definition: *definition,
            });
        }
    }

    found
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Abbreviation {
    pub abbreviation: String,
    pub expansion: Option<&'static str>,
    pub context: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub needs_expansion: bool,
}

/// Known abbreviations (case-sensitive) with expansions, then unknown
/// all-caps words flagged for expansion
pub fn abbreviations(text: &str) -> Vec<Abbreviation> {
    let mut found: Vec<Abbreviation> = KNOWN_ABBREVIATIONS
        .iter()
        .filter(|(_, _, pattern)| pattern.is_match(text))
        .map(|(abbr, expansion, _)| Abbreviation {
            abbreviation: abbr.to_string(),
            expansion: Some(*expansion),
            context: context_of(text, abbr),
            needs_expansion: false,
        })
        .collect();

    let mut seen = HashSet::new();
    for m in UPPERCASE_RUN.find_iter(text) {
        let abbr = m.as_str();
        if ABBREVIATIONS.iter().any(|(known, _)| *known == abbr) || !seen.insert(abbr) {
            continue;
        }
        found.push(Abbreviation {
            abbreviation: abbr.to_string(),
            expansion: None,
            context: context_of(text, abbr),
            needs_expansion: true,
        });
    }

    found
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PronunciationVariant {
    pub pronunciation: &'static str,
    pub context: &'static str,
    pub example: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PronunciationGuide {
    pub word: &'static str,
    pub pronunciations: Vec<PronunciationVariant>,
    /// Every sentence the word appears in
    pub contexts: Vec<String>,
}

/// Words whose pronunciation depends on meaning
pub fn pronunciation_guidance(text: &str) -> Vec<PronunciationGuide> {
    HETERONYMS
        .iter()
        .zip(HETERONYM_PATTERNS.iter())
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|((word, variants), _)| PronunciationGuide {
            word: *word,
            pronunciations: variants
                .iter()
                .map(|&(pronunciation, context, example)| PronunciationVariant {
                    pronunciation,
                    context,
                    example,
                })
                .collect(),
            contexts: sentence_pattern(word)
                .find_iter(text)
                .map(|m| m.as_str().trim().to_string())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusual_words() {
        let text = "Our paradigm is pragmatic. The Paradigm shift helps. Nothing else here";
        let found = unusual_words(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].word, "paradigm");
        assert_eq!(found[0].context.as_deref(), Some("Our paradigm is pragmatic."));
        assert_eq!(found[1].word, "pragmatic");
        assert_eq!(found[1].definition, "Dealing with things sensibly and realistically");
    }

    #[test]
    fn test_unusual_word_without_sentence_end() {
        let found = unusual_words("a verbose reply");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].context, None);
    }

    #[test]
    fn test_abbreviations() {
        let text = "Follow WCAG when writing HTML. Test with NVDA and XYZ tools. Ask the PM!";
        let found = abbreviations(text);
        let names: Vec<_> = found.iter().map(|a| a.abbreviation.as_str()).collect();
        assert_eq!(names, ["WCAG", "HTML", "NVDA", "XYZ", "PM"]);
        assert_eq!(found[0].expansion, Some("Web Content Accessibility Guidelines"));
        assert_eq!(found[0].context.as_deref(), Some("Follow WCAG when writing HTML."));
        assert!(found[3].needs_expansion);
        assert_eq!(found[3].expansion, None);
        assert_eq!(found[4].context.as_deref(), Some("Ask the PM!"));
    }

    #[test]
    fn test_abbreviation_serialization() {
        let found = abbreviations("Use CSS and FOO.");
        let json = serde_json::to_value(&found).expect("serialize");
        assert!(json[0].get("needsExpansion").is_none());
        assert_eq!(json[1]["needsExpansion"], true);
        assert!(json[1]["expansion"].is_null());
    }

    #[test]
    fn test_abbreviations_are_case_sensitive() {
        assert!(abbreviations("the api is fine").is_empty());
        let found = abbreviations("Ship a11y fixes.");
        assert_eq!(found[0].expansion, Some("Accessibility"));
    }

    #[test]
    fn test_pronunciation() {
        let text = "I read the report. Then I read it again! The wind was calm.";
        let found = pronunciation_guidance(text);
        let words: Vec<_> = found.iter().map(|g| g.word).collect();
        assert_eq!(words, ["read", "wind"]);
        assert_eq!(found[0].contexts, ["I read the report.", "Then I read it again!"]);
        assert_eq!(found[0].pronunciations[1].pronunciation, "red");
        assert!(pronunciation_guidance("Nothing to see.").is_empty());
    }
}
