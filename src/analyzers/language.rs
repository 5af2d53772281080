// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language and text analyzer - WCAG 3.1.1 Language of Page (Level A), 3.1.5 Reading Level (Level AAA)
//!
//! Checks language and text accessibility:
//! - HTML has lang attribute
//! - Reading level analysis (Flesch-Kincaid, flagged above grade 12)

use crate::analyzers::{selector, Analyzer, Page};
use crate::findings::{criteria, Finding, ImpactAssessment, Severity};
use crate::text::readability::flesch_kincaid_grade;

/// Language and text analyzer
pub struct LanguageAnalyzer;

/// Body text shorter than this is not scored
const MIN_SCORED_CHARS: usize = 200;
const MAX_GRADE: f64 = 12.0;

impl Analyzer for LanguageAnalyzer {
    fn name(&self) -> &str {
        "Language and Text Analyzer"
    }

    fn description(&self) -> &str {
        "Checks language attributes and reading level (WCAG 3.1.1, 3.1.5)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        check_html_lang(page, &mut findings);
        check_reading_level(page, &mut findings);

        findings
    }
}

/// Check that the <html> element has a lang attribute
fn check_html_lang(page: &Page<'_>, findings: &mut Vec<Finding>) {
    let Some(html_el) = page.document.select(&selector("html")).next() else {
        return;
    };
    let line = page.line_of_nth_tag("html", 0).or(Some(1));

    match html_el.value().attr("lang") {
        None => {
            findings.push(page.locate(
                Finding::new(
                    "WCAG-3.1.1-missing-lang",
                    Severity::Error,
                    "The <html> element is missing a lang attribute. Screen readers need this to determine the correct pronunciation.",
                )
                .with_criterion(criteria::LANGUAGE_OF_PAGE)
                .with_rule_name("Language of Page: Missing Lang Attribute")
                .with_element("html")
                .with_suggestion("Add lang=\"en\" (or appropriate language code) to the <html> element")
                .as_fixable()
                .with_impact(ImpactAssessment::blind()),
                line,
            ));
        }
        Some(lang) if lang.trim().is_empty() => {
            findings.push(page.locate(
                Finding::new(
                    "WCAG-3.1.1-empty-lang",
                    Severity::Error,
                    "The <html> element has an empty lang attribute.",
                )
                .with_criterion(criteria::LANGUAGE_OF_PAGE)
                .with_rule_name("Language of Page: Empty Lang Attribute")
                .with_element("html")
                .with_suggestion("Set lang to a valid BCP 47 language tag, e.g., lang=\"en\"")
                .as_fixable()
                .with_impact(ImpactAssessment::blind()),
                line,
            ));
        }
        Some(_) => {}
    }
}

/// Flag body text above grade 12 on the Flesch-Kincaid scale
fn check_reading_level(page: &Page<'_>, findings: &mut Vec<Finding>) {
    let Some(body) = page.document.select(&selector("body")).next() else {
        return;
    };

    let text = body.text().collect::<Vec<_>>().join(" ");
    let text = text.trim();
    if text.len() < MIN_SCORED_CHARS {
        return;
    }

    let grade_level = flesch_kincaid_grade(text);
    if grade_level > MAX_GRADE {
        findings.push(page.locate(
            Finding::new(
                "WCAG-3.1.5-reading-level",
                Severity::Info,
                &format!(
                    "Text reading level is approximately grade {:.1}. WCAG AAA recommends content be readable at a lower secondary education level (grade 9).",
                    grade_level
                ),
            )
            .with_criterion(criteria::READING_LEVEL)
            .with_rule_name("Reading Level")
            .with_suggestion(
                "Consider simplifying language: use shorter sentences, common words, and active voice",
            )
            .with_impact(ImpactAssessment::cognitive()),
            None,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(html: &str) -> Vec<String> {
        LanguageAnalyzer.analyze(&Page::parse(html)).into_iter().map(|f| f.rule_id).collect()
    }

    #[test]
    fn test_html_with_lang() {
        let html = r#"<html lang="en"><head><title>Test</title></head><body><p>Hello</p></body></html>"#;
        assert!(rules(html).is_empty());
    }

    #[test]
    fn test_html_no_lang() {
        let html = r#"<html><head><title>Test</title></head><body><p>Hello</p></body></html>"#;
        let findings = LanguageAnalyzer.analyze(&Page::parse(html));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "WCAG-3.1.1-missing-lang");
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].line, Some(1));
    }

    #[test]
    fn test_html_empty_lang() {
        let html = r#"<html lang=""><head><title>Test</title></head><body><p>Hello</p></body></html>"#;
        assert_eq!(rules(html), ["WCAG-3.1.1-empty-lang"]);
    }

    #[test]
    fn test_reading_level_not_checked_for_short_content() {
        let html = r#"<html lang="en"><body><p>Short text.</p></body></html>"#;
        assert!(rules(html).is_empty());
    }

    #[test]
    fn test_dense_body_text_flagged() {
        let sentence = "Organizational interoperability necessitates comprehensive institutional \
            documentation demonstrating considerable administrative accountability";
        let html = format!(
            "<html lang=\"en\"><body><p>{}. {}.</p></body></html>",
            sentence, sentence
        );
        let findings = LanguageAnalyzer.analyze(&Page::parse(&html));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "WCAG-3.1.5-reading-level");
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].category, "accessibility/wcag-aaa");
    }
}
