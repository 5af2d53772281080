// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text analyzer - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Checks that all `<img>` elements have appropriate alt attributes:
//! - Every `<img>` must have an `alt` attribute (not missing)
//! - Alt text must be descriptive (not generic like "image", "photo")
//! - Decorative images should use `alt=""` (empty, not missing)
//!
//! Also scores free-standing alt text and builds per-image reports with
//! suggested replacements.

use crate::analyzers::{selector, Analyzer, Page};
use crate::fallback::FallbackGenerator;
use crate::findings::{criteria, Finding, ImpactAssessment, Severity};
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;

/// Generic alt text values that indicate lazy/unhelpful descriptions
const GENERIC_ALT_VALUES: &[&str] = &[
    "image",
    "photo",
    "picture",
    "icon",
    "graphic",
    "img",
    "banner",
    "logo",
    "untitled",
    "screenshot",
    "thumbnail",
    "placeholder",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".png", ".gif", ".webp"];
const REDUNDANT_PHRASES: &[&str] = &["image of", "picture of", "photo of"];
const DECORATIVE_CLASS_HINTS: &[&str] =
    &["decoration", "icon", "separator", "divider", "bullet", "bg", "background"];
const DECORATIVE_SRC_HINTS: &[&str] = &["separator", "divider", "spacer", "blank", "icon", "bullet"];

/// Longest alt text that stays comfortable for screen reader users
const MAX_ALT_LENGTH: usize = 125;
const MIN_ALT_LENGTH: usize = 5;

static REDUNDANT_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["image of ", "picture of ", "photo of "]
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).expect("valid regex"))
        .collect()
});
static EXTENSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| Regex::new(&format!("(?i){}", regex::escape(ext))).expect("valid regex"))
        .collect()
});

/// Analyzer for image alt text compliance
pub struct AltTextAnalyzer;

impl Analyzer for AltTextAnalyzer {
    fn name(&self) -> &str {
        "Alt Text Analyzer"
    }

    fn description(&self) -> &str {
        "Checks <img> elements for proper alt text (WCAG 1.1.1)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        let img_selector = selector("img");
        let mut findings = Vec::new();

        for (idx, element) in page.document.select(&img_selector).enumerate() {
            let line = page.line_of_nth_tag("img", idx);
            let element_html = element.html();
            let id = |kind: &str| format!("alt-{}-{}", kind, idx + 1);

            match element.value().attr("alt") {
                None => {
                    let decorative = is_decorative_image(element);
                    let suggestion = if decorative {
                        "This image looks decorative: add alt=\"\" so screen readers skip it".to_string()
                    } else {
                        "Add alt=\"description\" for informative images or alt=\"\" for decorative images"
                            .to_string()
                    };
                    findings.push(page.locate(
                        Finding::new(
                            "WCAG-1.1.1-missing-alt",
                            Severity::Error,
                            "Image is missing alt attribute. Every <img> must have an alt attribute.",
                        )
                        .with_id(id("missing"))
                        .with_criterion(criteria::NON_TEXT_CONTENT)
                        .with_rule_name("Non-text Content: Missing Alt")
                        .with_element("img")
                        .with_code(element_html.clone())
                        .with_suggestion(suggestion)
                        .as_fixable()
                        .with_impact(ImpactAssessment::blind()),
                        line,
                    ));
                }
                Some(alt) if !alt.trim().is_empty() => {
                    let alt_lower = alt.to_lowercase();
                    let alt_trimmed = alt_lower.trim();

                    if GENERIC_ALT_VALUES.contains(&alt_trimmed) {
                        findings.push(page.locate(
                            Finding::new(
                                "WCAG-1.1.1-generic-alt",
                                Severity::Warning,
                                &format!(
                                    "Image has generic alt text \"{}\". Alt text should be descriptive.",
                                    alt
                                ),
                            )
                            .with_id(id("generic"))
                            .with_criterion(criteria::NON_TEXT_CONTENT)
                            .with_rule_name("Non-text Content: Generic Alt Text")
                            .with_element("img")
                            .with_code(element_html.clone())
                            .with_suggestion("Replace with a meaningful description of the image content")
                            .with_impact(ImpactAssessment::blind()),
                            line,
                        ));
                    }

                    if looks_like_file_name(alt_trimmed) {
                        findings.push(page.locate(
                            Finding::new(
                                "WCAG-1.1.1-filename-alt",
                                Severity::Warning,
                                &format!(
                                    "Image alt text appears to be a filename: \"{}\". Use a descriptive alternative.",
                                    alt
                                ),
                            )
                            .with_id(id("filename"))
                            .with_criterion(criteria::NON_TEXT_CONTENT)
                            .with_rule_name("Non-text Content: Filename as Alt Text")
                            .with_element("img")
                            .with_code(element_html.clone())
                            .with_suggestion(
                                "Replace the filename with a meaningful description of what the image shows",
                            )
                            .with_impact(ImpactAssessment::blind()),
                            line,
                        ));
                    }

                    if is_decorative_image(element) {
                        findings.push(page.locate(
                            Finding::new(
                                "WCAG-1.1.1-decorative-alt",
                                Severity::Suggestion,
                                "Image looks decorative but has alt text; screen readers will announce it.",
                            )
                            .with_id(id("decorative"))
                            .with_criterion(criteria::NON_TEXT_CONTENT)
                            .with_rule_name("Non-text Content: Decorative Image With Alt Text")
                            .with_element("img")
                            .with_code(element_html.clone())
                            .with_suggestion("Use alt=\"\" if the image conveys no information")
                            .with_impact(ImpactAssessment::blind()),
                            line,
                        ));
                    }
                }
                Some(_) => {
                    // alt="" is valid for decorative images
                }
            }
        }

        findings
    }
}

fn looks_like_file_name(alt: &str) -> bool {
    alt.ends_with(".svg") || IMAGE_EXTENSIONS.iter().any(|ext| alt.ends_with(ext)) || alt.ends_with(".jpeg")
}

/// Heuristics for images that carry no information: tiny dimensions,
/// decorative class names or sources, or explicit presentation markup
pub fn is_decorative_image(img: ElementRef<'_>) -> bool {
    let el = img.value();

    let small = |attr: &str| {
        let size = leading_int(el.attr(attr).unwrap_or("0"));
        size > 0 && size < 50
    };
    if small("width") || small("height") {
        return true;
    }

    let class = el.attr("class").unwrap_or("");
    if DECORATIVE_CLASS_HINTS.iter().any(|hint| class.contains(hint)) {
        return true;
    }

    if matches!(el.attr("role"), Some("presentation" | "none")) {
        return true;
    }

    if el.attr("aria-hidden") == Some("true") {
        return true;
    }

    let src = el.attr("src").unwrap_or("");
    DECORATIVE_SRC_HINTS.iter().any(|hint| src.contains(hint))
}

/// Integer prefix of an attribute value ("40px" → 40), 0 when absent
fn leading_int(value: &str) -> u32 {
    let digits: String = value.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// One `<img>` and what should be done with its alt text
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub image_id: usize,
    pub src: String,
    pub current_alt: String,
    pub has_alt: bool,
    pub is_empty: bool,
    pub is_likely_decorative: bool,
    pub suggested_alt: Option<String>,
    pub needs_attention: bool,
}

/// Images in a document that need alt text work
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub total_images: usize,
    pub issues_found: usize,
    pub images: Vec<ImageReport>,
}

/// Report every image needing attention, with suggested alt text
pub fn analyze_images(page: &Page<'_>, generator: &FallbackGenerator) -> ImageAnalysis {
    let img_selector = selector("img");
    let mut total_images = 0;
    let mut images = Vec::new();

    for (idx, img) in page.document.select(&img_selector).enumerate() {
        total_images += 1;
        let src = img.value().attr("src").unwrap_or("").to_string();
        let alt = img.value().attr("alt");
        let has_alt = alt.is_some();
        let is_empty = alt.is_some_and(|a| a.trim().is_empty());
        let decorative = is_decorative_image(img);

        let suggested_alt = match alt {
            None => Some(generator.alt_text(file_name_of(&src))),
            Some(a) if !a.is_empty() && a.trim().chars().count() < MIN_ALT_LENGTH && !decorative => {
                Some(generator.alt_text(file_name_of(&src)))
            }
            Some(_) if decorative && !is_empty => Some(String::new()),
            Some(_) => None,
        };

        let needs_attention = !has_alt || (decorative && !is_empty) || (!decorative && is_empty);
        if needs_attention {
            images.push(ImageReport {
                image_id: idx + 1,
                src,
                current_alt: alt.unwrap_or("").to_string(),
                has_alt,
                is_empty,
                is_likely_decorative: decorative,
                suggested_alt,
                needs_attention,
            });
        }
    }

    tracing::debug!(total_images, needing_attention = images.len(), "image analysis complete");
    ImageAnalysis { total_images, issues_found: images.len(), images }
}

fn file_name_of(src: &str) -> &str {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Overall grade for a piece of alt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AltQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Problems detected in alt text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltTextProblem {
    Empty,
    TooShort,
    TooLong,
    RedundantPhrase,
    FileExtension,
    OffContext,
}

impl AltTextProblem {
    pub fn penalty(&self) -> i32 {
        match self {
            AltTextProblem::Empty => 50,
            AltTextProblem::TooShort => 30,
            AltTextProblem::TooLong => 20,
            AltTextProblem::RedundantPhrase => 50,
            AltTextProblem::FileExtension => 40,
            AltTextProblem::OffContext => 15,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AltTextProblem::Empty => "Alt text is empty",
            AltTextProblem::TooShort => "Alt text is too short",
            AltTextProblem::TooLong => "Alt text is too long (should be under 125 characters)",
            AltTextProblem::RedundantPhrase => {
                "Alt text contains redundant phrases like \"image of\" or \"picture of\""
            }
            AltTextProblem::FileExtension => "Alt text contains file extensions",
            AltTextProblem::OffContext => "Alt text may not be relevant to the surrounding content",
        }
    }

    fn suggestions(&self, alt: &str) -> Vec<String> {
        match self {
            AltTextProblem::Empty => {
                vec!["Add descriptive alt text that conveys the purpose and content of the image".into()]
            }
            AltTextProblem::TooShort => {
                vec!["Expand the alt text to better describe the image content".into()]
            }
            AltTextProblem::TooLong => vec![
                "Shorten the alt text to be more concise while keeping essential information".into(),
            ],
            AltTextProblem::RedundantPhrase => vec![
                "Remove phrases like \"image of\" or \"picture of\" as screen readers already announce the element as an image".into(),
                format!("Consider: \"{}\"", strip_first(alt, &REDUNDANT_PREFIXES)),
            ],
            AltTextProblem::FileExtension => vec![
                "Remove file extensions from the alt text".into(),
                format!("Consider: \"{}\"", strip_first(alt, &EXTENSION_PATTERNS)),
            ],
            AltTextProblem::OffContext => {
                vec!["Make sure the alt text relates to the context in which the image appears".into()]
            }
        }
    }
}

/// Remove the first match of each pattern in turn
fn strip_first(text: &str, patterns: &[Regex]) -> String {
    patterns
        .iter()
        .fold(text.to_string(), |acc, re| re.replacen(&acc, 1, "").into_owned())
}

/// Score, grade and advice for one alt text
#[derive(Debug, Clone, Serialize)]
pub struct AltTextAssessment {
    pub score: i32,
    pub quality: AltQuality,
    pub issues: Vec<&'static str>,
    pub suggestions: Vec<String>,
}

/// Score alt text out of 100, optionally against the text around the image
pub fn assess_alt_text(alt: &str, context: Option<&str>) -> AltTextAssessment {
    let problems = alt_text_problems(alt, context);
    let score = 100 - problems.iter().map(AltTextProblem::penalty).sum::<i32>();

    let trimmed_len = alt.trim().chars().count();
    let quality = if trimmed_len < MIN_ALT_LENGTH {
        AltQuality::Poor
    } else if score >= 90 {
        AltQuality::Excellent
    } else if score >= 70 {
        AltQuality::Good
    } else if score >= 50 {
        AltQuality::Fair
    } else {
        AltQuality::Poor
    };

    AltTextAssessment {
        score,
        quality,
        issues: problems.iter().map(AltTextProblem::message).collect(),
        suggestions: problems.iter().flat_map(|p| p.suggestions(alt)).collect(),
    }
}

fn alt_text_problems(alt: &str, context: Option<&str>) -> Vec<AltTextProblem> {
    if alt.trim().is_empty() {
        return vec![AltTextProblem::Empty];
    }

    let mut problems = Vec::new();
    let length = alt.chars().count();
    if length < MIN_ALT_LENGTH {
        problems.push(AltTextProblem::TooShort);
    } else if length > MAX_ALT_LENGTH {
        problems.push(AltTextProblem::TooLong);
    }

    let lower = alt.to_lowercase();
    if REDUNDANT_PHRASES.iter().any(|p| lower.contains(p)) {
        problems.push(AltTextProblem::RedundantPhrase);
    }
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
        problems.push(AltTextProblem::FileExtension);
    }

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        let context_lower = context.to_lowercase();
        let context_words: Vec<&str> = context_lower.split_whitespace().collect();
        let alt_words: Vec<&str> = lower.split_whitespace().collect();
        let matches = alt_words
            .iter()
            .filter(|w| w.chars().count() > 3 && context_words.contains(w))
            .count();
        if matches == 0 && alt_words.len() > 3 {
            problems.push(AltTextProblem::OffContext);
        }
    }

    problems
}
