// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast analyzer - WCAG 1.4.3 Contrast (Minimum, AA) and 1.4.6
//! Contrast (Enhanced, AAA)
//!
//! Extracts foreground/background pairs from inline styles (inheriting from
//! styled ancestors) and from `<style>` rule blocks, then checks them:
//! - AAA: 7:1 for normal text, 4.5:1 for large text
//! - AA: 4.5:1 for normal text, 3:1 for large text

use crate::analyzers::{has_own_text, selector, Analyzer, Page};
use crate::color::{
    adjust_for_contrast, contrast_ratio, display_ratio, required_ratio, Color, AAA_LARGE, AAA_NORMAL,
    AA_LARGE, AA_NORMAL,
};
use crate::findings::{criteria, Finding, ImpactAssessment, Severity, WcagLevel};
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;
use std::sync::LazyLock;

static RULE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]+)\{([^}]*)\}").expect("valid regex"));
static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#[0-9a-f]{3,6}\b|rgba?\([^)]*\)|\b[a-z]+\b").expect("valid regex")
});
static FONT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([\d.]+)\s*(px|pt|em|rem)$").expect("valid regex"));

/// Contrast analyzer for HTML documents
pub struct ContrastAnalyzer;

impl Analyzer for ContrastAnalyzer {
    fn name(&self) -> &str {
        "Color Contrast Analyzer"
    }

    fn description(&self) -> &str {
        "Checks color contrast ratios meet WCAG requirements (1.4.3/1.4.6)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        extract_color_pairs(page)
            .into_iter()
            .filter_map(|pair| pair_finding(page, &pair))
            .collect()
    }

    fn applies_to_level(&self, level: WcagLevel) -> bool {
        level >= WcagLevel::AA
    }
}

/// A text color and the background it is rendered on
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPair {
    /// Short element description, e.g. `p.note` or a CSS selector
    pub element: String,
    pub foreground: Color,
    pub background: Color,
    pub large_text: bool,
    pub line: Option<usize>,
}

impl ColorPair {
    pub fn ratio(&self) -> f64 {
        contrast_ratio(self.foreground, self.background)
    }
}

/// A pair that misses its AAA requirement, with a remediated foreground
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastIssue {
    pub element: String,
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    pub required: f64,
    pub suggestion: Color,
}

/// Result of scanning a document for contrast problems
#[derive(Debug, Clone, Serialize)]
pub struct ContrastAnalysis {
    pub issues: Vec<ContrastIssue>,
    /// Number of color pairs that were checked
    pub analyzed: usize,
}

/// Check every extracted pair against the AAA thresholds
pub fn analyze_contrast(page: &Page<'_>) -> ContrastAnalysis {
    let pairs = extract_color_pairs(page);
    let issues = pairs
        .iter()
        .filter_map(|pair| {
            let ratio = pair.ratio();
            let required = required_ratio(WcagLevel::AAA, pair.large_text);
            (ratio < required).then(|| ContrastIssue {
                element: pair.element.clone(),
                foreground: pair.foreground,
                background: pair.background,
                ratio: display_ratio(ratio),
                required,
                suggestion: adjust_for_contrast(pair.foreground, pair.background, required),
            })
        })
        .collect();

    ContrastAnalysis { issues, analyzed: pairs.len() }
}

/// Pass/fail of one pair against all four WCAG thresholds
#[derive(Debug, Clone, Serialize)]
pub struct ContrastCheck {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    #[serde(rename = "passesAA")]
    pub passes_aa: bool,
    #[serde(rename = "passesAAA")]
    pub passes_aaa: bool,
    #[serde(rename = "passesAALarge")]
    pub passes_aa_large: bool,
    #[serde(rename = "passesAAALarge")]
    pub passes_aaa_large: bool,
}

impl ContrastCheck {
    pub fn new(foreground: Color, background: Color) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio: display_ratio(ratio),
            passes_aa: ratio >= AA_NORMAL,
            passes_aaa: ratio >= AAA_NORMAL,
            passes_aa_large: ratio >= AA_LARGE,
            passes_aaa_large: ratio >= AAA_LARGE,
        }
    }
}

/// One side of a suggestion: a pair and its display ratio
#[derive(Debug, Clone, Serialize)]
pub struct ColorSample {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
}

/// Original pair, remediated pair and whether the result passes
#[derive(Debug, Clone, Serialize)]
pub struct ContrastSuggestion {
    pub original: ColorSample,
    pub improved: ColorSample,
    pub required: f64,
    pub passes: bool,
}

impl ContrastSuggestion {
    pub fn new(foreground: Color, background: Color, required: f64) -> Self {
        let improved = adjust_for_contrast(foreground, background, required);
        let new_ratio = contrast_ratio(improved, background);
        Self {
            original: ColorSample {
                foreground,
                background,
                ratio: display_ratio(contrast_ratio(foreground, background)),
            },
            improved: ColorSample {
                foreground: improved,
                background,
                ratio: display_ratio(new_ratio),
            },
            required,
            passes: new_ratio >= required,
        }
    }
}

/// Collect color pairs from inline styles and `<style>` blocks
pub fn extract_color_pairs(page: &Page<'_>) -> Vec<ColorPair> {
    let mut pairs = inline_pairs(page);
    pairs.extend(stylesheet_pairs(page));
    pairs
}

/// Elements with their own text whose colors are set inline on themselves
/// or on an ancestor; unset sides default to black on white
fn inline_pairs(page: &Page<'_>) -> Vec<ColorPair> {
    let body = selector("body *");
    let mut pairs = Vec::new();

    for element in page.document.select(&body) {
        if !has_own_text(element) || matches!(element.value().name(), "script" | "style") {
            continue;
        }

        let mut foreground = None;
        let mut background = None;
        let mut styled_line = None;

        for el in std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap)) {
            let Some(style) = el.value().attr("style") else { continue };
            let declared = StyleDeclarations::parse(style);
            if foreground.is_none() {
                foreground = declared.color();
            }
            if background.is_none() {
                background = declared.background();
            }
            if styled_line.is_none() && (declared.color().is_some() || declared.background().is_some()) {
                styled_line = page.line_of_element(el);
            }
        }

        if foreground.is_none() && background.is_none() {
            continue;
        }

        pairs.push(ColorPair {
            element: describe(element),
            foreground: foreground.unwrap_or(Color::BLACK),
            background: background.unwrap_or(Color::WHITE),
            large_text: is_large_element(element),
            line: styled_line,
        });
    }

    pairs
}

/// Rule blocks inside `<style>` that declare both a color and a background
fn stylesheet_pairs(page: &Page<'_>) -> Vec<ColorPair> {
    let style_sel = selector("style");
    let mut pairs = Vec::new();

    for style in page.document.select(&style_sel) {
        let css = style.text().collect::<String>();
        let style_line = page.line_of_element(style);
        let (mut newlines, mut counted) = (0, 0);

        for caps in RULE_BLOCK.captures_iter(&css) {
            let Some(selector_match) = caps.get(1) else { continue };
            let raw = selector_match.as_str();
            let rule_selector = raw.trim();
            let at = selector_match.start() + (raw.len() - raw.trim_start().len());
            newlines += css[counted..at].matches('\n').count();
            counted = at;

            let declared = StyleDeclarations::parse(&caps[2]);
            if let (Some(foreground), Some(background)) = (declared.color(), declared.background()) {
                let heading = rule_selector
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .any(|part| part == "h1" || part == "h2");
                pairs.push(ColorPair {
                    element: rule_selector.to_string(),
                    foreground,
                    background,
                    large_text: heading || declared.is_large_text(),
                    line: style_line.map(|line| line + newlines),
                });
            }
        }
    }

    pairs
}

fn pair_finding(page: &Page<'_>, pair: &ColorPair) -> Option<Finding> {
    let ratio = pair.ratio();
    let size = if pair.large_text { "large" } else { "normal" };

    let (rule_id, severity, criterion, rule_name, required) =
        if ratio < required_ratio(WcagLevel::AA, pair.large_text) {
            (
                "WCAG-1.4.3-contrast-aa",
                Severity::Error,
                criteria::CONTRAST_MINIMUM,
                "Contrast (Minimum)",
                required_ratio(WcagLevel::AA, pair.large_text),
            )
        } else if ratio < required_ratio(WcagLevel::AAA, pair.large_text) {
            (
                "WCAG-1.4.6-contrast-aaa",
                Severity::Warning,
                criteria::CONTRAST_ENHANCED,
                "Contrast (Enhanced)",
                required_ratio(WcagLevel::AAA, pair.large_text),
            )
        } else {
            return None;
        };

    let improved = adjust_for_contrast(pair.foreground, pair.background, required);
    let finding = Finding::new(
        rule_id,
        severity,
        &format!(
            "Color contrast ratio {:.2}:1 for {} text on \"{}\" is below the {}:1 required at level {}",
            ratio, size, pair.element, required, criterion.level
        ),
    )
    .with_criterion(criterion)
    .with_rule_name(rule_name)
    .with_element(&pair.element)
    .with_suggestion(format!(
        "Change the text color from {} to {} ({:.2}:1 on {})",
        pair.foreground,
        improved,
        contrast_ratio(improved, pair.background),
        pair.background
    ))
    .as_fixable()
    .with_impact(ImpactAssessment::low_vision());

    Some(page.locate(finding, pair.line))
}

/// `tag`, `tag#id` or `tag.class` for display
fn describe(element: ElementRef<'_>) -> String {
    let el = element.value();
    if let Some(id) = el.id() {
        format!("{}#{}", el.name(), id)
    } else if let Some(class) = el.classes().next() {
        format!("{}.{}", el.name(), class)
    } else {
        el.name().to_string()
    }
}

/// Large text by tag or by font declarations on the element or its ancestors
fn is_large_element(element: ElementRef<'_>) -> bool {
    if matches!(element.value().name(), "h1" | "h2") {
        return true;
    }
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .filter_map(|el| el.value().attr("style"))
        .map(StyleDeclarations::parse)
        .find(|d| d.get("font-size").is_some())
        .is_some_and(|d| d.is_large_text())
}

/// Parsed `property: value` pairs from a style attribute or rule body
struct StyleDeclarations<'s> {
    entries: Vec<(String, &'s str)>,
}

impl<'s> StyleDeclarations<'s> {
    fn parse(style: &'s str) -> Self {
        let entries = style
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let value = value.trim().trim_end_matches("!important").trim();
                Some((prop.trim().to_ascii_lowercase(), value))
            })
            .collect();
        Self { entries }
    }

    /// Last declaration wins, as in CSS
    fn get(&self, property: &str) -> Option<&'s str> {
        self.entries
            .iter()
            .rev()
            .find(|(prop, _)| prop == property)
            .map(|(_, value)| *value)
    }

    fn color(&self) -> Option<Color> {
        self.get("color").and_then(|v| v.parse().ok())
    }

    fn background(&self) -> Option<Color> {
        if let Some(color) = self.get("background-color").and_then(|v| v.parse().ok()) {
            return Some(color);
        }
        let shorthand = self.get("background")?;
        shorthand.parse().ok().or_else(|| {
            COLOR_TOKEN
                .find_iter(shorthand)
                .find_map(|m| m.as_str().parse().ok())
        })
    }

    /// 18pt (24px) and up, or 14pt (18.66px) and up when bold
    fn is_large_text(&self) -> bool {
        let Some(px) = self.get("font-size").and_then(font_size_px) else {
            return false;
        };
        let bold = self.get("font-weight").is_some_and(|w| {
            matches!(w, "bold" | "bolder") || w.parse::<u16>().is_ok_and(|n| n >= 700)
        });
        px >= 24.0 || (bold && px >= 18.66)
    }
}

fn font_size_px(value: &str) -> Option<f64> {
    let caps = FONT_SIZE.captures(value.trim())?;
    let size: f64 = caps[1].parse().ok()?;
    let px = match caps[2].to_ascii_lowercase().as_str() {
        "px" => size,
        "pt" => size * 4.0 / 3.0,
        _ => size * 16.0,
    };
    Some(px)
}
