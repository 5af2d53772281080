// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML analyzers implementing WCAG 2.1 checks.
//!
//! Each analyzer module focuses on one WCAG criterion or a group of related
//! criteria. Modules also expose the structured reports the HTTP API returns
//! (image reports, ARIA issues, color pairs); the [`Analyzer`] impls turn the
//! same checks into [`Finding`]s for full-page audits.

pub mod alt_text;
pub mod aria;
pub mod contrast;
pub mod language;
pub mod media;
pub mod semantic;

use crate::findings::{Criterion, Finding, FindingSet, ImpactAssessment, Severity, WcagLevel};
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::Path;

/// A parsed HTML document plus the source it came from.
///
/// Source lines are resolved through two indexes built on first use: the
/// line of every opening tag in the source, and each element's position
/// among parsed elements with the same name.
pub struct Page<'a> {
    pub path: Option<&'a Path>,
    pub content: &'a str,
    pub document: Html,
    tag_lines: OnceCell<HashMap<String, Vec<usize>>>,
    ordinals: OnceCell<HashMap<NodeId, usize>>,
}

impl<'a> Page<'a> {
    pub fn parse(content: &'a str) -> Self {
        Self {
            path: None,
            content,
            document: Html::parse_document(content),
            tag_lines: OnceCell::new(),
            ordinals: OnceCell::new(),
        }
    }

    /// Attach a file path so findings carry a location
    pub fn at(mut self, path: &'a Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Line of the `nth` (0-based) occurrence of `<tag` in the source
    pub fn line_of_nth_tag(&self, tag: &str, nth: usize) -> Option<usize> {
        self.tag_lines
            .get_or_init(|| scan_tag_lines(self.content))
            .get(&tag.to_ascii_lowercase())?
            .get(nth)
            .copied()
    }

    /// Source line of a parsed element, found by its position among
    /// elements with the same tag
    pub fn line_of_element(&self, element: ElementRef<'_>) -> Option<usize> {
        let nth = *self
            .ordinals
            .get_or_init(|| element_ordinals(&self.document))
            .get(&element.id())?;
        self.line_of_nth_tag(element.value().name(), nth)
    }

    /// Attach this page's file and the given line to a finding
    pub(crate) fn locate(&self, mut finding: Finding, line: Option<usize>) -> Finding {
        if let Some(path) = self.path {
            finding = finding.with_file(path.to_path_buf());
        }
        if let Some(line) = line {
            finding = finding.with_line(line);
        }
        finding
    }
}

/// Line of every opening tag, keyed by lowercase tag name. A tag name runs
/// from the `<` to the first whitespace, `/` or `>`.
fn scan_tag_lines(content: &str) -> HashMap<String, Vec<usize>> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    let mut line = 1;
    let mut rest = content;

    while let Some(pos) = rest.find(['<', '\n']) {
        let after = &rest[pos + 1..];
        if rest.as_bytes()[pos] == b'\n' {
            line += 1;
        } else {
            let end = after
                .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .unwrap_or(after.len());
            let name = &after[..end];
            if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                index.entry(name.to_ascii_lowercase()).or_default().push(line);
            }
        }
        rest = after;
    }

    index
}

/// Position of every element among elements with the same name, in
/// document order
fn element_ordinals(document: &Html) -> HashMap<NodeId, usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .map(|element| {
            let count = seen.entry(element.value().name()).or_default();
            let nth = *count;
            *count += 1;
            (element.id(), nth)
        })
        .collect()
}

/// A markup problem with a concrete replacement, as returned by the ARIA
/// and semantic structure endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupIssue {
    /// `<kind>-<n>`, stable for the same document
    pub id: String,
    pub element: String,
    pub issue: String,
    pub code: String,
    pub suggestion: String,
    pub severity: Severity,
    pub wcag_criteria: Criterion,
    #[serde(skip)]
    pub line: Option<usize>,
}

impl MarkupIssue {
    /// Convert into a finding for the full audit
    pub fn to_finding(
        &self,
        page: &Page<'_>,
        rule_id: &str,
        rule_name: &str,
        impact: ImpactAssessment,
    ) -> Finding {
        page.locate(
            Finding::new(rule_id, self.severity, &self.issue)
                .with_id(self.id.clone())
                .with_criterion(self.wcag_criteria)
                .with_rule_name(rule_name)
                .with_element(&self.element)
                .with_code(self.code.clone())
                .with_suggestion(self.suggestion.clone())
                .as_fixable()
                .with_impact(impact),
            self.line,
        )
    }
}

/// Trait implemented by all analyzers
pub trait Analyzer: Send + Sync {
    /// Human-readable name of this analyzer
    fn name(&self) -> &str;

    /// Short description of what this analyzer checks
    fn description(&self) -> &str;

    /// Analyze a parsed page and return findings
    fn analyze(&self, page: &Page<'_>) -> Vec<Finding>;

    /// Whether any check in this analyzer matters at the given target level
    fn applies_to_level(&self, _level: WcagLevel) -> bool {
        true
    }
}

/// Every analyzer, in report order
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(alt_text::AltTextAnalyzer),
        Box::new(contrast::ContrastAnalyzer),
        Box::new(semantic::SemanticAnalyzer),
        Box::new(aria::AriaAnalyzer),
        Box::new(media::MediaAnalyzer),
        Box::new(language::LanguageAnalyzer),
    ]
}

/// Run every applicable analyzer over a page, keeping findings whose
/// criterion is at or below `level`
pub fn audit_page(page: &Page<'_>, level: WcagLevel) -> FindingSet {
    let mut findings = FindingSet::new();

    for analyzer in all_analyzers() {
        if !analyzer.applies_to_level(level) {
            continue;
        }
        let found = analyzer.analyze(page);
        tracing::debug!(analyzer = analyzer.name(), count = found.len(), "analyzer finished");
        findings.extend(found);
    }

    findings.retain_level(level);
    findings
}

/// Parse and audit an HTML string
pub fn audit_html(content: &str, path: Option<&Path>, level: WcagLevel) -> FindingSet {
    let mut page = Page::parse(content);
    if let Some(path) = path {
        page = page.at(path);
    }
    audit_page(&page, level)
}

/// Parse a selector literal
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Outer HTML of an element, cut to `max` characters with an ellipsis
pub(crate) fn snippet(element: ElementRef<'_>, max: usize) -> String {
    truncate(&element.html(), max)
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Insert attributes right after the first `<tag`
pub(crate) fn insert_attributes(html: &str, tag: &str, attributes: &str) -> String {
    let open = format!("<{}", tag);
    html.replacen(&open, &format!("{} {}", open, attributes), 1)
}

/// Whether an element has text directly inside it (not only in children)
pub(crate) fn has_own_text(element: ElementRef<'_>) -> bool {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .any(|text| !text.trim().is_empty())
}
