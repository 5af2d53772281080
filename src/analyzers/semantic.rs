// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic HTML analyzer - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Checks for proper use of semantic HTML elements:
//! - Pages use landmark elements (header, nav, main, footer)
//! - Sections are labelled by a heading
//! - Headings follow proper hierarchy (no skipping h1 to h3)
//! - Repeated sibling divs use list markup instead
//! - Tables have thead and th with scope

use crate::analyzers::{insert_attributes, selector, snippet, Analyzer, MarkupIssue, Page};
use crate::findings::{criteria, Finding, ImpactAssessment, Severity};
use scraper::ElementRef;
use serde::Serialize;

/// Semantic HTML analyzer
pub struct SemanticAnalyzer;

/// Share of child divs that must match the first child's class for the
/// container to read as a list
const LIST_SIMILARITY: f64 = 0.7;
const MIN_LIST_ITEMS: usize = 3;
const CODE_PREVIEW: usize = 100;

impl Analyzer for SemanticAnalyzer {
    fn name(&self) -> &str {
        "Semantic HTML Analyzer"
    }

    fn description(&self) -> &str {
        "Checks for proper semantic HTML usage (WCAG 1.3.1)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        check_landmarks(page, &mut findings);
        check_first_heading(page, &mut findings);

        let rules = [
            ("WCAG-1.3.1-section-heading", "Info and Relationships: Section Without Heading"),
            ("WCAG-1.3.1-div-list", "Info and Relationships: List Without List Markup"),
            ("WCAG-1.3.1-heading-skip", "Info and Relationships: Heading Skip"),
            ("WCAG-1.3.1-table-no-thead", "Info and Relationships: Table Structure"),
        ];
        let groups = [
            section_heading_issues(page),
            potential_list_issues(page),
            heading_order_issues(page),
            table_header_issues(page),
        ];
        for ((rule_id, rule_name), issues) in rules.iter().zip(groups) {
            findings.extend(
                issues
                    .iter()
                    .map(|issue| issue.to_finding(page, rule_id, rule_name, ImpactAssessment::blind())),
            );
        }

        check_th_scope(page, &mut findings);
        findings
    }
}

/// All structural problems, in rule order
pub fn validate_semantics(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = section_heading_issues(page);
    issues.extend(potential_list_issues(page));
    issues.extend(heading_order_issues(page));
    issues.extend(table_header_issues(page));
    issues
}

fn info_and_relationships(
    id: String,
    element: ElementRef<'_>,
    issue: String,
    code: String,
    suggestion: String,
    page: &Page<'_>,
) -> MarkupIssue {
    MarkupIssue {
        id,
        element: element.value().name().to_string(),
        issue,
        code,
        suggestion,
        severity: Severity::Warning,
        wcag_criteria: criteria::INFO_AND_RELATIONSHIPS,
        line: page.line_of_element(element),
    }
}

fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    element.value().name().strip_prefix('h')?.parse().ok()
}

/// Sections with no heading anywhere inside them
fn section_heading_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let heading_sel = selector("h1, h2, h3, h4, h5, h6");

    page.document
        .select(&selector("section"))
        .enumerate()
        .filter(|(_, section)| section.select(&heading_sel).next().is_none())
        .map(|(idx, section)| {
            let n = idx + 1;
            let heading_id = format!("section-heading-{}", n);
            let html = section.html();
            let (open, rest) = html.split_at(html.find('>').map_or(html.len(), |i| i + 1));
            let open = insert_attributes(open, "section", &format!("aria-labelledby=\"{}\"", heading_id));
            let suggestion = format!(
                "{}\n  <h2 id=\"{}\">Section Heading</h2>\n  {}",
                open, heading_id, rest
            );
            info_and_relationships(
                format!("semantic-section-{}", n),
                section,
                "Section without heading".to_string(),
                snippet(section, CODE_PREVIEW),
                suggestion,
                page,
            )
        })
        .collect()
}

/// Containers of three or more similar child divs, rewritten as `<ul>`
fn potential_list_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();

    for container in page.document.select(&selector("div")) {
        let children: Vec<ElementRef<'_>> = container
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "div")
            .collect();
        if children.len() < MIN_LIST_ITEMS {
            continue;
        }

        let class_of = |el: &ElementRef<'_>| el.value().attr("class").unwrap_or("").to_string();
        let first_class = class_of(&children[0]);
        let similar = children.iter().filter(|c| class_of(*c) == first_class).count();
        if (similar as f64) < children.len() as f64 * LIST_SIMILARITY {
            continue;
        }

        let mut suggestion = format!("<ul class=\"{}\">\n", class_of(&container));
        for child in &children {
            suggestion.push_str(&format!("  <li class=\"{}\">{}</li>\n", class_of(child), child.inner_html()));
        }
        suggestion.push_str("</ul>");

        issues.push(info_and_relationships(
            format!("semantic-list-{}", issues.len() + 1),
            container,
            "List-like structure not using proper list elements".to_string(),
            snippet(container, CODE_PREVIEW),
            suggestion,
            page,
        ));
    }

    issues
}

/// Headings more than one level deeper than the heading before them
fn heading_order_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let headings: Vec<(ElementRef<'_>, u8)> = page
        .document
        .select(&selector("h1, h2, h3, h4, h5, h6"))
        .filter_map(|el| heading_level(el).map(|level| (el, level)))
        .collect();

    let mut issues = Vec::new();
    for pair in headings.windows(2) {
        let (prev, (current, level)) = (pair[0].1, pair[1]);
        if level <= prev + 1 {
            continue;
        }

        let tag = current.value().name();
        let suggested = format!("h{}", prev + 1);
        let suggestion = current
            .html()
            .replacen(&format!("<{}", tag), &format!("<{}", suggested), 1)
            .replacen(&format!("</{}>", tag), &format!("</{}>", suggested), 1);

        issues.push(info_and_relationships(
            format!("semantic-heading-{}", issues.len() + 1),
            current,
            format!("Skipped heading level: {} after h{}", tag.to_uppercase(), prev),
            current.html(),
            suggestion,
            page,
        ));
    }

    issues
}

/// Tables without a header section; the suggestion is a `<thead>` sized
/// to the first row
fn table_header_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let thead_sel = selector("thead");
    let row_sel = selector("tr");
    let cell_sel = selector("td, th");

    page.document
        .select(&selector("table"))
        .filter(|table| table.select(&thead_sel).next().is_none())
        .enumerate()
        .map(|(idx, table)| {
            let columns = table
                .select(&row_sel)
                .next()
                .map_or(1, |row| row.select(&cell_sel).count().max(1));
            let mut suggestion = String::from("<thead>\n  <tr>\n");
            for col in 1..=columns {
                suggestion.push_str(&format!("    <th scope=\"col\">Column {}</th>\n", col));
            }
            suggestion.push_str("  </tr>\n</thead>");

            info_and_relationships(
                format!("semantic-table-{}", idx + 1),
                table,
                "Table is missing <thead> element. Tables should have a header section.".to_string(),
                snippet(table, CODE_PREVIEW),
                suggestion,
                page,
            )
        })
        .collect()
}

fn check_landmarks(page: &Page<'_>, findings: &mut Vec<Finding>) {
    let landmarks = landmark_regions(page).landmarks;
    let found_any = landmarks.header + landmarks.nav + landmarks.main + landmarks.footer > 0;
    let has_body = page.document.select(&selector("body")).next().is_some();

    if has_body && !found_any {
        findings.push(page.locate(
            Finding::new(
                "WCAG-1.3.1-no-semantic",
                Severity::Warning,
                "Page does not use semantic HTML elements (header, nav, main, footer). Semantic elements improve screen reader navigation.",
            )
            .with_criterion(criteria::INFO_AND_RELATIONSHIPS)
            .with_rule_name("Info and Relationships: Missing Semantic Elements")
            .with_suggestion(
                "Add semantic elements: <header> for page header, <nav> for navigation, <main> for primary content, <footer> for page footer",
            )
            .with_impact(ImpactAssessment::blind()),
            None,
        ));
    }
}

fn check_first_heading(page: &Page<'_>, findings: &mut Vec<Finding>) {
    let Some(first) = page.document.select(&selector("h1, h2, h3, h4, h5, h6")).next() else {
        return;
    };
    let Some(level) = heading_level(first) else { return };
    if level == 1 {
        return;
    }

    findings.push(page.locate(
        Finding::new(
            "WCAG-1.3.1-first-heading",
            Severity::Warning,
            &format!("First heading is <h{}> instead of <h1>. The first heading should be h1.", level),
        )
        .with_criterion(criteria::INFO_AND_RELATIONSHIPS)
        .with_rule_name("Info and Relationships: Heading Hierarchy")
        .with_element(first.value().name())
        .with_suggestion("Start the page with an <h1> element")
        .with_impact(ImpactAssessment::blind()),
        page.line_of_element(first),
    ));
}

fn check_th_scope(page: &Page<'_>, findings: &mut Vec<Finding>) {
    for th in page.document.select(&selector("th")) {
        if th.value().attr("scope").is_some() {
            continue;
        }
        let text = th.text().collect::<String>();
        findings.push(page.locate(
            Finding::new(
                "WCAG-1.3.1-th-no-scope",
                Severity::Info,
                &format!(
                    "<th> element \"{}\" is missing scope attribute.",
                    crate::analyzers::truncate(text.trim(), 30)
                ),
            )
            .with_criterion(criteria::INFO_AND_RELATIONSHIPS)
            .with_rule_name("Info and Relationships: Table Header Scope")
            .with_element("th")
            .with_code(th.html())
            .with_suggestion("Add scope=\"col\" or scope=\"row\" to <th> elements")
            .as_fixable()
            .with_impact(ImpactAssessment::blind()),
            page.line_of_element(th),
        ));
    }
}

/// Heading counts per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingLevels {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingLevels {
    fn as_array(&self) -> [usize; 6] {
        [self.h1, self.h2, self.h3, self.h4, self.h5, self.h6]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStructure {
    pub total_headings: usize,
    pub heading_levels: HeadingLevels,
    /// Exactly one h1
    pub has_proper_h1: bool,
    /// Some level is absent while both a shallower and a deeper one exist
    pub has_skipped_levels: bool,
}

pub fn heading_structure(page: &Page<'_>) -> HeadingStructure {
    let mut levels = HeadingLevels::default();
    let mut total = 0;

    for heading in page.document.select(&selector("h1, h2, h3, h4, h5, h6")) {
        total += 1;
        match heading_level(heading) {
            Some(1) => levels.h1 += 1,
            Some(2) => levels.h2 += 1,
            Some(3) => levels.h3 += 1,
            Some(4) => levels.h4 += 1,
            Some(5) => levels.h5 += 1,
            _ => levels.h6 += 1,
        }
    }

    let counts = levels.as_array();
    let first = counts.iter().position(|&c| c > 0);
    let last = counts.iter().rposition(|&c| c > 0);
    let has_skipped_levels = match (first, last) {
        (Some(first), Some(last)) => counts[first..=last].iter().any(|&c| c == 0),
        _ => false,
    };

    HeadingStructure {
        total_headings: total,
        has_proper_h1: levels.h1 == 1,
        heading_levels: levels,
        has_skipped_levels,
    }
}

/// Landmark element counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Landmarks {
    pub header: usize,
    pub nav: usize,
    pub main: usize,
    pub aside: usize,
    pub footer: usize,
    pub search: usize,
    pub form: usize,
    pub contentinfo: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkRegions {
    pub landmarks: Landmarks,
    /// header, nav, main and footer all present
    pub has_proper_structure: bool,
}

pub fn landmark_regions(page: &Page<'_>) -> LandmarkRegions {
    let count = |css: &str| page.document.select(&selector(css)).count();
    let landmarks = Landmarks {
        header: count("header"),
        nav: count("nav"),
        main: count("main"),
        aside: count("aside"),
        footer: count("footer"),
        search: count("[role=\"search\"]"),
        form: count("form"),
        contentinfo: count("[role=\"contentinfo\"]"),
    };
    let has_proper_structure =
        landmarks.header > 0 && landmarks.nav > 0 && landmarks.main > 0 && landmarks.footer > 0;

    LandmarkRegions { landmarks, has_proper_structure }
}
