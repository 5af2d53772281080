// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA validator - WCAG 4.1.2 Name, Role, Value (Level A) and
//! WCAG 4.1.3 Status Messages (Level AA)
//!
//! Validates correct use of ARIA attributes:
//! - Custom buttons are keyboard operable
//! - Elements carrying aria-* attributes expose a role
//! - Interactive elements have an accessible name
//! - aria-hidden not on focusable elements
//! - No redundant ARIA on native semantic elements
//! - Status-like regions announce their updates

use crate::analyzers::{insert_attributes, selector, Analyzer, MarkupIssue, Page};
use crate::findings::{criteria, Finding, ImpactAssessment, Severity};
use scraper::ElementRef;
use serde::Serialize;
use std::collections::HashSet;

/// ARIA validator analyzer
pub struct AriaAnalyzer;

/// Elements that have implicit ARIA roles (redundant to add explicitly)
const REDUNDANT_ROLES: &[(&str, &str)] = &[
    ("nav", "navigation"),
    ("main", "main"),
    ("header", "banner"),
    ("footer", "contentinfo"),
    ("aside", "complementary"),
    ("form", "form"),
    ("button", "button"),
    ("a", "link"),
    ("input", "textbox"),
    ("select", "listbox"),
    ("textarea", "textbox"),
    ("table", "table"),
    ("ul", "list"),
    ("ol", "list"),
    ("article", "article"),
    ("section", "region"),
];

/// Interactive/focusable element names
const FOCUSABLE_ELEMENTS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "details", "summary",
];

/// Tags whose implicit role makes an explicit one unnecessary when they
/// carry aria-* attributes
const IMPLICIT_ROLE_TAGS: &[&str] = &[
    "article", "aside", "button", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "img", "input", "li", "main", "nav", "ol", "section", "select", "table", "textarea", "ul",
];

const KEYBOARD_HANDLERS: &[&str] = &["onkeydown", "onkeyup", "onkeypress"];
const STATUS_CLASSES: &str = ".status, .message, .alert, .notification, .toast";
const LIVE_ROLES: &[&str] = &["status", "alert", "log"];

impl Analyzer for AriaAnalyzer {
    fn name(&self) -> &str {
        "ARIA Validator"
    }

    fn description(&self) -> &str {
        "Validates ARIA attributes, roles and status messages (WCAG 4.1.2, 4.1.3)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for issue in button_keyboard_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.2-button-keyboard",
                "Name, Role, Value: Custom Button Without Keyboard Support",
                ImpactAssessment::blind_and_motor(),
            ));
        }
        for issue in missing_role_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.2-missing-role",
                "Name, Role, Value: ARIA Attributes Without Role",
                ImpactAssessment::blind(),
            ));
        }
        for issue in accessible_name_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.2-no-accessible-name",
                "Name, Role, Value: Missing Accessible Name",
                ImpactAssessment::blind(),
            ));
        }
        for issue in hidden_focusable_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.2-aria-hidden-focusable",
                "Name, Role, Value: Hidden Focusable Element",
                ImpactAssessment::blind(),
            ));
        }
        for issue in redundant_role_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.2-redundant-role",
                "Name, Role, Value: Redundant ARIA Role",
                ImpactAssessment::blind(),
            ));
        }
        for issue in status_message_issues(page) {
            findings.push(issue.to_finding(
                page,
                "WCAG-4.1.3-status-message",
                "Status Messages: Missing Live Region",
                ImpactAssessment::blind(),
            ));
        }

        findings
    }
}

/// All ARIA attribute problems, in rule order
pub fn validate_aria(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = button_keyboard_issues(page);
    issues.extend(missing_role_issues(page));
    issues.extend(accessible_name_issues(page));
    issues.extend(hidden_focusable_issues(page));
    issues.extend(redundant_role_issues(page));
    issues
}

fn name_role_value(
    id: String,
    element: ElementRef<'_>,
    issue: &str,
    suggestion: String,
    severity: Severity,
    page: &Page<'_>,
) -> MarkupIssue {
    MarkupIssue {
        id,
        element: element.value().name().to_string(),
        issue: issue.to_string(),
        code: element.html(),
        suggestion,
        severity,
        wcag_criteria: criteria::NAME_ROLE_VALUE,
        line: page.line_of_element(element),
    }
}

/// `role="button"` on something that is not natively keyboard operable
fn button_keyboard_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();

    for (idx, element) in page.document.select(&selector("[role=\"button\"]")).enumerate() {
        let el = element.value();
        let native = match el.name() {
            "button" | "input" => true,
            "a" => el.attr("href").is_some(),
            _ => false,
        };
        if native || KEYBOARD_HANDLERS.iter().any(|h| el.attr(h).is_some()) {
            continue;
        }

        let suggestion = insert_attributes(
            &element.html(),
            el.name(),
            "tabindex=\"0\" onkeydown=\"if(event.key === 'Enter') this.click();\"",
        );
        issues.push(name_role_value(
            format!("aria-button-{}", idx + 1),
            element,
            "Element with role=\"button\" has no keyboard event handler",
            suggestion,
            Severity::Error,
            page,
        ));
    }

    issues
}

fn has_aria_attributes(element: ElementRef<'_>) -> bool {
    element.value().attrs().any(|(name, _)| name.starts_with("aria-"))
}

fn has_implicit_role(element: ElementRef<'_>) -> bool {
    let el = element.value();
    match el.name() {
        "a" => el.attr("href").is_some(),
        tag => IMPLICIT_ROLE_TAGS.contains(&tag),
    }
}

fn suggested_role(element: ElementRef<'_>) -> &'static str {
    let el = element.value();
    if el.attr("aria-expanded").is_some() || el.attr("aria-pressed").is_some() {
        "button"
    } else if el.attr("aria-selected").is_some() {
        "option"
    } else if el.attr("aria-checked").is_some() {
        "checkbox"
    } else {
        "group"
    }
}

/// aria-* attributes on an element with neither an explicit nor an
/// implicit role
fn missing_role_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    page.document
        .select(&selector("*"))
        .filter(|element| has_aria_attributes(*element))
        .enumerate()
        .filter(|(_, element)| element.value().attr("role").is_none() && !has_implicit_role(*element))
        .map(|(idx, element)| {
            let role = format!("role=\"{}\"", suggested_role(element));
            let suggestion = insert_attributes(&element.html(), element.value().name(), &role);
            name_role_value(
                format!("aria-role-{}", idx + 1),
                element,
                "Element with ARIA attributes but no explicit role",
                suggestion,
                Severity::Warning,
                page,
            )
        })
        .collect()
}

/// Whether a `<label>` names this control, by `for` or by nesting
fn has_label(labelled: &HashSet<&str>, element: ElementRef<'_>) -> bool {
    element.value().id().is_some_and(|id| labelled.contains(id))
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| ancestor.value().name() == "label")
}

fn has_accessible_name(labelled: &HashSet<&str>, element: ElementRef<'_>) -> bool {
    let el = element.value();
    let is_input = el.name() == "input";

    el.attr("aria-label").is_some_and(|v| !v.trim().is_empty())
        || el.attr("aria-labelledby").is_some()
        || (is_input && el.attr("title").is_some())
        || (is_input && el.attr("type") == Some("image") && el.attr("alt").is_some())
        || (el.name() != "a" && el.name() != "button" && has_label(labelled, element))
        || !element.text().collect::<String>().trim().is_empty()
}

fn suggest_accessible_name(element: ElementRef<'_>, idx: usize) -> String {
    let el = element.value();
    let tag = el.name();
    let html = element.html();

    match tag {
        "button" | "a" => insert_attributes(&html, tag, &format!("aria-label=\"Purpose of this {}\"", tag)),
        _ => {
            let kind = if tag == "input" { el.attr("type").unwrap_or("text") } else { tag };
            let (id, html) = match el.id() {
                Some(id) => (id.to_string(), html),
                None => {
                    let id = format!("{}-{}", kind, idx);
                    let with_id = insert_attributes(&html, tag, &format!("id=\"{}\"", id));
                    (id, with_id)
                }
            };
            format!("<label for=\"{}\">{}</label>\n{}", id, capitalize(kind), html)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Interactive elements screen readers cannot name
fn accessible_name_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();
    // ids named by a <label for>
    let labelled: HashSet<&str> = page
        .document
        .select(&selector("label[for]"))
        .filter_map(|label| label.value().attr("for"))
        .collect();

    for (idx, element) in page
        .document
        .select(&selector("button, a, input, select, textarea"))
        .enumerate()
    {
        if element.value().attr("type") == Some("hidden") || has_accessible_name(&labelled, element) {
            continue;
        }
        let n = idx + 1;
        issues.push(name_role_value(
            format!("aria-name-{}", n),
            element,
            "Interactive element without accessible name",
            suggest_accessible_name(element, n),
            Severity::Error,
            page,
        ));
    }

    issues
}

/// `aria-hidden="true"` on something that can still take focus
fn hidden_focusable_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    page.document
        .select(&selector("[aria-hidden=\"true\"]"))
        .filter(|element| {
            let el = element.value();
            let focusable_tag = FOCUSABLE_ELEMENTS.contains(&el.name());
            let tabbable = el
                .attr("tabindex")
                .and_then(|t| t.trim().parse::<i32>().ok())
                .is_some_and(|t| t >= 0);
            (focusable_tag && el.attr("tabindex") != Some("-1")) || tabbable
        })
        .enumerate()
        .map(|(idx, element)| {
            let suggestion = element.html().replacen(" aria-hidden=\"true\"", "", 1);
            name_role_value(
                format!("aria-hidden-{}", idx + 1),
                element,
                "aria-hidden=\"true\" is set on a focusable element; it stays keyboard-focusable but is hidden from screen readers",
                suggestion,
                Severity::Error,
                page,
            )
        })
        .collect()
}

/// Explicit roles that repeat the element's implicit role
fn redundant_role_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();

    for element in page.document.select(&selector("[role]")) {
        let el = element.value();
        let Some(role) = el.attr("role") else { continue };
        let redundant = REDUNDANT_ROLES
            .iter()
            .any(|(tag, implicit)| *tag == el.name() && *implicit == role.trim());
        if !redundant || (el.name() == "a" && el.attr("href").is_none()) {
            continue;
        }

        let suggestion = element.html().replacen(&format!(" role=\"{}\"", role), "", 1);
        issues.push(name_role_value(
            format!("aria-redundant-{}", issues.len() + 1),
            element,
            &format!(
                "Redundant role=\"{}\" on <{}> element. The element already has this implicit role.",
                role,
                el.name()
            ),
            suggestion,
            Severity::Warning,
            page,
        ));
    }

    issues
}

/// Elements styled as status, alert or toast messages that assistive
/// technology will not announce
pub fn status_message_issues(page: &Page<'_>) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();

    for (idx, element) in page.document.select(&selector(STATUS_CLASSES)).enumerate() {
        let el = element.value();
        let live_role = el.attr("role").is_some_and(|r| LIVE_ROLES.contains(&r));
        if el.attr("aria-live").is_some() || live_role {
            continue;
        }

        let class = el.attr("class").unwrap_or("");
        let (role, politeness) = if class.contains("alert") || class.contains("error") {
            ("alert", "assertive")
        } else if class.contains("log") {
            ("log", "polite")
        } else {
            ("status", "polite")
        };

        issues.push(MarkupIssue {
            id: format!("status-message-{}", idx + 1),
            element: el.name().to_string(),
            issue: "Potential status message without aria-live or appropriate role".to_string(),
            code: element.html(),
            suggestion: insert_attributes(
                &element.html(),
                el.name(),
                &format!("role=\"{}\" aria-live=\"{}\"", role, politeness),
            ),
            severity: Severity::Warning,
            wcag_criteria: criteria::STATUS_MESSAGES,
            line: page.line_of_element(element),
        });
    }

    issues
}

/// Before/after markup for one issue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaFix {
    pub id: String,
    pub element: String,
    pub issue: String,
    pub original_code: String,
    pub suggested_code: String,
    pub severity: Severity,
    pub wcag_criteria: crate::findings::Criterion,
}

impl From<&MarkupIssue> for AriaFix {
    fn from(issue: &MarkupIssue) -> Self {
        Self {
            id: issue.id.clone(),
            element: issue.element.clone(),
            issue: issue.issue.clone(),
            original_code: issue.code.clone(),
            suggested_code: issue.suggestion.clone(),
            severity: issue.severity,
            wcag_criteria: issue.wcag_criteria,
        }
    }
}

/// Fixes for every issue, or only for `issue_id`. `None` when the id
/// matches no issue.
pub fn suggest_fixes(issues: &[MarkupIssue], issue_id: Option<&str>) -> Option<Vec<AriaFix>> {
    match issue_id {
        Some(id) => issues.iter().find(|i| i.id == id).map(|i| vec![AriaFix::from(i)]),
        None => Some(issues.iter().map(AriaFix::from).collect()),
    }
}
