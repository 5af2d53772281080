// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding types shared by every analyzer.
//!
//! A [`Finding`] is one rule violation tied to a WCAG success criterion.
//! Analyzers return plain `Vec<Finding>`; [`FindingSet`] aggregates them for
//! reports and the audit endpoint.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks conformance
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
    /// Suggestion for improvement
    Suggestion,
}

impl Severity {
    /// Whether this severity fails an audit
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
            Severity::Suggestion => write!(f, "SUGGESTION"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(WcagLevel::A),
            "AA" => Ok(WcagLevel::AA),
            "AAA" => Ok(WcagLevel::AAA),
            other => Err(format!("Unknown WCAG level: {}", other)),
        }
    }
}

/// A WCAG 2.1 success criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Criterion {
    pub number: &'static str,
    pub name: &'static str,
    pub level: WcagLevel,
}

impl Criterion {
    const fn new(number: &'static str, name: &'static str, level: WcagLevel) -> Self {
        Self { number, name, level }
    }

    /// Number and name without the level, e.g. "1.2.2 Captions (Prerecorded)"
    pub fn title(&self) -> String {
        format!("{} {}", self.number, self.name)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.number, self.name, self.level)
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Success criteria referenced by the analyzers
pub mod criteria {
    use super::{Criterion, WcagLevel};

    pub const NON_TEXT_CONTENT: Criterion = Criterion::new("1.1.1", "Non-text Content", WcagLevel::A);
    pub const AUDIO_VIDEO_ONLY: Criterion =
        Criterion::new("1.2.1", "Audio-only and Video-only (Prerecorded)", WcagLevel::A);
    pub const CAPTIONS: Criterion = Criterion::new("1.2.2", "Captions (Prerecorded)", WcagLevel::A);
    pub const AUDIO_DESCRIPTION_OR_ALTERNATIVE: Criterion = Criterion::new(
        "1.2.3",
        "Audio Description or Media Alternative (Prerecorded)",
        WcagLevel::A,
    );
    pub const SIGN_LANGUAGE: Criterion = Criterion::new("1.2.6", "Sign Language (Prerecorded)", WcagLevel::AAA);
    pub const EXTENDED_AUDIO_DESCRIPTION: Criterion =
        Criterion::new("1.2.7", "Extended Audio Description (Prerecorded)", WcagLevel::AAA);
    pub const MEDIA_ALTERNATIVE: Criterion =
        Criterion::new("1.2.8", "Media Alternative (Prerecorded)", WcagLevel::AAA);
    pub const INFO_AND_RELATIONSHIPS: Criterion =
        Criterion::new("1.3.1", "Info and Relationships", WcagLevel::A);
    pub const AUDIO_CONTROL: Criterion = Criterion::new("1.4.2", "Audio Control", WcagLevel::A);
    pub const CONTRAST_MINIMUM: Criterion = Criterion::new("1.4.3", "Contrast (Minimum)", WcagLevel::AA);
    pub const CONTRAST_ENHANCED: Criterion = Criterion::new("1.4.6", "Contrast (Enhanced)", WcagLevel::AAA);
    pub const LANGUAGE_OF_PAGE: Criterion = Criterion::new("3.1.1", "Language of Page", WcagLevel::A);
    pub const READING_LEVEL: Criterion = Criterion::new("3.1.5", "Reading Level", WcagLevel::AAA);
    pub const NAME_ROLE_VALUE: Criterion = Criterion::new("4.1.2", "Name, Role, Value", WcagLevel::A);
    pub const STATUS_MESSAGES: Criterion = Criterion::new("4.1.3", "Status Messages", WcagLevel::AA);
}

/// Who is affected by an accessibility issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    pub blind: bool,
    pub low_vision: bool,
    pub motor: bool,
    pub cognitive: bool,
    pub deaf: bool,
}

impl ImpactAssessment {
    pub fn blind() -> Self {
        Self { blind: true, ..Self::default() }
    }

    pub fn low_vision() -> Self {
        Self { low_vision: true, ..Self::default() }
    }

    pub fn cognitive() -> Self {
        Self { cognitive: true, ..Self::default() }
    }

    pub fn deaf() -> Self {
        Self { deaf: true, ..Self::default() }
    }

    /// Screen reader and keyboard users
    pub fn blind_and_motor() -> Self {
        Self { blind: true, motor: true, ..Self::default() }
    }

    /// Describe affected groups
    pub fn affected_groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        if self.blind { groups.push("blind"); }
        if self.low_vision { groups.push("low-vision"); }
        if self.motor { groups.push("motor"); }
        if self.cognitive { groups.push("cognitive"); }
        if self.deaf { groups.push("deaf/hard-of-hearing"); }
        groups
    }
}

/// A single accessibility finding
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Identifier, unique within one analysis run (e.g. "aria-button-2")
    pub id: String,
    /// Rule identifier (e.g. "WCAG-1.1.1-missing-alt")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    /// Category (e.g. "accessibility/wcag-aa")
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Line number (1-indexed, best effort)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Tag name or CSS selector involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Offending markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Suggested fix, either prose or replacement markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub fixable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag_criteria: Option<Criterion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactAssessment>,
}

impl Finding {
    /// Create a new finding; the id defaults to the rule id
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: rule_id.to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            file: None,
            line: None,
            element: None,
            code: None,
            suggestion: None,
            fixable: false,
            wcag_criteria: None,
            impact: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the WCAG criterion; also sets the level-based category
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.wcag_criteria = Some(criterion);
        self.category = match criterion.level {
            WcagLevel::A => "accessibility/wcag-a".to_string(),
            WcagLevel::AA => "accessibility/wcag-aa".to_string(),
            WcagLevel::AAA => "accessibility/wcag-aaa".to_string(),
        };
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn as_fixable(mut self) -> Self {
        self.fixable = true;
        self
    }

    pub fn with_impact(mut self, impact: ImpactAssessment) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn wcag_level(&self) -> Option<WcagLevel> {
        self.wcag_criteria.map(|c| c.level)
    }

    /// Location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, self.line) {
            (Some(f), Some(l)) => format!("{}:{}", f.display(), l),
            (Some(f), None) => f.display().to_string(),
            (None, Some(l)) => format!("line {}", l),
            (None, None) => "<unknown>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingSet {
    pub findings: Vec<Finding>,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn by_wcag_level(&self, level: WcagLevel) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.wcag_level() == Some(level)).collect()
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Look a finding up by id
    pub fn find(&self, id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }

    /// Keep only findings at or below `max_level`; findings without a
    /// criterion are always kept
    pub fn retain_level(&mut self, max_level: WcagLevel) {
        self.findings.retain(|f| match f.wcag_level() {
            Some(level) => level <= max_level,
            None => true,
        });
    }
}

impl FromIterator<Finding> for FindingSet {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self { findings: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_display() {
        assert_eq!(criteria::NAME_ROLE_VALUE.to_string(), "4.1.2 Name, Role, Value (A)");
        assert_eq!(criteria::CAPTIONS.title(), "1.2.2 Captions (Prerecorded)");
    }

    #[test]
    fn test_with_criterion_sets_category() {
        let f = Finding::new("x", Severity::Warning, "m").with_criterion(criteria::CONTRAST_ENHANCED);
        assert_eq!(f.category, "accessibility/wcag-aaa");
        assert_eq!(f.wcag_level(), Some(WcagLevel::AAA));
    }

    #[test]
    fn test_retain_level() {
        let mut set: FindingSet = vec![
            Finding::new("a", Severity::Error, "a").with_criterion(criteria::NON_TEXT_CONTENT),
            Finding::new("aa", Severity::Error, "aa").with_criterion(criteria::CONTRAST_MINIMUM),
            Finding::new("aaa", Severity::Warning, "aaa").with_criterion(criteria::CONTRAST_ENHANCED),
            Finding::new("none", Severity::Info, "none"),
        ]
        .into_iter()
        .collect();
        set.retain_level(WcagLevel::AA);
        let ids: Vec<_> = set.findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "aa", "none"]);
        assert!(set.blocks_release());
        assert!(set.find("aaa").is_none());
    }

    #[test]
    fn test_finding_serializes_camel_case() {
        let f = Finding::new("WCAG-1.1.1-missing-alt", Severity::Error, "Missing alt")
            .with_criterion(criteria::NON_TEXT_CONTENT)
            .with_impact(ImpactAssessment::blind());
        let json = serde_json::to_value(&f).expect("serialize");
        assert_eq!(json["ruleId"], "WCAG-1.1.1-missing-alt");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["wcagCriteria"], "1.1.1 Non-text Content (A)");
        assert_eq!(json["impact"]["blind"], true);
        assert!(json.get("file").is_none());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("aaa".parse::<WcagLevel>(), Ok(WcagLevel::AAA));
        assert!("AAAA".parse::<WcagLevel>().is_err());
    }
}
