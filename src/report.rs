// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for audit findings.
//!
//! Supports multiple output formats:
//! - Text: human-readable findings with WCAG criterion references
//! - JSON: summary plus findings for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::findings::{FindingSet, Severity, WcagLevel};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Finding counts per conformance level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "AA")]
    pub aa: usize,
    #[serde(rename = "AAA")]
    pub aaa: usize,
}

/// Headline numbers for an audit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Info and suggestion findings
    pub notices: usize,
    pub by_level: LevelCounts,
    /// No error-severity findings
    pub passes: bool,
}

impl AuditSummary {
    pub fn of(findings: &FindingSet) -> Self {
        let errors = findings.errors().len();
        let warnings = findings.warnings().len();
        Self {
            total: findings.len(),
            errors,
            warnings,
            notices: findings.len() - errors - warnings,
            by_level: LevelCounts {
                a: findings.by_wcag_level(WcagLevel::A).len(),
                aa: findings.by_wcag_level(WcagLevel::AA).len(),
                aaa: findings.by_wcag_level(WcagLevel::AAA).len(),
            },
            passes: !findings.blocks_release(),
        }
    }
}

/// Summary and findings together, the shape of the JSON report
#[derive(Debug, Serialize)]
pub struct AuditReport<'a> {
    pub summary: AuditSummary,
    pub findings: &'a [crate::findings::Finding],
}

impl<'a> AuditReport<'a> {
    pub fn new(findings: &'a FindingSet) -> Self {
        Self { summary: AuditSummary::of(findings), findings: &findings.findings }
    }
}

/// Generate a report from findings
pub fn generate_report(findings: &FindingSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(findings),
        OutputFormat::Json => generate_json_report(findings),
        OutputFormat::Sarif => generate_sarif_report(findings),
    }
}

fn generate_text_report(findings: &FindingSet) -> String {
    let mut output = String::new();

    output.push_str("=== WCAG Audit Report ===\n\n");

    if findings.is_empty() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    let summary = AuditSummary::of(findings);
    output.push_str(&format!(
        "Found {} issue(s): {} error(s), {} warning(s), {} info/suggestion(s)\n",
        summary.total, summary.errors, summary.warnings, summary.notices
    ));
    output.push_str(&format!(
        "By level: A {}, AA {}, AAA {}\n\n",
        summary.by_level.a, summary.by_level.aa, summary.by_level.aaa
    ));

    for severity in &[Severity::Error, Severity::Warning, Severity::Info, Severity::Suggestion] {
        let sev_findings = findings.by_severity(*severity);
        if sev_findings.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, sev_findings.len()));

        for finding in sev_findings {
            output.push_str(&format!("[{}] {}\n", finding.rule_id, finding.message));

            if finding.file.is_some() || finding.line.is_some() {
                output.push_str(&format!("  Location: {}\n", finding.location_string()));
            }

            if let Some(criterion) = finding.wcag_criteria {
                output.push_str(&format!("  WCAG: {}\n", criterion));
            }

            if let Some(ref suggestion) = finding.suggestion {
                output.push_str(&format!("  Fix: {}\n", suggestion));
            }

            if let Some(ref impact) = finding.impact {
                let groups = impact.affected_groups();
                if !groups.is_empty() {
                    output.push_str(&format!("  Affects: {}\n", groups.join(", ")));
                }
            }

            output.push('\n');
        }
    }

    if summary.passes {
        if summary.warnings > 0 {
            output.push_str("RESULT: PASS WITH WARNINGS\n");
        } else {
            output.push_str("RESULT: PASS\n");
        }
    } else {
        output.push_str("RESULT: FAIL (errors found)\n");
    }

    output
}

fn generate_json_report(findings: &FindingSet) -> String {
    serde_json::to_string_pretty(&AuditReport::new(findings))
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize findings: {}\"}}", e))
}

#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<SarifProperties>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

#[derive(Debug, Serialize)]
struct SarifProperties {
    #[serde(rename = "wcagCriterion")]
    wcag_criterion: String,
    #[serde(rename = "wcagLevel")]
    wcag_level: WcagLevel,
}

fn generate_sarif_report(findings: &FindingSet) -> String {
    let results: Vec<SarifResult> = findings
        .findings
        .iter()
        .map(|f| {
            let level = match f.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info | Severity::Suggestion => "note",
            };

            let locations = f
                .file
                .as_ref()
                .map(|file| SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation { uri: file.display().to_string() },
                        region: f.line.map(|l| SarifRegion { start_line: l }),
                    },
                })
                .into_iter()
                .collect();

            SarifResult {
                rule_id: f.rule_id.clone(),
                level: level.to_string(),
                message: SarifMessage { text: f.message.clone() },
                locations,
                properties: f.wcag_criteria.map(|c| SarifProperties {
                    wcag_criterion: c.number.to_string(),
                    wcag_level: c.level,
                }),
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "wcag-auditor".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://www.w3.org/TR/WCAG21/".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e))
}
