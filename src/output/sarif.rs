//! SARIF (Static Analysis Results Interchange Format) output for code scanning.
//!
//! With `--format sarif` each finding becomes a result located at the
//! lockfile, so CI systems can annotate it directly.

use crate::model::{CheckResult, FindingKind};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// SARIF v2.1.0 schema root
#[derive(Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
struct SarifRule {
    id: &'static str,
    name: &'static str,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: SarifRuleConfiguration,
}

#[derive(Serialize)]
struct SarifRuleConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: &'static str,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

fn rule_description(kind: FindingKind) -> &'static str {
    match kind {
        FindingKind::SuspiciousRegistry => "Package resolves from a registry outside the allowlist",
        FindingKind::MissingIntegrity => "Package has no integrity digest",
        FindingKind::DuplicateVersion => "Package name resolves to more than one version",
    }
}

/// Generate and print SARIF output
pub fn print_sarif(result: &CheckResult, lockfile: &Path) -> Result<()> {
    println!("{}", generate_sarif_string(result, lockfile)?);
    Ok(())
}

/// Generate SARIF as a string (for file output)
pub fn generate_sarif_string(result: &CheckResult, lockfile: &Path) -> Result<String> {
    let rules = FindingKind::all()
        .into_iter()
        .map(|kind| SarifRule {
            id: kind.as_str(),
            name: kind.display_name(),
            short_description: SarifMessage {
                text: rule_description(kind).to_string(),
            },
            default_configuration: SarifRuleConfiguration { level: "warning" },
        })
        .collect();

    let uri = lockfile.display().to_string();
    let results = result
        .findings()
        .map(|finding| SarifResult {
            rule_id: finding.kind.as_str(),
            // SARIF levels share the severity names.
            level: finding.severity.as_str(),
            message: SarifMessage {
                text: finding.detail.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: uri.clone() },
                },
            }],
        })
        .collect();

    let report = SarifReport {
        schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
        version: "2.1.0",
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "lockaudit",
                    version: env!("CARGO_PKG_VERSION"),
                    rules,
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
