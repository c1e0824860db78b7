use crate::model::{CheckResult, Finding, FindingKind, Severity};
use anyhow::Result;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

pub fn print_cli_table(result: &CheckResult, lockfile: &Path) -> Result<()> {
    println!();
    println!("Audited: {}", lockfile.display());
    println!();

    if result.errors().is_empty() && result.warnings().is_empty() {
        println!("No issues found.");
    }

    print_findings("errors", result.errors());
    print_findings("warnings", result.warnings());

    println!();
    print_summary(result);

    Ok(())
}

fn print_findings(label: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    println!("Found {} {}:", findings.len(), label);
    println!();

    let rows: Vec<FindingRow> = findings
        .iter()
        .map(|f| FindingRow {
            severity: format_severity(&f.severity),
            rule: f.kind.as_str().to_string(),
            package: truncate(&f.package, 40),
            detail: truncate(&f.detail, 90),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();
}

fn format_severity(severity: &Severity) -> String {
    match severity {
        Severity::Error => "\x1b[31mERROR\x1b[0m".to_string(),
        Severity::Warning => "\x1b[33mWARNING\x1b[0m".to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn print_summary(result: &CheckResult) {
    println!("Summary:");
    println!(
        "  Suspicious registries: {}",
        result.count_of(FindingKind::SuspiciousRegistry)
    );
    println!(
        "  Missing integrity: {}",
        result.count_of(FindingKind::MissingIntegrity)
    );
    println!(
        "  Duplicate versions: {}",
        result.count_of(FindingKind::DuplicateVersion)
    );
    println!();

    if result.passed() {
        println!("Result: \x1b[32mPASSED\x1b[0m");
    } else {
        println!("Result: \x1b[31mFAILED\x1b[0m");
    }
}
