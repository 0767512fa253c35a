use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

use super::TestCaseRecord;
use crate::cli::OutputFormat;
use crate::discovery::{TestMethodDescriptor, WarningList};
use crate::settings::TestIdGenerationStrategy;

/// Discovery outcome for one assembly.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub assembly: String,
    /// `false` when the assembly was skipped before enumeration.
    pub enumerated: bool,
    pub tests: Vec<TestCaseRecord>,
    #[serde(skip_serializing_if = "WarningList::is_empty")]
    pub warnings: WarningList,
}

impl DiscoveryReport {
    pub fn new(
        assembly: impl Into<String>,
        descriptors: Option<&[TestMethodDescriptor]>,
        warnings: WarningList,
        strategy: TestIdGenerationStrategy,
    ) -> Self {
        let tests = descriptors
            .unwrap_or_default()
            .iter()
            .map(|d| TestCaseRecord::from_descriptor(d, strategy))
            .collect();
        Self {
            assembly: assembly.into(),
            enumerated: descriptors.is_some(),
            tests,
            warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscoveryOutput {
    pub assemblies_scanned: usize,
    pub total_tests: usize,
    pub total_warnings: usize,
    pub assemblies: Vec<DiscoveryReport>,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(reports: Vec<DiscoveryReport>, format: OutputFormat) -> Result<String> {
        let output = Self::build_output(reports);

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => Ok(Self::render_text(&output)),
        }
    }

    pub fn build_output(assemblies: Vec<DiscoveryReport>) -> DiscoveryOutput {
        DiscoveryOutput {
            assemblies_scanned: assemblies.len(),
            total_tests: assemblies.iter().map(|r| r.tests.len()).sum(),
            total_warnings: assemblies.iter().map(|r| r.warnings.len()).sum(),
            assemblies,
        }
    }

    fn render_text(output: &DiscoveryOutput) -> String {
        let mut text = String::new();
        for report in &output.assemblies {
            let _ = writeln!(text, "{}", report.assembly);
            if !report.enumerated {
                let _ = writeln!(text, "  (skipped)");
            }
            for test in &report.tests {
                let marker = if test.ignored { " [ignored]" } else { "" };
                let _ = writeln!(text, "  {}{marker}", test.id);
                if test.display_name != test.managed_method {
                    let _ = writeln!(text, "    display name: {}", test.display_name);
                }
                if !test.categories.is_empty() {
                    let _ = writeln!(text, "    categories: {}", test.categories.join(", "));
                }
            }
            for warning in report.warnings.iter() {
                let _ = writeln!(text, "  warning: {warning}");
            }
        }
        let _ = writeln!(
            text,
            "{} test(s) in {} assembly(ies), {} warning(s)",
            output.total_tests, output.assemblies_scanned, output.total_warnings
        );
        text
    }
}
