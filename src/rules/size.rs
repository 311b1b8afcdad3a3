use super::{finding_from_metric, Rule, SeverityPoints};
use crate::analyzers::typescript::types::ANONYMOUS_FUNCTION;
use crate::core::{display_name, metrics_of_kind, Finding, Metric, MetricKind, Result, Severity};

pub const FILE_LENGTH_THRESHOLD: f64 = 300.0;
pub const FILE_LENGTH_HIGH: f64 = 500.0;
pub const FUNCTION_LENGTH_THRESHOLD: f64 = 50.0;
pub const FUNCTION_LENGTH_HIGH: f64 = 100.0;
pub const PARAMETER_THRESHOLD: f64 = 5.0;

/// Flags long files, long functions and wide signatures.
///
/// Size penalties are not scaled by file count: a long file is a problem no
/// matter how many small ones surround it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeRule;

fn banded(value: f64, high: f64) -> Severity {
    if value > high {
        Severity::High
    } else {
        Severity::Medium
    }
}

impl SizeRule {
    fn file_findings(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::FileLength)
            .filter(|m| m.value > FILE_LENGTH_THRESHOLD)
            .map(|m| {
                finding_from_metric(
                    self.id(),
                    banded(m.value, FILE_LENGTH_HIGH),
                    format!(
                        "File '{}' has {} lines (threshold: {})",
                        display_name(&m.file_path),
                        m.value,
                        FILE_LENGTH_THRESHOLD
                    ),
                    "Split the file into smaller modules grouped by responsibility",
                    m,
                )
            })
            .collect()
    }

    fn function_findings(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::FunctionLength)
            .filter(|m| m.value > FUNCTION_LENGTH_THRESHOLD)
            .map(|m| {
                finding_from_metric(
                    self.id(),
                    banded(m.value, FUNCTION_LENGTH_HIGH),
                    format!(
                        "Function '{}' has {} lines (threshold: {})",
                        m.context_or(ANONYMOUS_FUNCTION),
                        m.value,
                        FUNCTION_LENGTH_THRESHOLD
                    ),
                    "Extract cohesive sections of the function into helpers",
                    m,
                )
            })
            .collect()
    }

    fn parameter_findings(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::ParameterCount)
            .filter(|m| m.value > PARAMETER_THRESHOLD)
            .map(|m| {
                finding_from_metric(
                    self.id(),
                    Severity::Medium,
                    format!(
                        "Function '{}' takes {} parameters (threshold: {})",
                        m.context_or(ANONYMOUS_FUNCTION),
                        m.value,
                        PARAMETER_THRESHOLD
                    ),
                    "Group related parameters into an options object",
                    m,
                )
            })
            .collect()
    }
}

impl Rule for SizeRule {
    fn id(&self) -> &'static str {
        "size"
    }

    fn name(&self) -> &'static str {
        "Size"
    }

    fn description(&self) -> &'static str {
        "File length, function length and parameter count"
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        let mut findings = self.file_findings(metrics)?;
        findings.extend(self.function_findings(metrics)?);
        findings.extend(self.parameter_findings(metrics)?);
        Ok(findings)
    }

    fn points(&self) -> SeverityPoints {
        SeverityPoints::new(8.0, 4.0, 2.0)
    }

    fn density_scale(&self) -> Option<f64> {
        None
    }
}
