use super::{finding_from_metric, Rule, SeverityPoints};
use crate::core::{metrics_of_kind, Finding, Metric, MetricKind, Result, Severity};
use crate::debt::duplication::UNNAMED_BLOCK;

pub const DUPLICATES_HIGH: f64 = 5.0;
pub const DUPLICATES_MEDIUM: f64 = 2.0;

/// Flags functions with near-identical copies elsewhere in the run
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicationRule;

impl Rule for DuplicationRule {
    fn id(&self) -> &'static str {
        "duplication"
    }

    fn name(&self) -> &'static str {
        "Duplication"
    }

    fn description(&self) -> &'static str {
        "Near-duplicate functions across the analyzed files"
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::CodeDuplication)
            .filter(|m| m.value > 0.0)
            .map(|m| {
                let severity = if m.value > DUPLICATES_HIGH {
                    Severity::High
                } else if m.value > DUPLICATES_MEDIUM {
                    Severity::Medium
                } else {
                    Severity::Low
                };
                finding_from_metric(
                    self.id(),
                    severity,
                    format!(
                        "'{}' has {} near-duplicate copy(ies)",
                        m.context_or(UNNAMED_BLOCK),
                        m.value
                    ),
                    "Extract the shared logic into a single reusable function",
                    m,
                )
            })
            .collect()
    }

    fn points(&self) -> SeverityPoints {
        SeverityPoints::new(15.0, 8.0, 4.0)
    }

    fn density_scale(&self) -> Option<f64> {
        Some(8.0)
    }
}
