use super::{finding_from_metric, Rule, SeverityPoints};
use crate::analyzers::typescript::types::ANONYMOUS_FUNCTION;
use crate::core::{metrics_of_kind, Finding, Metric, MetricKind, Result, Severity};

pub const ANY_HIGH: f64 = 5.0;

/// Flags `any` in function signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeSafetyRule;

impl Rule for TypeSafetyRule {
    fn id(&self) -> &'static str {
        "type-safety"
    }

    fn name(&self) -> &'static str {
        "Type Safety"
    }

    fn description(&self) -> &'static str {
        "Use of the any type in parameter and return annotations"
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::AnyUsage)
            .filter(|m| m.value > 0.0)
            .map(|m| {
                let severity = if m.value > ANY_HIGH {
                    Severity::High
                } else {
                    Severity::Medium
                };
                finding_from_metric(
                    self.id(),
                    severity,
                    format!(
                        "Function '{}' uses 'any' {} time(s) in its signature",
                        m.context_or(ANONYMOUS_FUNCTION),
                        m.value
                    ),
                    "Replace 'any' with a specific type, a generic, or 'unknown'",
                    m,
                )
            })
            .collect()
    }

    fn points(&self) -> SeverityPoints {
        SeverityPoints::new(10.0, 5.0, 2.0)
    }

    fn density_scale(&self) -> Option<f64> {
        Some(1.0)
    }
}
