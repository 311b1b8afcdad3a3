use super::{finding_from_metric, Rule, SeverityPoints};
use crate::core::{metrics_of_kind, Finding, Metric, MetricKind, Result, Severity};

/// Flags import cycles between local modules
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularDependencyRule;

impl Rule for CircularDependencyRule {
    fn id(&self) -> &'static str {
        "circular-dependency"
    }

    fn name(&self) -> &'static str {
        "Circular Dependencies"
    }

    fn description(&self) -> &'static str {
        "Import cycles between local modules"
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::CircularDependency)
            .filter(|m| m.value > 0.0)
            .map(|m| {
                let severity = match m.value {
                    v if v >= 4.0 => Severity::High,
                    v if v >= 3.0 => Severity::Medium,
                    _ => Severity::Low,
                };
                let chain = m
                    .context
                    .as_deref()
                    .map(|chain| format!(": {}", chain))
                    .unwrap_or_default();
                finding_from_metric(
                    self.id(),
                    severity,
                    format!("Circular dependency between {} files{}", m.value, chain),
                    "Move the shared code into a separate module or invert one of the imports",
                    m,
                )
            })
            .collect()
    }

    fn points(&self) -> SeverityPoints {
        SeverityPoints::new(20.0, 12.0, 6.0)
    }

    fn density_scale(&self) -> Option<f64> {
        Some(10.0)
    }
}
