use super::{finding_from_metric, Rule, SeverityPoints};
use crate::analyzers::typescript::types::ANONYMOUS_FUNCTION;
use crate::core::{metrics_of_kind, Finding, Metric, MetricKind, Result, Severity};

pub const CYCLOMATIC_THRESHOLD: f64 = 10.0;
pub const CYCLOMATIC_HIGH: f64 = 20.0;
pub const NESTING_THRESHOLD: f64 = 4.0;
pub const NESTING_HIGH: f64 = 6.0;

/// Flags functions that branch or nest too much
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityRule;

impl ComplexityRule {
    fn cyclomatic_findings(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::CyclomaticComplexity)
            .filter(|m| m.value > CYCLOMATIC_THRESHOLD)
            .map(|m| {
                let severity = if m.value > CYCLOMATIC_HIGH {
                    Severity::High
                } else {
                    Severity::Medium
                };
                finding_from_metric(
                    self.id(),
                    severity,
                    format!(
                        "Function '{}' has cyclomatic complexity of {} (threshold: {})",
                        m.context_or(ANONYMOUS_FUNCTION),
                        m.value,
                        CYCLOMATIC_THRESHOLD
                    ),
                    "Split the function into smaller functions with a single responsibility",
                    m,
                )
            })
            .collect()
    }

    fn nesting_findings(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        metrics_of_kind(metrics, MetricKind::NestingDepth)
            .filter(|m| m.value > NESTING_THRESHOLD)
            .map(|m| {
                let severity = if m.value > NESTING_HIGH {
                    Severity::High
                } else {
                    Severity::Medium
                };
                finding_from_metric(
                    self.id(),
                    severity,
                    format!(
                        "Function '{}' has nesting depth of {} (threshold: {})",
                        m.context_or(ANONYMOUS_FUNCTION),
                        m.value,
                        NESTING_THRESHOLD
                    ),
                    "Use early returns or extract nested blocks into helper functions",
                    m,
                )
            })
            .collect()
    }
}

impl Rule for ComplexityRule {
    fn id(&self) -> &'static str {
        "complexity"
    }

    fn name(&self) -> &'static str {
        "Complexity"
    }

    fn description(&self) -> &'static str {
        "Cyclomatic complexity and nesting depth of functions"
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        let mut findings = self.cyclomatic_findings(metrics)?;
        findings.extend(self.nesting_findings(metrics)?);
        Ok(findings)
    }

    fn points(&self) -> SeverityPoints {
        SeverityPoints::new(10.0, 5.0, 2.0)
    }

    fn density_scale(&self) -> Option<f64> {
        Some(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLocation;
    use crate::rules::ScoreContext;

    fn metric(kind: MetricKind, value: f64) -> Metric {
        Metric::new(kind, value, "src/a.ts")
            .unwrap()
            .with_location(SourceLocation::lines(3, 40))
            .with_context("handle")
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let metrics = vec![
            metric(MetricKind::CyclomaticComplexity, 10.0),
            metric(MetricKind::NestingDepth, 4.0),
        ];
        assert!(ComplexityRule.evaluate(&metrics).unwrap().is_empty());
    }

    #[test]
    fn test_severity_bands() {
        let metrics = vec![
            metric(MetricKind::CyclomaticComplexity, 11.0),
            metric(MetricKind::CyclomaticComplexity, 21.0),
            metric(MetricKind::NestingDepth, 5.0),
            metric(MetricKind::NestingDepth, 7.0),
        ];
        let severities: Vec<Severity> = ComplexityRule
            .evaluate(&metrics)
            .unwrap()
            .iter()
            .map(|f| f.severity)
            .collect();

        assert_eq!(
            severities,
            vec![Severity::Medium, Severity::High, Severity::Medium, Severity::High]
        );
    }

    #[test]
    fn test_finding_carries_metric_details() {
        let findings = ComplexityRule
            .evaluate(&[metric(MetricKind::CyclomaticComplexity, 12.0)])
            .unwrap();

        assert_eq!(findings[0].rule_id, "complexity");
        assert_eq!(
            findings[0].message,
            "Function 'handle' has cyclomatic complexity of 12 (threshold: 10)"
        );
        assert_eq!(findings[0].line(), Some(3));
        assert!(findings[0].suggestion.is_some());
    }

    #[test]
    fn test_ignores_other_metrics() {
        let metrics = vec![metric(MetricKind::FunctionLength, 500.0)];
        assert!(ComplexityRule.evaluate(&metrics).unwrap().is_empty());
    }

    #[test]
    fn test_score_uses_density() {
        let findings = ComplexityRule
            .evaluate(&[metric(MetricKind::CyclomaticComplexity, 11.0)])
            .unwrap();
        // 5 points over 2 files, x10
        let score = ComplexityRule.calculate_score(&findings, Some(ScoreContext { total_files: 2 }));
        assert_eq!(score, 75.0);
    }
}
