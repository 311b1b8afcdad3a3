//! Debt rules.
//!
//! A rule turns the metrics of a run into findings and converts its own
//! findings into a 0-100 category score. Scores use a density-based penalty:
//! the summed severity points are divided by the number of files analyzed and
//! multiplied by a rule-specific scale, so a large project is not punished for
//! its size alone.

pub mod circular;
pub mod complexity;
pub mod duplication;
pub mod size;
pub mod type_safety;

use crate::core::{Finding, Metric, Result, Severity};
use crate::scoring::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use circular::CircularDependencyRule;
pub use complexity::ComplexityRule;
pub use duplication::DuplicationRule;
pub use size::SizeRule;
pub use type_safety::TypeSafetyRule;

/// Score of a rule with no findings
pub const PERFECT_SCORE: f64 = 100.0;

/// Run-wide information a rule may use when scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreContext {
    pub total_files: usize,
}

/// Penalty points per finding severity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityPoints {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl SeverityPoints {
    pub const fn new(high: f64, medium: f64, low: f64) -> Self {
        Self { high, medium, low }
    }

    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Findings for every metric of interest past its threshold
    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>>;

    fn points(&self) -> SeverityPoints;

    /// Multiplier applied to the per-file penalty; `None` keeps the raw sum
    fn density_scale(&self) -> Option<f64>;

    fn calculate_score(&self, findings: &[Finding], context: Option<ScoreContext>) -> f64 {
        density_score(findings, self.points(), self.density_scale(), context)
    }
}

/// `100 - penalty`, clamped at zero and rounded to two decimals
pub fn density_score(
    findings: &[Finding],
    points: SeverityPoints,
    scale: Option<f64>,
    context: Option<ScoreContext>,
) -> f64 {
    if findings.is_empty() {
        return PERFECT_SCORE;
    }

    let raw: f64 = findings
        .iter()
        .map(|finding| points.for_severity(finding.severity))
        .sum();

    let penalty = match (scale, context) {
        (Some(scale), Some(ctx)) if ctx.total_files > 0 => raw / ctx.total_files as f64 * scale,
        _ => raw,
    };

    round2((PERFECT_SCORE - penalty).max(0.0))
}

/// Finding built from the metric that triggered it
pub(crate) fn finding_from_metric(
    rule_id: &str,
    severity: Severity,
    message: String,
    suggestion: &str,
    metric: &Metric,
) -> Result<Finding> {
    Ok(
        Finding::new(rule_id, severity, message, metric.file_path.clone())?
            .with_location(metric.location)
            .with_suggestion(suggestion),
    )
}

/// The closed set of rules, dispatched statically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Complexity,
    Size,
    TypeSafety,
    Duplication,
    CircularDependency,
}

impl RuleKind {
    pub const ALL: [RuleKind; 5] = [
        RuleKind::Complexity,
        RuleKind::Size,
        RuleKind::TypeSafety,
        RuleKind::Duplication,
        RuleKind::CircularDependency,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

macro_rules! dispatch {
    ($self:expr, $rule:ident => $body:expr) => {
        match $self {
            RuleKind::Complexity => {
                let $rule = ComplexityRule;
                $body
            }
            RuleKind::Size => {
                let $rule = SizeRule;
                $body
            }
            RuleKind::TypeSafety => {
                let $rule = TypeSafetyRule;
                $body
            }
            RuleKind::Duplication => {
                let $rule = DuplicationRule;
                $body
            }
            RuleKind::CircularDependency => {
                let $rule = CircularDependencyRule;
                $body
            }
        }
    };
}

impl Rule for RuleKind {
    fn id(&self) -> &'static str {
        dispatch!(self, rule => rule.id())
    }

    fn name(&self) -> &'static str {
        dispatch!(self, rule => rule.name())
    }

    fn description(&self) -> &'static str {
        dispatch!(self, rule => rule.description())
    }

    fn evaluate(&self, metrics: &[Metric]) -> Result<Vec<Finding>> {
        dispatch!(self, rule => rule.evaluate(metrics))
    }

    fn points(&self) -> SeverityPoints {
        dispatch!(self, rule => rule.points())
    }

    fn density_scale(&self) -> Option<f64> {
        dispatch!(self, rule => rule.density_scale())
    }
}
