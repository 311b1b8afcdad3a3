//! Core data model shared by the extractors, rules and the aggregator.

pub mod ast;
pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use errors::{Error, Result};

/// Kind of measurement a [`Metric`] carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    CyclomaticComplexity,
    NestingDepth,
    FileLength,
    FunctionLength,
    ParameterCount,
    AnyUsage,
    TodoComments,
    FixmeComments,
    CodeDuplication,
    CircularDependency,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CyclomaticComplexity => "cyclomatic-complexity",
            Self::NestingDepth => "nesting-depth",
            Self::FileLength => "file-length",
            Self::FunctionLength => "function-length",
            Self::ParameterCount => "parameter-count",
            Self::AnyUsage => "any-usage",
            Self::TodoComments => "todo-comments",
            Self::FixmeComments => "fixme-comments",
            Self::CodeDuplication => "code-duplication",
            Self::CircularDependency => "circular-dependency",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Span in source code (1-based lines and columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl SourceLocation {
    pub fn new(start_line: usize, end_line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    /// Location covering a tree-sitter node
    pub fn from_node(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self::new(start.row + 1, end.row + 1, start.column + 1, end.column + 1)
    }

    /// Location covering whole lines
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self::new(start_line, end_line, 1, 1)
    }
}

/// A single numeric measurement tied to a file and optionally a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: MetricKind,
    pub value: f64,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Metric {
    pub fn new(name: MetricKind, value: f64, file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        if file_path.as_os_str().is_empty() {
            return Err(Error::MissingField("filePath"));
        }
        if !value.is_finite() {
            return Err(Error::Validation(format!(
                "{} value must be finite, got {}",
                name, value
            )));
        }
        Ok(Self {
            name,
            value,
            file_path,
            location: None,
            context: None,
        })
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Context label, or `fallback` when the metric has none
    pub fn context_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.context.as_deref().unwrap_or(fallback)
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// A human-facing issue produced by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let rule_id = rule_id.into();
        let message = message.into();
        let file_path = file_path.into();

        if rule_id.trim().is_empty() {
            return Err(Error::MissingField("ruleId"));
        }
        if message.trim().is_empty() {
            return Err(Error::MissingField("message"));
        }
        if file_path.as_os_str().is_empty() {
            return Err(Error::MissingField("filePath"));
        }

        Ok(Self {
            rule_id,
            severity,
            message,
            file_path,
            location: None,
            suggestion: None,
        })
    }

    /// Carry over an optional location from the originating metric
    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn line(&self) -> Option<usize> {
        self.location.map(|loc| loc.start_line)
    }
}

/// Score of one rule category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreMetadata {
    pub files_analyzed: usize,
    pub total_metrics: usize,
    pub total_findings: usize,
}

/// Overall debt score of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub overall: f64,
    pub categories: Vec<CategoryScore>,
    pub timestamp: DateTime<Utc>,
    pub metadata: ScoreMetadata,
}

impl Score {
    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Bookkeeping of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Files discovered, supported or not
    pub files_analyzed: usize,
    /// Files read and parsed successfully
    pub files_parsed: usize,
    pub elapsed_ms: u64,
    pub timestamp: DateTime<Utc>,
    /// Files skipped because they could not be read or parsed
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub root: PathBuf,
    pub score: Score,
    pub findings: Vec<Finding>,
    pub metadata: RunMetadata,
}

impl AnalysisReport {
    pub fn findings_for(&self, rule_id: &str) -> impl Iterator<Item = &Finding> {
        let rule_id = rule_id.to_string();
        self.findings.iter().filter(move |f| f.rule_id == rule_id)
    }
}

/// Metrics of one kind
pub fn metrics_of_kind(metrics: &[Metric], kind: MetricKind) -> impl Iterator<Item = &Metric> {
    metrics.iter().filter(move |m| m.name == kind)
}

/// File name for display, falling back to the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
