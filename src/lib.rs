// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod debt;
pub mod io;
pub mod progress;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, CategoryScore, Error, Finding, Metric, MetricKind, Result, RunMetadata, Score,
    ScoreMetadata, Severity, SourceLocation,
};

pub use crate::analyzers::{analyze_file, Analyzer, FileAnalysis, TypeScriptAnalyzer};

pub use crate::debt::{DependencyGraph, DuplicationDetector};

pub use crate::rules::{Rule, RuleKind, ScoreContext};

pub use crate::scoring::{normalize_weights, ScoreAggregator};

pub use crate::config::{CategoryWeights, DebtscoreConfig};

pub use crate::commands::analyze::{analyze_project, AnalyzeConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
