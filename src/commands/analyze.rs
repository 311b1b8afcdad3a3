//! The `analyze` command and the pipeline behind it.
//!
//! Per-file work (read, parse, extract) is independent and runs on rayon when
//! parallelism is enabled. The results are merged on the calling thread in
//! discovery order, so cross-file detectors see files in the same order on
//! every run.

use crate::analyzers::{analyze_file, Analyzer, FileAnalysis, TypeScriptAnalyzer};
use crate::config::{CategoryWeights, DebtscoreConfig};
use crate::core::{AnalysisReport, Error, Finding, Metric, Result, RunMetadata, ScoreMetadata};
use crate::debt::{DependencyGraph, DuplicationDetector};
use crate::io::{self, read_source, FileWalker, OutputFormat};
use crate::progress::ProgressConfig;
use crate::rules::{Rule, RuleKind, ScoreContext};
use crate::scoring::ScoreAggregator;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{self, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

pub const NO_FILES_NOTE: &str = "No source files found";

/// Inputs of one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub include: Vec<String>,
    pub ignore: Vec<String>,
    pub weights: CategoryWeights,
    /// Rules to evaluate, in report order
    pub rules: Vec<RuleKind>,
    pub parallel: bool,
    pub quiet: bool,
}

impl AnalyzeConfig {
    /// Defaults for `path`, all rules enabled
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(path, &DebtscoreConfig::default())
    }

    pub fn from_config(path: impl Into<PathBuf>, config: &DebtscoreConfig) -> Self {
        Self {
            path: path.into(),
            include: config.scan.include.clone(),
            ignore: config.scan.ignore.clone(),
            weights: config.weights,
            rules: RuleKind::ALL.to_vec(),
            parallel: config.analysis.parallel,
            quiet: true,
        }
    }
}

/// Outcome of the per-file stage
#[derive(Debug)]
enum FileOutcome {
    Analyzed(FileAnalysis),
    /// Discovered, but not a language the analyzer parses
    Unsupported,
    /// Read or parse failure, already formatted as a warning
    Failed(String),
}

/// Recoverable failures (unreadable or unparsable files) become warnings;
/// anything else aborts the run
fn process_file(path: &Path, analyzer: &dyn Analyzer) -> Result<FileOutcome> {
    if !analyzer.is_supported(path) {
        return Ok(FileOutcome::Unsupported);
    }

    match read_source(path).and_then(|source| analyze_file(&source.content, path, analyzer)) {
        Ok(analysis) => Ok(FileOutcome::Analyzed(analysis)),
        Err(e) if e.is_recoverable() => {
            Ok(FileOutcome::Failed(format!("{}: {}", path.display(), e)))
        }
        Err(e) => Err(e),
    }
}

fn process_files(
    files: &[PathBuf],
    parallel: bool,
    analyzer: &dyn Analyzer,
    bar: &ProgressBar,
) -> Result<Vec<FileOutcome>> {
    let run = |path: &PathBuf| process_file(path, analyzer);

    if parallel {
        files.par_iter().progress_with(bar.clone()).map(run).collect()
    } else {
        files.iter().progress_with(bar.clone()).map(run).collect()
    }
}

/// Run the whole pipeline over `config.path`
pub fn analyze_project(config: &AnalyzeConfig) -> Result<AnalysisReport> {
    let span = info_span!("analyze_project", root = %config.path.display());
    let _guard = span.enter();
    let start = Instant::now();

    // Graph keys and resolved imports must agree whatever form the root took
    let root = path::absolute(&config.path).map_err(|e| {
        Error::file_system("Failed to resolve analysis root", config.path.clone(), e)
    })?;

    let files = FileWalker::new(root.clone())
        .with_include_patterns(config.include.clone())
        .with_ignore_patterns(config.ignore.clone())
        .walk()?;
    info!(files = files.len(), parallel = config.parallel, "discovered files");

    let bar = ProgressConfig::from_env(config.quiet).file_bar(files.len() as u64);
    let outcomes = process_files(&files, config.parallel, &TypeScriptAnalyzer::new(), &bar);
    bar.finish_and_clear();
    let outcomes = outcomes?;

    let mut metrics: Vec<Metric> = Vec::new();
    let mut warnings = Vec::new();
    let mut files_parsed = 0;
    let mut detector = DuplicationDetector::new();
    let mut graph = DependencyGraph::new();

    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            FileOutcome::Analyzed(analysis) => {
                files_parsed += 1;
                metrics.extend(analysis.metrics);
                detector.add_blocks(analysis.code_blocks);
                graph.add_node(analysis.path, analysis.imports);
            }
            FileOutcome::Unsupported => debug!(file = %path.display(), "unsupported file"),
            FileOutcome::Failed(warning) => {
                warn!("skipping {}", warning);
                warnings.push(warning);
            }
        }
    }

    metrics.extend(detector.detect_duplicates()?);
    metrics.extend(graph.detect_circular_dependencies()?);

    let context = ScoreContext {
        total_files: files.len(),
    };
    let mut findings: Vec<Finding> = Vec::new();
    let mut rule_scores = Vec::with_capacity(config.rules.len());
    for kind in &config.rules {
        let rule_findings = kind.evaluate(&metrics)?;
        let score = kind.calculate_score(&rule_findings, Some(context));
        debug!(rule = kind.id(), findings = rule_findings.len(), score, "evaluated rule");
        rule_scores.push((*kind, score));
        findings.extend(rule_findings);
    }

    let score = ScoreAggregator::new(config.weights).aggregate(
        &rule_scores,
        ScoreMetadata {
            files_analyzed: files.len(),
            total_metrics: metrics.len(),
            total_findings: findings.len(),
        },
    )?;

    let mut notes = Vec::new();
    if files.is_empty() {
        notes.push(NO_FILES_NOTE.to_string());
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    info!(
        overall = score.overall,
        findings = findings.len(),
        elapsed_ms,
        "analysis complete"
    );

    Ok(AnalysisReport {
        root,
        score,
        findings,
        metadata: RunMetadata {
            files_analyzed: files.len(),
            files_parsed,
            elapsed_ms,
            timestamp: Utc::now(),
            warnings,
            notes,
        },
    })
}

/// Where and how the report is written
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn write_report(report: &AnalysisReport, options: &OutputOptions) -> anyhow::Result<()> {
    let sink: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = io::create_writer(options.format, sink);
    writer.write_report(report)
}

/// Analyze and write the report; returns the report for exit-code decisions
pub fn handle_analyze(config: AnalyzeConfig, options: OutputOptions) -> anyhow::Result<AnalysisReport> {
    let report = analyze_project(&config)
        .with_context(|| format!("Failed to analyze {}", config.path.display()))?;
    write_report(&report, &options)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_file;
    use crate::core::ast::TypeScriptAst;
    use std::fs;
    use tempfile::TempDir;

    /// Parses normally, then fails with an error that is not per-file
    struct InvalidMetricAnalyzer;

    impl Analyzer for InvalidMetricAnalyzer {
        fn is_supported(&self, _path: &Path) -> bool {
            true
        }

        fn parse(&self, content: &str, path: &Path) -> Result<TypeScriptAst> {
            parse_file(content, path)
        }

        fn analyze(&self, _ast: &TypeScriptAst) -> Result<FileAnalysis> {
            Err(Error::Validation("metric value must be finite".to_string()))
        }
    }

    #[test]
    fn test_process_file_recoverable_failure_is_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ts");
        fs::write(&path, "function (\n").unwrap();

        let outcome = process_file(&path, &TypeScriptAnalyzer::new()).unwrap();
        match outcome {
            FileOutcome::Failed(warning) => assert!(warning.contains("bad.ts")),
            other => panic!("expected a warning, got {other:?}"),
        }

        let missing = temp.path().join("missing.ts");
        let outcome = process_file(&missing, &TypeScriptAnalyzer::new()).unwrap();
        assert!(matches!(outcome, FileOutcome::Failed(_)));
    }

    #[test]
    fn test_process_file_fatal_error_aborts() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.ts");
        fs::write(&path, "export const a = 1;\n").unwrap();

        let result = process_file(&path, &InvalidMetricAnalyzer);
        assert!(matches!(result, Err(Error::Validation(_))));

        let files = vec![path];
        let result = process_files(&files, true, &InvalidMetricAnalyzer, &ProgressBar::hidden());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_directory_produces_valid_score() {
        let temp = TempDir::new().unwrap();
        let report = analyze_project(&AnalyzeConfig::new(temp.path())).unwrap();

        assert_eq!(report.score.overall, 100.0);
        assert_eq!(report.metadata.files_analyzed, 0);
        assert_eq!(report.metadata.notes, vec![NO_FILES_NOTE.to_string()]);
    }

    #[test]
    fn test_unsupported_files_are_counted_not_parsed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.ts"), "export const a = 1;\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "plain text").unwrap();

        let mut config = AnalyzeConfig::new(temp.path());
        config.include.push("**/*.txt".to_string());
        let report = analyze_project(&config).unwrap();

        assert_eq!(report.metadata.files_analyzed, 2);
        assert_eq!(report.metadata.files_parsed, 1);
        assert!(report.metadata.warnings.is_empty());
    }

    #[test]
    fn test_parse_failure_becomes_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.ts"), "export const a = 1;\n").unwrap();
        fs::write(temp.path().join("bad.ts"), "function (\n").unwrap();

        let report = analyze_project(&AnalyzeConfig::new(temp.path())).unwrap();

        assert_eq!(report.metadata.files_parsed, 1);
        assert_eq!(report.metadata.warnings.len(), 1);
        assert!(report.metadata.warnings[0].contains("bad.ts"));
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let temp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(
                temp.path().join(format!("{}.ts", name)),
                format!("export function {}(x: any) {{ if (x) {{ return 1; }} return 2; }}\n", name),
            )
            .unwrap();
        }

        let mut config = AnalyzeConfig::new(temp.path());
        config.parallel = true;
        let parallel = analyze_project(&config).unwrap();
        config.parallel = false;
        let sequential = analyze_project(&config).unwrap();

        assert_eq!(parallel.findings, sequential.findings);
        assert_eq!(parallel.score.overall, sequential.score.overall);
    }

    #[test]
    fn test_subset_of_rules() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.ts"), "export const a = 1;\n").unwrap();

        let mut config = AnalyzeConfig::new(temp.path());
        config.rules = vec![RuleKind::Complexity];
        let report = analyze_project(&config).unwrap();

        assert_eq!(report.score.categories.len(), 1);
        assert_eq!(report.score.categories[0].weight, 1.0);
    }

    #[test]
    fn test_write_report_to_file() {
        let temp = TempDir::new().unwrap();
        let report = analyze_project(&AnalyzeConfig::new(temp.path())).unwrap();
        let out = temp.path().join("report.json");

        write_report(
            &report,
            &OutputOptions {
                format: OutputFormat::Json,
                output: Some(out.clone()),
            },
        )
        .unwrap();

        let parsed: AnalysisReport = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(parsed.score.overall, 100.0);
    }
}
