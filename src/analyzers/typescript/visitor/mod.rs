//! AST visitor for TypeScript/JavaScript
//!
//! Traverses the tree-sitter AST and turns file-level and per-function
//! measurements into [`Metric`]s.

pub mod comments;
pub mod function_analysis;
pub mod helpers;

use crate::core::ast::TypeScriptAst;
use crate::core::{Metric, MetricKind, Result, SourceLocation};

use super::types::JsFunctionMetrics;
use comments::count_markers;
use function_analysis::extract_functions;

/// Result of analyzing a TypeScript/JavaScript AST
pub struct AnalysisResult {
    /// Metrics ready for rule evaluation
    pub metrics: Vec<Metric>,
    /// Per-function measurements the metrics were built from
    pub functions: Vec<JsFunctionMetrics>,
}

/// Analyze a TypeScript/JavaScript AST
pub fn analyze_ast(ast: &TypeScriptAst) -> Result<AnalysisResult> {
    let functions = extract_functions(ast);

    let mut metrics = file_metrics(ast)?;
    for function in &functions {
        metrics.extend(function_metrics(function)?);
    }

    Ok(AnalysisResult { metrics, functions })
}

fn file_metrics(ast: &TypeScriptAst) -> Result<Vec<Metric>> {
    let total_lines = ast.source.lines().count();
    let mut metrics = vec![Metric::new(
        MetricKind::FileLength,
        total_lines as f64,
        &ast.path,
    )?
    .with_location(SourceLocation::lines(1, total_lines.max(1)))];

    let markers = count_markers(ast);
    for (kind, count, label) in [
        (MetricKind::TodoComments, markers.todo, "TODO"),
        (MetricKind::FixmeComments, markers.fixme, "FIXME"),
    ] {
        if count > 0 {
            metrics.push(
                Metric::new(kind, count as f64, &ast.path)?
                    .with_location(SourceLocation::lines(1, 1))
                    .with_context(label),
            );
        }
    }

    Ok(metrics)
}

fn function_metrics(function: &JsFunctionMetrics) -> Result<Vec<Metric>> {
    let context = function.context_label();
    let measure = |kind: MetricKind, value: f64| -> Result<Metric> {
        Ok(Metric::new(kind, value, &function.file)?
            .with_location(function.location)
            .with_context(context))
    };

    let mut metrics = vec![measure(MetricKind::FunctionLength, function.length as f64)?];
    if function.parameter_count > 0 {
        metrics.push(measure(
            MetricKind::ParameterCount,
            f64::from(function.parameter_count),
        )?);
    }
    metrics.push(measure(
        MetricKind::CyclomaticComplexity,
        f64::from(function.cyclomatic),
    )?);
    if function.nesting > 0 {
        metrics.push(measure(MetricKind::NestingDepth, f64::from(function.nesting))?);
    }
    if function.any_count > 0 {
        metrics.push(measure(MetricKind::AnyUsage, f64::from(function.any_count))?);
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_file;
    use crate::core::metrics_of_kind;
    use indoc::indoc;
    use std::path::Path;

    fn analyze(source: &str, file: &str) -> Vec<Metric> {
        let ast = parse_file(source, Path::new(file)).unwrap();
        analyze_ast(&ast).unwrap().metrics
    }

    fn values(metrics: &[Metric], kind: MetricKind) -> Vec<f64> {
        metrics_of_kind(metrics, kind).map(|m| m.value).collect()
    }

    #[test]
    fn test_simple_function_metrics() {
        let metrics = analyze("function foo() { return 1; }", "a.js");

        assert_eq!(values(&metrics, MetricKind::FileLength), vec![1.0]);
        assert_eq!(values(&metrics, MetricKind::FunctionLength), vec![1.0]);
        assert_eq!(values(&metrics, MetricKind::CyclomaticComplexity), vec![1.0]);
        // Zero-valued optional metrics are omitted
        assert!(values(&metrics, MetricKind::ParameterCount).is_empty());
        assert!(values(&metrics, MetricKind::NestingDepth).is_empty());
        assert!(values(&metrics, MetricKind::AnyUsage).is_empty());
        assert!(values(&metrics, MetricKind::TodoComments).is_empty());
    }

    #[test]
    fn test_function_metrics_carry_context_and_location() {
        let source = indoc! {r#"
            // TODO: tighten types
            export const parse = (raw: any): any => {
                if (raw) {
                    return JSON.parse(raw);
                }
                return null;
            };
        "#};
        let metrics = analyze(source, "parse.ts");

        let complexity: Vec<&Metric> =
            metrics_of_kind(&metrics, MetricKind::CyclomaticComplexity).collect();
        assert_eq!(complexity.len(), 1);
        assert_eq!(complexity[0].value, 2.0);
        assert_eq!(complexity[0].context.as_deref(), Some("parse"));
        let location = complexity[0].location.unwrap();
        assert_eq!((location.start_line, location.end_line), (2, 7));

        assert_eq!(values(&metrics, MetricKind::AnyUsage), vec![2.0]);
        assert_eq!(values(&metrics, MetricKind::NestingDepth), vec![1.0]);
        assert_eq!(values(&metrics, MetricKind::TodoComments), vec![1.0]);
        assert_eq!(values(&metrics, MetricKind::FileLength), vec![7.0]);
    }

    #[test]
    fn test_anonymous_callback_context() {
        let metrics = analyze("setTimeout(() => { tick(); }, 10);", "a.js");
        let contexts: Vec<&str> = metrics_of_kind(&metrics, MetricKind::FunctionLength)
            .map(|m| m.context_or(""))
            .collect();
        assert_eq!(contexts, vec!["anonymous function"]);
    }
}
