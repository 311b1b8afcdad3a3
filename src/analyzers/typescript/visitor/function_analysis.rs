//! Function analysis for TypeScript/JavaScript
//!
//! Extracts every function-like unit from a tree-sitter AST and measures it.
//! Nested functions are reported as units of their own.

use crate::analyzers::typescript::parser::walk_preorder;
use crate::analyzers::typescript::types::{FunctionKind, JsFunctionMetrics};
use crate::core::ast::TypeScriptAst;
use crate::core::SourceLocation;
use tree_sitter::Node;

use super::helpers::{
    calculate_cyclomatic_complexity, calculate_nesting_depth, count_any_usage,
    count_function_lines, count_parameters, is_function_like, resolve_function_name,
};

/// Extract all functions from a TypeScript/JavaScript AST, in source order
pub fn extract_functions(ast: &TypeScriptAst) -> Vec<JsFunctionMetrics> {
    let mut functions = Vec::new();

    walk_preorder(ast.root(), (), |node, ()| {
        if is_function_like(node) {
            if let Some(metrics) = analyze_function(node, ast) {
                functions.push(metrics);
            }
        }
        Some(())
    });

    functions
}

/// Measure a single function-like node
fn analyze_function(node: &Node, ast: &TypeScriptAst) -> Option<JsFunctionMetrics> {
    let name = resolve_function_name(node, &ast.source);
    let kind = match FunctionKind::from_node_kind(node.kind())? {
        FunctionKind::Method if name.as_deref() == Some("constructor") => {
            FunctionKind::Constructor
        }
        kind => kind,
    };

    let mut metrics = JsFunctionMetrics::new(
        name,
        ast.path.clone(),
        SourceLocation::from_node(node),
        kind,
    );

    if let Some(body) = node.child_by_field_name("body") {
        metrics.cyclomatic = calculate_cyclomatic_complexity(&body, &ast.source);
        metrics.nesting = calculate_nesting_depth(&body);
    }
    metrics.length = count_function_lines(node);
    metrics.parameter_count = count_parameters(node);
    metrics.any_count = count_any_usage(node, &ast.source);

    Some(metrics)
}
