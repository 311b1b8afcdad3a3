//! Helper functions for TypeScript/JavaScript analysis
//!
//! Provides the per-function measurements: cyclomatic complexity, nesting
//! depth, parameter counts and `any` usage.

use crate::analyzers::typescript::parser::{node_text, walk_preorder};
use tree_sitter::Node;

/// Node kinds that start their own function-like unit
pub const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Node kinds that increase nesting depth
const NESTING_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "switch_statement",
    "try_statement",
];

pub fn is_function_like(node: &Node) -> bool {
    // The `function` keyword token shares its kind with the older grammar node
    node.is_named() && FUNCTION_KINDS.contains(&node.kind())
}

/// Calculate cyclomatic complexity for a function body
///
/// Starts at 1 and adds one per decision point. Nested functions are their
/// own units and are not descended into.
pub fn calculate_cyclomatic_complexity(body: &Node, source: &str) -> u32 {
    let mut complexity: u32 = 1; // Base complexity

    walk_preorder(*body, (), |node, ()| {
        if is_function_like(node) {
            return None;
        }
        if is_decision_point(node, source) {
            complexity += 1;
        }
        Some(())
    });

    complexity
}

fn is_decision_point(node: &Node, source: &str) -> bool {
    match node.kind() {
        "if_statement" => true,
        "for_statement" | "for_in_statement" => true,
        "while_statement" | "do_statement" => true,
        // `default:` is a separate switch_default node
        "switch_case" => true,
        "catch_clause" => true,
        "ternary_expression" => true,
        "binary_expression" => is_short_circuit(node, source),
        _ => false,
    }
}

fn is_short_circuit(node: &Node, source: &str) -> bool {
    node.child_by_field_name("operator")
        .map(|op| matches!(node_text(&op, source), "&&" | "||"))
        .unwrap_or(false)
}

/// Calculate maximum nesting depth below a function body
pub fn calculate_nesting_depth(body: &Node) -> u32 {
    let mut max_depth = 0;
    let mut cursor = body.walk();

    for child in body.children(&mut cursor) {
        walk_preorder(child, 0u32, |node, current_depth| {
            if is_function_like(node) {
                return None;
            }
            let depth = if increases_nesting(node) {
                current_depth + 1
            } else {
                current_depth
            };
            max_depth = max_depth.max(depth);
            Some(depth)
        });
    }

    max_depth
}

fn increases_nesting(node: &Node) -> bool {
    if NESTING_KINDS.contains(&node.kind()) {
        return true;
    }
    // A bare `{ ... }` block inside another block
    node.kind() == "statement_block"
        && node
            .parent()
            .map(|parent| parent.kind() == "statement_block")
            .unwrap_or(false)
}

/// Inclusive line span of a node
pub fn count_function_lines(node: &Node) -> usize {
    node.end_position().row - node.start_position().row + 1
}

/// Count declared parameters of a function-like node
pub fn count_parameters(node: &Node) -> u32 {
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        let count = params
            .named_children(&mut cursor)
            .filter(|p| p.kind() != "comment")
            .count();
        count as u32
    } else if node.child_by_field_name("parameter").is_some() {
        // Arrow function with a single bare parameter: `x => x * 2`
        1
    } else {
        0
    }
}

/// Count `any` keywords in parameter type annotations and the return type
pub fn count_any_usage(node: &Node, source: &str) -> u32 {
    let mut count = 0;

    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            if let Some(annotation) = param.child_by_field_name("type") {
                count += count_any_keywords(&annotation, source);
            }
        }
    }

    if let Some(return_type) = node.child_by_field_name("return_type") {
        count += count_any_keywords(&return_type, source);
    }

    count
}

fn count_any_keywords(node: &Node, source: &str) -> u32 {
    let mut count = 0;
    walk_preorder(*node, (), |node, ()| {
        if node.kind() == "predefined_type" && node_text(node, source) == "any" {
            count += 1;
        }
        Some(())
    });
    count
}

/// Resolve the display name of a function-like node
///
/// Declarations and methods use their own name; anonymous functions take the
/// name of whatever they are assigned to.
pub fn resolve_function_name(node: &Node, source: &str) -> Option<String> {
    if node.kind() == "method_definition" {
        return node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string());
    }

    if let Some(name) = node.child_by_field_name("name") {
        return Some(node_text(&name, source).to_string());
    }

    let parent = node.parent()?;
    let name_node = match parent.kind() {
        "variable_declarator" => parent.child_by_field_name("name"),
        "pair" => parent.child_by_field_name("key"),
        "public_field_definition" => parent.child_by_field_name("name"),
        "field_definition" => parent.child_by_field_name("property"),
        "assignment_expression" => parent.child_by_field_name("left").map(|left| {
            if left.kind() == "member_expression" {
                left.child_by_field_name("property").unwrap_or(left)
            } else {
                left
            }
        }),
        _ => None,
    }?;

    Some(node_text(&name_node, source).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_file;
    use crate::core::ast::TypeScriptAst;
    use std::path::Path;

    fn parse(source: &str, file: &str) -> TypeScriptAst {
        parse_file(source, Path::new(file)).unwrap()
    }

    fn first_function<'a>(node: Node<'a>) -> Option<Node<'a>> {
        if is_function_like(&node) {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(first_function)
    }

    fn cyclomatic(source: &str) -> u32 {
        let ast = parse(source, "test.js");
        let func = first_function(ast.root()).unwrap();
        let body = func.child_by_field_name("body").unwrap();
        calculate_cyclomatic_complexity(&body, &ast.source)
    }

    fn nesting(source: &str) -> u32 {
        let ast = parse(source, "test.js");
        let func = first_function(ast.root()).unwrap();
        let body = func.child_by_field_name("body").unwrap();
        calculate_nesting_depth(&body)
    }

    #[test]
    fn test_cyclomatic_simple_function() {
        assert_eq!(cyclomatic("function foo() { return 1; }"), 1);
    }

    #[test]
    fn test_cyclomatic_with_if() {
        assert_eq!(
            cyclomatic("function foo(x) { if (x) { return 1; } return 0; }"),
            2
        );
    }

    #[test]
    fn test_cyclomatic_logical_operator_in_condition() {
        assert_eq!(
            cyclomatic("function foo(a, b) { if (a && b) { return 1; } return 0; }"),
            3
        );
        assert_eq!(
            cyclomatic("function foo(a, b, c) { if (a && b || c) { return 1; } }"),
            4
        );
    }

    #[test]
    fn test_cyclomatic_ignores_nullish_coalescing() {
        assert_eq!(cyclomatic("function foo(a) { return a ?? 1; }"), 1);
    }

    #[test]
    fn test_cyclomatic_counts_loops_cases_ternary_and_catch() {
        let source = r#"
function foo(items, mode) {
    for (let i = 0; i < 3; i++) {}
    for (const item of items) {}
    for (const key in items) {}
    while (mode) { mode = false; }
    do { mode = true; } while (!mode);
    switch (mode) {
        case 1: break;
        case 2: break;
        default: break;
    }
    try { run(); } catch (e) { log(e); }
    return mode ? 1 : 0;
}
"#;
        // 1 base + 3 for + while + do + 2 cases + catch + ternary
        assert_eq!(cyclomatic(source), 10);
    }

    #[test]
    fn test_cyclomatic_skips_nested_functions() {
        let source = r#"
function outer(items) {
    if (items) {
        items.forEach((x) => { if (x) { use(x); } });
    }
}
"#;
        assert_eq!(cyclomatic(source), 2);
    }

    #[test]
    fn test_cyclomatic_long_generated_condition() {
        let terms: Vec<String> = (0..5000).map(|i| format!("a{i}")).collect();
        let source = format!("function ready() {{ return {}; }}", terms.join(" && "));

        assert_eq!(cyclomatic(&source), 5000);
        assert_eq!(nesting(&source), 0);
    }

    #[test]
    fn test_nesting_depth() {
        let source = r#"
function foo(a, b, c) {
    if (a) {
        if (b) {
            if (c) {
                return 1;
            }
        }
    }
}
"#;
        assert_eq!(nesting(source), 3);
    }

    #[test]
    fn test_nesting_depth_flat_function() {
        assert_eq!(nesting("function foo() { const x = 1; return x; }"), 0);
    }

    #[test]
    fn test_nesting_depth_bare_block_and_try() {
        let source = r#"
function foo() {
    {
        try {
            run();
        } finally {
            done();
        }
    }
}
"#;
        assert_eq!(nesting(source), 2);
    }

    #[test]
    fn test_count_parameters() {
        let ast = parse("function f(a, b = 2, ...rest) {}", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(count_parameters(&func), 3);

        let ast = parse("const g = x => x * 2;", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(count_parameters(&func), 1);

        let ast = parse("const h = () => 0;", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(count_parameters(&func), 0);
    }

    #[test]
    fn test_count_any_usage() {
        let source = "function f(a: any, b: string, c: Array<any>): any { return a; }";
        let ast = parse(source, "test.ts");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(count_any_usage(&func, &ast.source), 3);
    }

    #[test]
    fn test_count_any_usage_ignores_body() {
        let source = "function f(a: number): number { const x: any = a; return x; }";
        let ast = parse(source, "test.ts");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(count_any_usage(&func, &ast.source), 0);
    }

    #[test]
    fn test_resolve_function_name() {
        let ast = parse("const greet = (name) => name;", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(
            resolve_function_name(&func, &ast.source).as_deref(),
            Some("greet")
        );

        let ast = parse("run(function () { return 1; });", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(resolve_function_name(&func, &ast.source), None);

        let ast = parse("const api = { fetch: () => 1 };", "test.js");
        let func = first_function(ast.root()).unwrap();
        assert_eq!(
            resolve_function_name(&func, &ast.source).as_deref(),
            Some("fetch")
        );
    }
}
