//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing using tree-sitter grammars for JS/TS/JSX/TSX.

use crate::core::ast::{JsLanguageVariant, TypeScriptAst};
use crate::core::{Error, Result};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

/// Get the tree-sitter language for a JS variant
fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::JavaScript | JsLanguageVariant::Jsx => {
            tree_sitter_javascript::LANGUAGE.into()
        }
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Cheap check consulted before reading and parsing a file
pub fn is_supported(path: &Path) -> bool {
    JsLanguageVariant::from_path(path).is_some()
}

/// Parse a file, picking the grammar from its extension
pub fn parse_file(content: &str, path: &Path) -> Result<TypeScriptAst> {
    let variant = JsLanguageVariant::from_path(path).ok_or_else(|| {
        Error::parse(path, 0, 0, "unsupported file extension")
    })?;
    parse_source(content, path, variant)
}

/// Parse JavaScript/TypeScript source code into a tree-sitter AST
///
/// A tree containing error or missing nodes is reported as a parse failure
/// located at the first offending node.
pub fn parse_source(
    content: &str,
    path: &Path,
    variant: JsLanguageVariant,
) -> Result<TypeScriptAst> {
    let mut parser = Parser::new();
    let language = get_language(variant);

    parser
        .set_language(&language)
        .map_err(|e| Error::parse(path, 0, 0, format!("failed to load grammar: {}", e)))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, 0, 0, "parser produced no tree"))?;

    if has_parse_errors(&tree) {
        let (line, column, message) = first_error(&tree.root_node())
            .map(|node| {
                let message = if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "syntax error".to_string()
                };
                (node_line(&node), node_column(&node), message)
            })
            .unwrap_or((1, 1, "syntax error".to_string()));
        return Err(Error::parse(path, line, column, message));
    }

    Ok(TypeScriptAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
        language_variant: variant,
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

fn first_error<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let mut found: Option<Node<'a>> = None;
    walk_preorder(*node, (), |node, ()| {
        if found.is_some() || (!node.has_error() && !node.is_missing()) {
            return None;
        }
        if node.is_error() || node.is_missing() {
            found = Some(*node);
            return None;
        }
        Some(())
    });
    found
}

/// Pre-order traversal of `root` and its descendants, in source order.
///
/// `visit` receives each node with the state handed down by its parent and
/// returns the state for the node's children, or `None` to skip them. Uses
/// an explicit stack, so arbitrarily deep trees (long generated expression
/// chains) do not grow the thread stack.
pub fn walk_preorder<'a, S: Copy>(
    root: Node<'a>,
    state: S,
    mut visit: impl FnMut(&Node<'a>, S) -> Option<S>,
) {
    let mut stack = vec![(root, state)];
    while let Some((node, state)) = stack.pop() {
        if let Some(child_state) = visit(&node, state) {
            let mut cursor = node.walk();
            let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, child_state)));
        }
    }
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}
