//! TODO/FIXME marker scanning over comment nodes.

use crate::analyzers::typescript::parser::{node_text, walk_preorder};
use crate::core::ast::TypeScriptAst;

/// Marker occurrence counts across all comments of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub todo: usize,
    pub fixme: usize,
}

/// Count case-insensitive `TODO` and `FIXME` occurrences in line and block comments
pub fn count_markers(ast: &TypeScriptAst) -> MarkerCounts {
    let mut counts = MarkerCounts::default();

    walk_preorder(ast.root(), (), |node, ()| {
        if node.kind() != "comment" {
            return Some(());
        }
        let text = node_text(node, &ast.source).to_ascii_uppercase();
        counts.todo += text.matches("TODO").count();
        counts.fixme += text.matches("FIXME").count();
        None
    });

    counts
}
