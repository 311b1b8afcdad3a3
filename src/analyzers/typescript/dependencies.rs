//! Dependency extraction for TypeScript/JavaScript
//!
//! Extracts local-module `import` declarations and resolves them against the
//! importing file's directory. Package imports are dropped.

use crate::analyzers::typescript::parser::node_text;
use crate::core::ast::TypeScriptAst;
use std::path::{Component, Path, PathBuf};
use tree_sitter::Node;

/// Resolved paths of every relative `import` in the file, in source order
pub fn extract_local_imports(ast: &TypeScriptAst) -> Vec<PathBuf> {
    let base_dir = ast.path.parent().unwrap_or_else(|| Path::new(""));

    extract_import_specifiers(ast)
        .into_iter()
        .filter(|specifier| is_relative_specifier(specifier))
        .map(|specifier| resolve_specifier(base_dir, &specifier))
        .collect()
}

/// Module specifiers of all `import` declarations
pub fn extract_import_specifiers(ast: &TypeScriptAst) -> Vec<String> {
    let mut specifiers = Vec::new();
    let root = ast.tree.root_node();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(specifier) = extract_import(&child, ast) {
            specifiers.push(specifier);
        }
    }

    specifiers
}

fn extract_import(node: &Node, ast: &TypeScriptAst) -> Option<String> {
    // import x from 'module'
    // import { x } from 'module'
    // import 'module'
    if node.kind() != "import_statement" {
        return None;
    }
    node.child_by_field_name("source")
        .map(|source| extract_string_value(&source, ast))
}

fn extract_string_value(node: &Node, ast: &TypeScriptAst) -> String {
    let text = node_text(node, &ast.source);
    // Remove quotes
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Join a specifier onto a directory, folding `.` and `..` lexically
pub fn resolve_specifier(base_dir: &Path, specifier: &str) -> PathBuf {
    normalize_path(&base_dir.join(specifier))
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// A leading `./` disappears, `..` above a relative start is kept, and `..`
/// above the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_file;
    use indoc::indoc;

    #[test]
    fn test_extract_es_imports() {
        let source = indoc! {r#"
            import React from 'react';
            import { useState } from "react";
            import './styles.css';
            import type { User } from './types';
        "#};
        let ast = parse_file(source, Path::new("/repo/src/app.ts")).unwrap();

        assert_eq!(
            extract_import_specifiers(&ast),
            vec!["react", "react", "./styles.css", "./types"]
        );
    }

    #[test]
    fn test_local_imports_are_resolved() {
        let source = indoc! {r#"
            import { a } from './a';
            import { b } from '../lib/b';
            import { api } from '@company/sdk';
            const fs = require('./not-an-import');
        "#};
        let ast = parse_file(source, Path::new("/repo/src/feature/index.ts")).unwrap();

        assert_eq!(
            extract_local_imports(&ast),
            vec![
                PathBuf::from("/repo/src/feature/a"),
                PathBuf::from("/repo/src/lib/b"),
            ]
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            resolve_specifier(Path::new("/repo/src"), "./../x/./y"),
            PathBuf::from("/repo/x/y")
        );
        assert_eq!(
            resolve_specifier(Path::new(""), "../shared"),
            PathBuf::from("../shared")
        );
    }

    #[test]
    fn test_normalize_path_parent_edges() {
        assert_eq!(normalize_path(Path::new("../../x")), PathBuf::from("../../x"));
        assert_eq!(normalize_path(Path::new("a/../../x")), PathBuf::from("../x"));
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("./src/./a.ts")), PathBuf::from("src/a.ts"));
        assert_eq!(
            resolve_specifier(Path::new("."), "./b"),
            normalize_path(Path::new("./b"))
        );
    }
}
