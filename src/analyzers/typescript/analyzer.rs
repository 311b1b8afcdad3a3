use super::orchestration::analyze_typescript_file;
use super::parser;
use crate::analyzers::{Analyzer, FileAnalysis};
use crate::core::ast::TypeScriptAst;
use crate::core::Result;
use std::path::Path;

/// Tree-sitter backed analyzer for `.ts/.tsx/.js/.jsx` and their module variants
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptAnalyzer;

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for TypeScriptAnalyzer {
    fn is_supported(&self, path: &Path) -> bool {
        parser::is_supported(path)
    }

    fn parse(&self, content: &str, path: &Path) -> Result<TypeScriptAst> {
        parser::parse_file(content, path)
    }

    fn analyze(&self, ast: &TypeScriptAst) -> Result<FileAnalysis> {
        analyze_typescript_file(ast)
    }
}
