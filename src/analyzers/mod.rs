//! Source analyzers.
//!
//! An [`Analyzer`] is the parser collaborator of the engine: it decides which
//! files it understands, parses them once, and turns the tree into everything
//! the rest of the run needs from that file.

use crate::core::ast::TypeScriptAst;
use crate::core::{Metric, Result};
use crate::debt::duplication::CodeBlock;
use std::path::{Path, PathBuf};

pub mod typescript;

pub use typescript::TypeScriptAnalyzer;

/// Everything extracted from one parsed file
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub metrics: Vec<Metric>,
    /// Function-level blocks for the duplication detector
    pub code_blocks: Vec<CodeBlock>,
    /// Resolved local imports for the dependency graph
    pub imports: Vec<PathBuf>,
}

pub trait Analyzer: Send + Sync {
    /// Cheap extension check consulted before reading a file
    fn is_supported(&self, path: &Path) -> bool;
    fn parse(&self, content: &str, path: &Path) -> Result<TypeScriptAst>;
    fn analyze(&self, ast: &TypeScriptAst) -> Result<FileAnalysis>;
}

/// Parse and analyze a file's content in one step
pub fn analyze_file(content: &str, path: &Path, analyzer: &dyn Analyzer) -> Result<FileAnalysis> {
    analyzer
        .parse(content, path)
        .and_then(|ast| analyzer.analyze(&ast))
}
