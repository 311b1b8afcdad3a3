//! Analysis orchestration
//!
//! Top-level function for analyzing one parsed TypeScript/JavaScript file.
//! The tree is walked once per concern; nothing is re-parsed.

use super::dependencies::extract_local_imports;
use super::visitor::analyze_ast;
use crate::analyzers::FileAnalysis;
use crate::core::ast::TypeScriptAst;
use crate::core::Result;
use crate::debt::duplication::extract_code_blocks;
use std::time::Instant;
use tracing::trace;

/// Analyze a TypeScript/JavaScript file
pub fn analyze_typescript_file(ast: &TypeScriptAst) -> Result<FileAnalysis> {
    let start = Instant::now();

    // Phase 1: Extract functions and calculate metrics
    let analysis = analyze_ast(ast)?;
    let analysis_time = start.elapsed();

    // Phase 2: Function-level blocks for duplication
    let code_blocks = extract_code_blocks(ast);

    // Phase 3: Local imports for the dependency graph
    let imports = extract_local_imports(ast);

    trace!(
        file = %ast.path.display(),
        functions = analysis.functions.len(),
        blocks = code_blocks.len(),
        imports = imports.len(),
        analysis_ms = analysis_time.as_millis() as u64,
        total_ms = start.elapsed().as_millis() as u64,
        "analyzed file"
    );

    Ok(FileAnalysis {
        path: ast.path.clone(),
        metrics: analysis.metrics,
        code_blocks,
        imports,
    })
}
