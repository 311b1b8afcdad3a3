//! TypeScript/JavaScript source code analysis
//!
//! This module provides analysis of JavaScript and TypeScript source code,
//! including:
//!
//! - Function metrics (length, parameters, cyclomatic complexity, nesting, `any` usage)
//! - File metrics (length, TODO/FIXME markers)
//! - Local import extraction for dependency cycles
//!
//! # Example
//!
//! ```
//! use debtscore::analyzers::{Analyzer, TypeScriptAnalyzer};
//! use std::path::Path;
//!
//! let analyzer = TypeScriptAnalyzer::new();
//! let ast = analyzer.parse("const one = () => 1;", Path::new("one.ts")).unwrap();
//! let analysis = analyzer.analyze(&ast).unwrap();
//! assert!(!analysis.metrics.is_empty());
//! ```

pub mod analyzer;
pub mod dependencies;
pub mod orchestration;
pub mod parser;
pub mod types;
pub mod visitor;

// Re-export main types
pub use analyzer::TypeScriptAnalyzer;
pub use orchestration::analyze_typescript_file;
pub use types::{FunctionKind, JsFunctionMetrics};
