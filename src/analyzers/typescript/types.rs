//! TypeScript/JavaScript specific types
//!
//! Core data structures for JS/TS analysis.

use crate::core::SourceLocation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label used for functions with no resolvable name
pub const ANONYMOUS_FUNCTION: &str = "anonymous function";

/// Kind of JavaScript/TypeScript function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    /// Regular function declaration: `function foo() {}`
    Declaration,
    /// Function expression: `const foo = function() {}`
    Expression,
    /// Arrow function: `const foo = () => {}`
    Arrow,
    /// Class or object method: `class C { foo() {} }`
    Method,
    /// Constructor: `class C { constructor() {} }`
    Constructor,
    /// Generator function: `function* foo() {}`
    Generator,
}

impl FunctionKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "function_declaration" => Some(Self::Declaration),
            "function_expression" | "function" => Some(Self::Expression),
            "generator_function_declaration" | "generator_function" => Some(Self::Generator),
            "arrow_function" => Some(Self::Arrow),
            "method_definition" => Some(Self::Method),
            _ => None,
        }
    }
}

/// Measurements of one function-like unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsFunctionMetrics {
    /// Resolved name, `None` for anonymous functions
    pub name: Option<String>,
    pub file: PathBuf,
    pub location: SourceLocation,
    pub kind: FunctionKind,
    pub cyclomatic: u32,
    pub nesting: u32,
    /// Inclusive line span
    pub length: usize,
    pub parameter_count: u32,
    /// `any` keywords in parameter and return types
    pub any_count: u32,
}

impl JsFunctionMetrics {
    pub fn new(
        name: Option<String>,
        file: PathBuf,
        location: SourceLocation,
        kind: FunctionKind,
    ) -> Self {
        Self {
            name,
            file,
            location,
            kind,
            cyclomatic: 1,
            nesting: 0,
            length: location.end_line - location.start_line + 1,
            parameter_count: 0,
            any_count: 0,
        }
    }

    /// Context label attached to this function's metrics
    pub fn context_label(&self) -> &str {
        match (self.kind, self.name.as_deref()) {
            (FunctionKind::Constructor, _) => "constructor",
            (_, Some(name)) => name,
            (_, None) => ANONYMOUS_FUNCTION,
        }
    }
}
