//! Near-duplicate detection over function-level code blocks.
//!
//! Every function-like unit becomes a [`CodeBlock`] whose token string is the
//! function source with comments removed and whitespace collapsed. Blocks are
//! compared pairwise across the whole run with a normalized Levenshtein
//! similarity; grouping is greedy in insertion order.

use crate::analyzers::typescript::parser::walk_preorder;
use crate::analyzers::typescript::visitor::helpers::{is_function_like, resolve_function_name};
use crate::core::ast::TypeScriptAst;
use crate::core::{Metric, MetricKind, Result, SourceLocation};
use std::ops::Range;
use std::path::PathBuf;
use tracing::debug;
use tree_sitter::Node;

/// Blocks with fewer normalized characters than this are ignored
pub const MIN_BLOCK_CHARS: usize = 50;

/// Similarity at or above which two blocks are duplicates
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Context used when the duplicated function has no name
pub const UNNAMED_BLOCK: &str = "code block";

/// Normalized text of one function-like unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub file_path: PathBuf,
    pub tokens: String,
    pub start_line: usize,
    pub end_line: usize,
    pub function_name: Option<String>,
    char_len: usize,
}

impl CodeBlock {
    pub fn new(
        file_path: PathBuf,
        tokens: String,
        start_line: usize,
        end_line: usize,
        function_name: Option<String>,
    ) -> Self {
        let char_len = tokens.chars().count();
        Self {
            file_path,
            tokens,
            start_line,
            end_line,
            function_name,
            char_len,
        }
    }

    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }
}

/// Accumulates code blocks for one analysis run
#[derive(Debug, Default)]
pub struct DuplicationDetector {
    code_blocks: Vec<CodeBlock>,
}

impl DuplicationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract and retain the blocks of one parsed file
    pub fn add_file(&mut self, ast: &TypeScriptAst) {
        self.add_blocks(extract_code_blocks(ast));
    }

    /// Retain blocks extracted elsewhere (e.g. on a worker thread)
    pub fn add_blocks(&mut self, blocks: impl IntoIterator<Item = CodeBlock>) {
        self.code_blocks.extend(
            blocks
                .into_iter()
                .filter(|block| block.len() >= MIN_BLOCK_CHARS),
        );
    }

    pub fn block_count(&self) -> usize {
        self.code_blocks.len()
    }

    pub fn clear(&mut self) {
        self.code_blocks.clear();
    }

    /// One `code-duplication` metric per group leader with at least one match
    pub fn detect_duplicates(&self) -> Result<Vec<Metric>> {
        let groups = group_duplicates(&self.code_blocks);
        debug!(
            blocks = self.code_blocks.len(),
            groups = groups.len(),
            "duplication detection complete"
        );

        groups
            .into_iter()
            .map(|(leader, matches)| {
                let block = &self.code_blocks[leader];
                Ok(Metric::new(
                    MetricKind::CodeDuplication,
                    matches as f64,
                    block.file_path.clone(),
                )?
                .with_location(SourceLocation::lines(block.start_line, block.end_line))
                .with_context(block.function_name.as_deref().unwrap_or(UNNAMED_BLOCK)))
            })
            .collect()
    }
}

/// Greedy grouping: `(leader index, number of absorbed blocks)`
fn group_duplicates(blocks: &[CodeBlock]) -> Vec<(usize, usize)> {
    let mut matched = vec![false; blocks.len()];
    let mut groups = Vec::new();

    for i in 0..blocks.len() {
        if matched[i] {
            continue;
        }
        let mut count = 0;
        for j in (i + 1)..blocks.len() {
            if !matched[j] && similarity(&blocks[i], &blocks[j]) >= SIMILARITY_THRESHOLD {
                matched[j] = true;
                count += 1;
            }
        }
        if count > 0 {
            groups.push((i, count));
        }
    }

    groups
}

/// `1 - distance / max(len)` over characters
pub fn similarity(a: &CodeBlock, b: &CodeBlock) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    // The distance is at least the length difference, so a short block can
    // never reach the threshold against a much longer one.
    let shortest = a.len().min(b.len());
    if (shortest as f64) / (longest as f64) < SIMILARITY_THRESHOLD {
        return shortest as f64 / longest as f64;
    }
    if a.tokens == b.tokens {
        return 1.0;
    }

    let distance = edit_distance::edit_distance(&a.tokens, &b.tokens);
    1.0 - distance as f64 / longest as f64
}

/// One block per function-like node of the file, nested functions included
pub fn extract_code_blocks(ast: &TypeScriptAst) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();

    walk_preorder(ast.root(), (), |node, ()| {
        if is_function_like(node) {
            let tokens = normalize_tokens(node, &ast.source);
            if tokens.chars().count() >= MIN_BLOCK_CHARS {
                blocks.push(CodeBlock::new(
                    ast.path.clone(),
                    tokens,
                    node.start_position().row + 1,
                    node.end_position().row + 1,
                    resolve_function_name(node, &ast.source),
                ));
            }
        }
        Some(())
    });

    blocks
}

/// Node source with comment nodes cut out and whitespace runs collapsed
pub fn normalize_tokens(node: &Node, source: &str) -> String {
    let mut comments = Vec::new();
    collect_comment_ranges(node, &mut comments);

    let mut text = String::new();
    let mut cursor = node.start_byte();
    for range in comments {
        text.push_str(&source[cursor..range.start]);
        text.push(' ');
        cursor = range.end;
    }
    text.push_str(&source[cursor..node.end_byte()]);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_comment_ranges(node: &Node, ranges: &mut Vec<Range<usize>>) {
    walk_preorder(*node, (), |node, ()| {
        if node.kind() == "comment" {
            ranges.push(node.start_byte()..node.end_byte());
            return None;
        }
        Some(())
    });
}
