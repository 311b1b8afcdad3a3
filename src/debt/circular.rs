use crate::analyzers::typescript::dependencies::{extract_local_imports, normalize_path};
use crate::core::ast::TypeScriptAst;
use crate::core::{display_name, Metric, MetricKind, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried, in order, when an import omits one
const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// A file and the local modules it imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub file_path: PathBuf,
    pub imports: Vec<PathBuf>,
}

/// A closed loop of local imports, in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependency {
    pub cycle: Vec<PathBuf>,
}

impl CircularDependency {
    /// `a.ts → b.ts → c.ts`
    pub fn chain(&self) -> String {
        self.cycle
            .iter()
            .map(|path| display_name(path))
            .collect::<Vec<_>>()
            .join(" → ")
    }

    fn canonical_key(&self) -> String {
        let mut files: Vec<String> = self
            .cycle
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        files.sort();
        files.join("|")
    }
}

/// Dependency graph for analyzing file relationships
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashMap<PathBuf, DependencyNode>,
    /// Insertion order, so traversal and results are deterministic
    modules: Vec<PathBuf>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parsed file and its local imports
    pub fn add_file(&mut self, ast: &TypeScriptAst) {
        self.add_node(ast.path.clone(), extract_local_imports(ast));
    }

    /// Record a file with already-resolved import targets
    ///
    /// Paths are normalized lexically, so `./a.ts` and `a.ts` are one node.
    pub fn add_node(&mut self, file_path: PathBuf, imports: Vec<PathBuf>) {
        let file_path = normalize_path(&file_path);
        let imports: Vec<PathBuf> = imports.iter().map(|target| normalize_path(target)).collect();
        match self.nodes.get_mut(&file_path) {
            Some(node) => node.imports.extend(imports),
            None => {
                self.modules.push(file_path.clone());
                self.nodes
                    .insert(file_path.clone(), DependencyNode { file_path, imports });
            }
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.modules.clear();
    }

    /// Get the number of files in the graph
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Get the number of import edges in the graph
    pub fn dependency_count(&self) -> usize {
        self.nodes.values().map(|node| node.imports.len()).sum()
    }

    /// Known files an import target refers to
    fn resolve_target(&self, target: &Path) -> Option<&PathBuf> {
        if let Some((path, _)) = self.nodes.get_key_value(target) {
            return Some(path);
        }

        let file_name = target.file_name()?.to_string_lossy().into_owned();
        let with_extension = RESOLVE_EXTENSIONS
            .iter()
            .map(|ext| target.with_file_name(format!("{}.{}", file_name, ext)));
        let index_files = RESOLVE_EXTENSIONS
            .iter()
            .map(|ext| target.join(format!("index.{}", ext)));

        with_extension
            .chain(index_files)
            .find_map(|candidate| self.nodes.get_key_value(&candidate).map(|(path, _)| path))
    }

    /// Resolved outgoing edges of a file
    pub fn get_dependencies(&self, module: &Path) -> Vec<PathBuf> {
        self.nodes
            .get(&normalize_path(module))
            .map(|node| {
                node.imports
                    .iter()
                    .filter_map(|target| self.resolve_target(target).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Detect circular dependencies using DFS
    pub fn detect_cycles(&self) -> Vec<CircularDependency> {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut rec_stack: HashSet<PathBuf> = HashSet::new();
        let mut path = Vec::new();
        let mut seen = HashSet::new();

        let mut circular_deps = Vec::new();

        for module in &self.modules {
            if !visited.contains(module) {
                self.dfs_detect_cycles(
                    module,
                    &mut visited,
                    &mut rec_stack,
                    &mut path,
                    &mut seen,
                    &mut circular_deps,
                );
            }
        }

        circular_deps
    }

    fn dfs_detect_cycles(
        &self,
        module: &Path,
        visited: &mut HashSet<PathBuf>,
        rec_stack: &mut HashSet<PathBuf>,
        path: &mut Vec<PathBuf>,
        seen: &mut HashSet<String>,
        cycles: &mut Vec<CircularDependency>,
    ) {
        visited.insert(module.to_path_buf());
        rec_stack.insert(module.to_path_buf());
        path.push(module.to_path_buf());

        for dep in self.get_dependencies(module) {
            if !visited.contains(&dep) {
                self.dfs_detect_cycles(&dep, visited, rec_stack, path, seen, cycles);
            } else if rec_stack.contains(&dep) {
                // Found a cycle
                if let Some(cycle_start) = path.iter().position(|m| *m == dep) {
                    let cycle = CircularDependency {
                        cycle: path[cycle_start..].to_vec(),
                    };
                    if seen.insert(cycle.canonical_key()) {
                        cycles.push(cycle);
                    }
                }
            }
        }

        path.pop();
        rec_stack.remove(module);
    }

    /// One `circular-dependency` metric per distinct cycle
    pub fn detect_circular_dependencies(&self) -> Result<Vec<Metric>> {
        let cycles = self.detect_cycles();
        debug!(
            modules = self.module_count(),
            edges = self.dependency_count(),
            cycles = cycles.len(),
            "dependency cycle detection complete"
        );

        cycles
            .iter()
            .map(|cycle| {
                Ok(Metric::new(
                    MetricKind::CircularDependency,
                    cycle.cycle.len() as f64,
                    cycle.cycle[0].clone(),
                )?
                .with_context(cycle.chain()))
            })
            .collect()
    }
}
