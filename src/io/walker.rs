use crate::config::{default_ignore, default_include};
use crate::core::{Error, Result};
use glob::Pattern;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Discovers source files below a root, honoring `.gitignore`
pub struct FileWalker {
    root: PathBuf,
    include_patterns: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            include_patterns: default_include(),
            ignore_patterns: default_ignore(),
        }
    }

    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.include_patterns = patterns;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Matching files, sorted by path
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(Error::FileSystem {
                message: format!("Path does not exist: {}", self.root.display()),
                path: Some(self.root.clone()),
                source: None,
            });
        }

        let include = compile_patterns(&self.include_patterns)?;
        let ignore = compile_patterns(&self.ignore_patterns)?;

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && self.should_process(path, &include, &ignore) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path, include: &[Pattern], ignore: &[Pattern]) -> bool {
        let relative = self.relative_path(path);

        include.iter().any(|p| p.matches_path(&relative))
            && !ignore.iter().any(|p| p.matches_path(&relative))
    }

    /// Path used for pattern matching; a root that is itself a file is
    /// matched by its file name
    fn relative_path(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf()),
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(Error::from))
        .collect()
}

pub fn find_project_files(root: &Path) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf()).walk()
}

/// Contents of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    pub size: u64,
    pub line_count: usize,
}

pub fn read_source(path: &Path) -> Result<SourceFile> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read source file", path, e))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        size: content.len() as u64,
        line_count: content.lines().count(),
        content,
    })
}
