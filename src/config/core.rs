use super::scoring::CategoryWeights;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INCLUDE: &[&str] = &[
    "**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx", "**/*.mts", "**/*.cts", "**/*.mjs", "**/*.cjs",
];

pub const DEFAULT_IGNORE: &[&str] = &[
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/*.d.ts",
];

/// Root configuration structure for debtscore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DebtscoreConfig {
    /// Which files are analyzed
    #[serde(default)]
    pub scan: ScanConfig,

    /// Category weights of the overall score
    #[serde(default)]
    pub weights: CategoryWeights,

    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob patterns a file must match, relative to the analyzed root
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Glob patterns excluding files, relative to the analyzed root
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            ignore: default_ignore(),
        }
    }
}

pub fn default_include() -> Vec<String> {
    DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect()
}

pub fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Analyze files on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

fn default_parallel() -> bool {
    true
}
