//! `.debtscore.toml` configuration.

mod core;
pub mod loader;
pub mod scoring;

pub use self::core::{
    default_ignore, default_include, AnalysisSettings, DebtscoreConfig, ScanConfig,
    DEFAULT_IGNORE, DEFAULT_INCLUDE,
};
pub use loader::{load_config, load_config_file, parse_and_validate_config, CONFIG_FILE_NAME};
pub use scoring::{parse_weight_override, CategoryWeights};

/// Contents written by `debtscore init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Debtscore Configuration

[scan]
include = [
    "**/*.ts",
    "**/*.tsx",
    "**/*.js",
    "**/*.jsx",
    "**/*.mts",
    "**/*.cts",
    "**/*.mjs",
    "**/*.cjs",
]
ignore = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/*.d.ts",
]

# Relative weight of each category in the overall score.
# Weights are rescaled to sum to 1.0.
[weights]
complexity = 0.30
size = 0.25
type-safety = 0.20
duplication = 0.15
circular-dependency = 0.10

[analysis]
parallel = true
"#;
