//! CLI command implementations.
//!
//! - **analyze**: score a source tree
//! - **init**: write a default `.debtscore.toml`

pub mod analyze;
pub mod init;

pub use analyze::{analyze_project, handle_analyze, AnalyzeConfig, OutputOptions};
pub use init::init_config;
