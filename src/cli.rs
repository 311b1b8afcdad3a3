use crate::commands::{AnalyzeConfig, OutputOptions};
use crate::config::{load_config, DebtscoreConfig};
use crate::io;
use crate::rules::RuleKind;
use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "debtscore")]
#[command(about = "Technical debt score for TypeScript and JavaScript projects", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a source tree and report its debt score
    Analyze(AnalyzeArgs),

    /// Initialize a .debtscore.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to analyze
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Glob patterns of files to analyze, replacing the configured ones
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Glob patterns of files to skip, replacing the configured ones
    #[arg(long, value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Category weight overrides, e.g. complexity=0.4,size=0.2
    #[arg(long, value_delimiter = ',')]
    pub weights: Option<Vec<String>>,

    /// Only evaluate these rules
    #[arg(long, value_delimiter = ',')]
    pub rules: Option<Vec<String>>,

    /// Disable parallel processing
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Number of threads for parallel processing (0 = all cores)
    #[arg(long, short = 'j', default_value = "0")]
    pub jobs: usize,

    /// Exit with a non-zero status when the overall score is below this value
    #[arg(long = "fail-under")]
    pub fail_under: Option<f64>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => io::OutputFormat::Json,
            OutputFormat::Terminal => io::OutputFormat::Terminal,
        }
    }
}

impl AnalyzeArgs {
    /// Merge the flags over the nearest `.debtscore.toml`
    pub fn to_config(&self) -> Result<AnalyzeConfig> {
        self.apply_to(&load_config(&self.path))
    }

    /// Merge the flags over an already loaded file configuration
    pub fn apply_to(&self, file_config: &DebtscoreConfig) -> Result<AnalyzeConfig> {
        let mut config = AnalyzeConfig::from_config(self.path.clone(), file_config);

        if let Some(include) = &self.include {
            config.include = include.clone();
        }
        if let Some(ignore) = &self.ignore {
            config.ignore = ignore.clone();
        }
        if let Some(weights) = &self.weights {
            config.weights.apply_overrides(weights)?;
        }
        if let Some(rules) = &self.rules {
            config.rules = parse_rules(rules)?;
        }
        if self.no_parallel {
            config.parallel = false;
        }
        config.quiet = self.quiet;

        Ok(config)
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            format: self.format.into(),
            output: self.output.clone(),
        }
    }
}

fn parse_rules(ids: &[String]) -> Result<Vec<RuleKind>> {
    ids.iter()
        .map(|id| {
            RuleKind::parse(id.trim()).ok_or_else(|| anyhow!("Unknown rule '{}'", id.trim()))
        })
        .collect()
}
