use std::fs;
use std::path::{Path, PathBuf};

use super::core::DebtscoreConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".debtscore.toml";

/// How many directories, starting at the analyzed root, are searched
pub const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DebtscoreConfig> {
    let config = toml::from_str::<DebtscoreConfig>(contents)?;
    config.weights.validate()?;
    Ok(config)
}

/// Load a config file, failing if it is unreadable or invalid
pub fn load_config_file(path: &Path) -> Result<DebtscoreConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    parse_and_validate_config(&contents).map_err(|e| {
        Error::Configuration(format!("{}: {}", path.display(), e))
    })
}

fn try_load_config_from_path(config_path: &Path) -> Option<DebtscoreConfig> {
    if !config_path.is_file() {
        return None;
    }

    match load_config_file(config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring config file: {}. Using defaults.", e);
            None
        }
    }
}

/// `start` followed by its ancestors, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find and load the nearest `.debtscore.toml` at or above `root`
pub fn load_config(root: &Path) -> DebtscoreConfig {
    let start = if root.is_file() {
        root.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        root.to_path_buf()
    };
    let start = fs::canonicalize(&start).unwrap_or(start);

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DebtscoreConfig::default()
        })
}
