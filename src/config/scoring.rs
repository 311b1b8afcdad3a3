//! Category weight configuration
//!
//! Weights are relative: the aggregator rescales whatever is configured so
//! that the categories taking part in a run sum to 1.0.

use crate::core::{Error, Result};
use crate::rules::{Rule, RuleKind};
use serde::{Deserialize, Serialize};

/// Weight of each rule category in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryWeights {
    #[serde(default = "default_complexity_weight")]
    pub complexity: f64,

    #[serde(default = "default_size_weight")]
    pub size: f64,

    #[serde(default = "default_type_safety_weight")]
    pub type_safety: f64,

    #[serde(default = "default_duplication_weight")]
    pub duplication: f64,

    #[serde(default = "default_circular_dependency_weight")]
    pub circular_dependency: f64,
}

pub fn default_complexity_weight() -> f64 {
    0.30
}

pub fn default_size_weight() -> f64 {
    0.25
}

pub fn default_type_safety_weight() -> f64 {
    0.20
}

pub fn default_duplication_weight() -> f64 {
    0.15
}

pub fn default_circular_dependency_weight() -> f64 {
    0.10
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            complexity: default_complexity_weight(),
            size: default_size_weight(),
            type_safety: default_type_safety_weight(),
            duplication: default_duplication_weight(),
            circular_dependency: default_circular_dependency_weight(),
        }
    }
}

impl CategoryWeights {
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    pub fn weight_for(&self, kind: RuleKind) -> f64 {
        match kind {
            RuleKind::Complexity => self.complexity,
            RuleKind::Size => self.size,
            RuleKind::TypeSafety => self.type_safety,
            RuleKind::Duplication => self.duplication,
            RuleKind::CircularDependency => self.circular_dependency,
        }
    }

    pub fn set(&mut self, kind: RuleKind, weight: f64) {
        let slot = match kind {
            RuleKind::Complexity => &mut self.complexity,
            RuleKind::Size => &mut self.size,
            RuleKind::TypeSafety => &mut self.type_safety,
            RuleKind::Duplication => &mut self.duplication,
            RuleKind::CircularDependency => &mut self.circular_dependency,
        };
        *slot = weight;
    }

    /// Every weight must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        RuleKind::ALL
            .iter()
            .find(|kind| !Self::is_valid_weight(self.weight_for(**kind)))
            .map_or(Ok(()), |kind| {
                Err(Error::Configuration(format!(
                    "{} weight must be a non-negative number, got {}",
                    kind,
                    self.weight_for(*kind)
                )))
            })
    }

    /// Apply `category=weight` overrides on top of the current values
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<()> {
        for entry in overrides {
            let (kind, weight) = parse_weight_override(entry.as_ref())?;
            self.set(kind, weight);
        }
        self.validate()
    }
}

/// Parse `complexity=0.4` into its category and weight
pub fn parse_weight_override(entry: &str) -> Result<(RuleKind, f64)> {
    let (key, value) = entry.split_once('=').ok_or_else(|| {
        Error::Configuration(format!("expected category=weight, got '{}'", entry))
    })?;

    let kind = RuleKind::parse(key.trim()).ok_or_else(|| {
        Error::Configuration(format!(
            "unknown category '{}' (expected one of: {})",
            key.trim(),
            RuleKind::ALL
                .iter()
                .map(|k| k.id())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let weight: f64 = value.trim().parse().map_err(|_| {
        Error::Configuration(format!("invalid weight '{}' for {}", value.trim(), kind))
    })?;

    if !CategoryWeights::is_valid_weight(weight) {
        return Err(Error::Configuration(format!(
            "{} weight must be a non-negative number, got {}",
            kind, weight
        )));
    }

    Ok((kind, weight))
}
