//! Weighted aggregation of rule scores into the overall debt score.

use crate::config::CategoryWeights;
use crate::core::{CategoryScore, Error, Result, Score, ScoreMetadata};
use crate::rules::{Rule, RuleKind, PERFECT_SCORE};
use chrono::Utc;
use tracing::debug;

/// Allowed drift of the normalized weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rescale weights to sum to 1.0; all-zero weights become uniform
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let sum: f64 = weights.iter().sum();
    if sum == 0.0 {
        let uniform = 1.0 / weights.len() as f64;
        return vec![uniform; weights.len()];
    }

    weights.iter().map(|w| w / sum).collect()
}

/// Fails unless the weights sum to 1.0 within tolerance
pub fn ensure_weight_sum(weights: &[f64]) -> Result<()> {
    if weights.is_empty() {
        return Ok(());
    }
    let sum: f64 = weights.iter().sum();
    // Written so that a NaN sum fails too
    if (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
        Ok(())
    } else {
        Err(Error::WeightInvariant { sum })
    }
}

/// Combines per-rule scores using the configured category weights
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    weights: CategoryWeights,
}

impl ScoreAggregator {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// Build the final [`Score`] from each rule's category score
    pub fn aggregate(&self, rule_scores: &[(RuleKind, f64)], metadata: ScoreMetadata) -> Result<Score> {
        let raw: Vec<f64> = rule_scores
            .iter()
            .map(|(kind, _)| self.weights.weight_for(*kind))
            .collect();
        let weights = normalize_weights(&raw);
        ensure_weight_sum(&weights)?;

        let categories: Vec<CategoryScore> = rule_scores
            .iter()
            .zip(&weights)
            .map(|((kind, score), weight)| CategoryScore {
                name: kind.id().to_string(),
                score: *score,
                weight: *weight,
                description: Some(kind.description().to_string()),
            })
            .collect();

        let overall = if categories.is_empty() {
            PERFECT_SCORE
        } else {
            round2(categories.iter().map(|c| c.score * c.weight).sum())
        };

        debug!(overall, categories = categories.len(), "aggregated score");

        Ok(Score {
            overall,
            categories,
            timestamp: Utc::now(),
            metadata,
        })
    }
}
