//! Information gain scoring and best-feature selection.

use std::borrow::Borrow;

use crate::domain::entities::Row;
use crate::domain::entropy::entropy;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::partition::partition;

/// Gains closer to zero than this are floating-point noise.
const GAIN_EPSILON: f64 = 1e-12;

/// Information gain of one candidate feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGain {
    pub feature: String,
    pub gain: f64,
}

/// `H(rows) - Σ |g|/|rows| · H(g)` over the groups of `feature`.
pub fn information_gain<R: Borrow<Row>>(rows: &[R], feature: &str, target: &str) -> DomainResult<f64> {
    let base = entropy(rows, target)?;
    let total = rows.len() as f64;

    let mut remainder = 0.0;
    for group in partition(rows, feature)? {
        let weight = group.rows.len() as f64 / total;
        remainder += weight * entropy(&group.rows, target)?;
    }

    let gain = base - remainder;
    Ok(if gain.abs() < GAIN_EPSILON { 0.0 } else { gain })
}

/// Gain of every feature, in the given order.
pub fn rank_features<R: Borrow<Row>, S: AsRef<str>>(
    rows: &[R],
    features: &[S],
    target: &str,
) -> DomainResult<Vec<FeatureGain>> {
    features
        .iter()
        .map(|f| {
            Ok(FeatureGain {
                feature: f.as_ref().to_string(),
                gain: information_gain(rows, f.as_ref(), target)?,
            })
        })
        .collect()
}

/// Feature with maximum gain; on ties the earliest feature in `features` wins.
///
/// Returns `None` only when `features` is empty.
pub fn best_feature<R: Borrow<Row>, S: AsRef<str>>(
    rows: &[R],
    features: &[S],
    target: &str,
) -> DomainResult<Option<FeatureGain>> {
    if rows.is_empty() {
        return Err(DomainError::EmptyDataset);
    }
    Ok(select_best(rank_features(rows, features, target)?))
}

/// Highest gain of an already ranked list; the earliest entry wins ties.
pub fn select_best(ranking: Vec<FeatureGain>) -> Option<FeatureGain> {
    let mut best: Option<FeatureGain> = None;
    for candidate in ranking {
        if best.as_ref().map_or(true, |b| candidate.gain > b.gain) {
            best = Some(candidate);
        }
    }
    best
}
