//! ID3 tree induction.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::entities::Row;
use crate::domain::entropy::{label_counts, majority};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::gain::{rank_features, select_best};
use crate::domain::partition::partition;
use crate::domain::tree::TreeNode;

/// Constructs decision trees by greedy information-gain splitting.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    target: String,
}

impl TreeBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Build a tree from `rows`, splitting on `features`.
    ///
    /// `rows` must be non-empty. Duplicate feature names are collapsed, keeping
    /// the first occurrence; their order decides gain ties. Listing the target
    /// column as a feature is rejected.
    #[instrument(level = "debug", skip_all, fields(rows = rows.len(), target = %self.target))]
    pub fn build<R: Borrow<Row>, S: AsRef<str>>(&self, rows: &[R], features: &[S]) -> DomainResult<TreeNode> {
        if rows.is_empty() {
            return Err(DomainError::EmptyDataset);
        }

        let mut feature_set: Vec<&str> = Vec::with_capacity(features.len());
        for feature in features.iter().map(|f| f.as_ref()) {
            if feature == self.target {
                return Err(DomainError::InvalidFeature(format!(
                    "target column '{}' cannot be a split feature",
                    feature
                )));
            }
            if !feature_set.contains(&feature) {
                feature_set.push(feature);
            }
        }

        let rows: Vec<&Row> = rows.iter().map(Borrow::borrow).collect();
        let tree = self.build_node(&rows, &feature_set, 0)?;
        debug!(
            "build: depth={} nodes={} leaves={}",
            tree.depth(),
            tree.node_count(),
            tree.leaf_count()
        );
        Ok(tree)
    }

    fn build_node(&self, rows: &[&Row], features: &[&str], level: usize) -> DomainResult<TreeNode> {
        let counts = label_counts(rows, &self.target)?;
        if let [(label, _)] = counts.as_slice() {
            trace!("level {}: pure node -> {}", level, label);
            return Ok(TreeNode::leaf(label.clone()));
        }

        let fallback = majority(&counts)
            .ok_or(DomainError::EmptyDataset)?
            .to_string();
        if features.is_empty() {
            trace!("level {}: features exhausted -> {}", level, fallback);
            return Ok(TreeNode::leaf(fallback));
        }

        let ranking = rank_features(rows, features, &self.target)?;
        trace!(
            "level {}: gains {}",
            level,
            ranking
                .iter()
                .map(|g| format!("{}={:.4}", g.feature, g.gain))
                .join(", ")
        );
        let Some(best) = select_best(ranking) else {
            return Ok(TreeNode::leaf(fallback));
        };
        debug!(
            "level {}: split on {} (gain={:.4}, rows={})",
            level,
            best.feature,
            best.gain,
            rows.len()
        );

        let remaining: Vec<&str> = features
            .iter()
            .copied()
            .filter(|f| *f != best.feature)
            .collect();

        let mut children = BTreeMap::new();
        for group in partition(rows, &best.feature)? {
            let child = if group.rows.is_empty() {
                // partition never yields empty groups
                TreeNode::leaf(fallback.clone())
            } else {
                self.build_node(&group.rows, &remaining, level + 1)?
            };
            children.insert(group.value, child);
        }

        Ok(TreeNode::Internal {
            feature: best.feature,
            children,
            fallback,
        })
    }
}
