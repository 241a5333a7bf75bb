//! Classifying samples by walking a built tree.

use rayon::prelude::*;

use crate::domain::entities::FeatureLookup;
use crate::domain::tree::TreeNode;

/// Why a walk stopped at an internal node's fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The sample has no value for the split feature.
    Missing,
    /// The sample's value was never observed at this node during training.
    Unseen(String),
}

/// How a prediction walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Leaf,
    Fallback {
        feature: String,
        reason: FallbackReason,
    },
}

/// One branch taken during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub feature: String,
    pub value: String,
}

/// Predicted label together with the decision path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub label: String,
    pub path: Vec<Step>,
    pub outcome: Outcome,
}

impl Prediction {
    pub fn used_fallback(&self) -> bool {
        matches!(self.outcome, Outcome::Fallback { .. })
    }
}

/// Walk `tree` for `sample`, returning the node where the walk stopped.
///
/// Stops at the first internal node whose split feature is missing from the
/// sample or whose value has no child.
fn walk<'t, S: FeatureLookup + ?Sized>(
    tree: &'t TreeNode,
    sample: &S,
    mut visit: impl FnMut(&'t str, &str),
) -> (&'t TreeNode, Option<FallbackReason>) {
    let mut node = tree;
    loop {
        let TreeNode::Internal {
            feature, children, ..
        } = node
        else {
            return (node, None);
        };
        let Some(value) = sample.feature(feature) else {
            return (node, Some(FallbackReason::Missing));
        };
        match children.get(value) {
            Some(child) => {
                visit(feature.as_str(), value);
                node = child;
            }
            None => return (node, Some(FallbackReason::Unseen(value.to_string()))),
        }
    }
}

/// Predicted label for `sample`.
///
/// A missing feature or an unseen value returns the fallback of the node
/// where it was encountered; the walk does not continue deeper.
pub fn predict<'t, S: FeatureLookup + ?Sized>(tree: &'t TreeNode, sample: &S) -> &'t str {
    let (node, _) = walk(tree, sample, |_, _| {});
    node.label()
}

/// Like [`predict`], but records the branches taken and how the walk ended.
pub fn explain<S: FeatureLookup + ?Sized>(tree: &TreeNode, sample: &S) -> Prediction {
    let mut path = Vec::new();
    let (node, reason) = walk(tree, sample, |feature, value| {
        path.push(Step {
            feature: feature.to_string(),
            value: value.to_string(),
        })
    });

    let outcome = match (reason, node.feature()) {
        (Some(reason), Some(feature)) => Outcome::Fallback {
            feature: feature.to_string(),
            reason,
        },
        _ => Outcome::Leaf,
    };

    Prediction {
        label: node.label().to_string(),
        path,
        outcome,
    }
}

/// Predict many samples in parallel. The tree is only read, so no locking is needed.
pub fn predict_batch<S: FeatureLookup + Sync>(tree: &TreeNode, samples: &[S]) -> Vec<String> {
    samples
        .par_iter()
        .map(|sample| predict(tree, sample).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;
    use crate::domain::entities::Sample;
    use crate::util::testing::play_tennis;

    fn tree() -> TreeNode {
        let data = play_tennis();
        TreeBuilder::new("Play")
            .build(&data.rows, &data.features())
            .unwrap()
    }

    fn sample(pairs: &[(&str, &str)]) -> Sample {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn given_known_values_when_predicting_then_reaches_leaf() {
        let tree = tree();
        let s = sample(&[
            ("Outlook", "Sunny"),
            ("Temperature", "Cool"),
            ("Humidity", "High"),
            ("Wind", "Strong"),
        ]);
        assert_eq!(predict(&tree, &s), "No");

        let p = explain(&tree, &s);
        assert_eq!(p.label, "No");
        assert_eq!(p.outcome, Outcome::Leaf);
        assert_eq!(
            p.path,
            vec![
                Step {
                    feature: "Outlook".into(),
                    value: "Sunny".into()
                },
                Step {
                    feature: "Humidity".into(),
                    value: "High".into()
                },
            ]
        );
    }

    #[test]
    fn given_unseen_root_value_when_predicting_then_root_fallback() {
        let tree = tree();
        let s = sample(&[("Outlook", "Snow"), ("Humidity", "High")]);
        assert_eq!(predict(&tree, &s), "Yes");

        let p = explain(&tree, &s);
        assert!(p.used_fallback());
        assert!(p.path.is_empty());
        assert_eq!(
            p.outcome,
            Outcome::Fallback {
                feature: "Outlook".into(),
                reason: FallbackReason::Unseen("Snow".into())
            }
        );
    }

    #[test]
    fn given_missing_inner_feature_when_predicting_then_inner_fallback() {
        let tree = tree();
        // Sunny subset is 3 No / 2 Yes
        let s = sample(&[("Outlook", "Sunny")]);
        let p = explain(&tree, &s);
        assert_eq!(p.label, "No");
        assert_eq!(p.path.len(), 1);
        assert_eq!(
            p.outcome,
            Outcome::Fallback {
                feature: "Humidity".into(),
                reason: FallbackReason::Missing
            }
        );
    }

    #[test]
    fn given_leaf_tree_when_predicting_then_ignores_sample() {
        let tree = TreeNode::leaf("Yes");
        let p = explain(&tree, &Sample::new());
        assert_eq!(p.label, "Yes");
        assert_eq!(p.outcome, Outcome::Leaf);
    }

    #[test]
    fn given_same_sample_when_predicting_repeatedly_then_same_label() {
        let tree = tree();
        let s = sample(&[("Outlook", "Rain"), ("Wind", "Weak")]);
        let first = predict(&tree, &s);
        for _ in 0..10 {
            assert_eq!(predict(&tree, &s), first);
        }
    }

    #[test]
    fn given_training_rows_when_predicting_batch_then_all_correct() {
        let data = play_tennis();
        let tree = tree();
        let labels = predict_batch(&tree, &data.rows);
        let expected: Vec<String> = data
            .rows
            .iter()
            .map(|r| r.get("Play").unwrap_or_default().to_string())
            .collect();
        assert_eq!(labels, expected);
    }
}
