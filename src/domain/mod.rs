//! Domain layer: entities and the ID3 algorithm
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod entropy;
pub mod error;
pub mod gain;
pub mod partition;
pub mod predictor;
pub mod rules;
pub mod tree;

pub use builder::TreeBuilder;
pub use entities::{Dataset, FeatureLookup, Row, Sample};
pub use entropy::{entropy, label_counts, majority, majority_label};
pub use error::{DomainError, DomainResult};
pub use gain::{best_feature, information_gain, rank_features, select_best, FeatureGain};
pub use partition::{partition, Group};
pub use predictor::{explain, predict, predict_batch, FallbackReason, Outcome, Prediction, Step};
pub use rules::{extract_rules, Rule};
pub use tree::TreeNode;
