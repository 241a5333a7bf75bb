//! Classifier service
//!
//! Loads datasets, trains ID3 trees and evaluates them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dataset::parse_csv;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    explain, extract_rules, predict, predict_batch, rank_features, Dataset, DomainError,
    FeatureGain, FeatureLookup, Prediction, Rule, TreeBuilder, TreeNode,
};
use crate::infrastructure::traits::FileSystem;

/// A built tree together with the schema it was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainedModel {
    pub tree: TreeNode,
    pub target: String,
    /// Features offered to the builder, in tie-break order
    pub features: Vec<String>,
}

/// Accuracy of a model on a labeled dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    /// (actual, predicted) → count
    pub confusion: BTreeMap<(String, String), usize>,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Service for training and applying decision trees.
pub struct ClassifierService {
    fs: Arc<dyn FileSystem>,
    delimiter: u8,
}

impl ClassifierService {
    /// Create a new classifier service reading comma-separated files.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs, delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and parse a dataset file.
    #[instrument(level = "debug", skip(self))]
    pub fn load_dataset(&self, path: &Path, target: Option<&str>) -> ApplicationResult<Dataset> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::DatasetNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read dataset", path)?;
        parse_csv(&content, target, self.delimiter)
    }

    /// Build a tree on `dataset`.
    ///
    /// `features` defaults to every non-target column in header order.
    #[instrument(level = "debug", skip(self, dataset), fields(rows = dataset.len()))]
    pub fn train(&self, dataset: &Dataset, features: Option<&[String]>) -> ApplicationResult<TrainedModel> {
        let features = self.resolve_features(dataset, features)?;
        let tree = TreeBuilder::new(dataset.target.clone()).build(&dataset.rows, &features)?;
        debug!(
            "train: depth={} leaves={} features={:?}",
            tree.depth(),
            tree.leaf_count(),
            features
        );
        Ok(TrainedModel {
            tree,
            target: dataset.target.clone(),
            features,
        })
    }

    pub fn predict<'m, S: FeatureLookup + ?Sized>(&self, model: &'m TrainedModel, sample: &S) -> &'m str {
        predict(&model.tree, sample)
    }

    pub fn explain<S: FeatureLookup + ?Sized>(&self, model: &TrainedModel, sample: &S) -> Prediction {
        explain(&model.tree, sample)
    }

    /// Compare predictions against the labels in `dataset`.
    ///
    /// `dataset` must carry the model's target column.
    #[instrument(level = "debug", skip(self, model, dataset), fields(rows = dataset.len()))]
    pub fn evaluate(&self, model: &TrainedModel, dataset: &Dataset) -> ApplicationResult<Evaluation> {
        let actual = dataset
            .rows
            .iter()
            .map(|row| row.value(&model.target).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;
        let predicted = predict_batch(&model.tree, &dataset.rows);

        let mut evaluation = Evaluation {
            total: actual.len(),
            ..Evaluation::default()
        };
        for (a, p) in actual.into_iter().zip(predicted) {
            if a == p {
                evaluation.correct += 1;
            }
            *evaluation.confusion.entry((a, p)).or_default() += 1;
        }
        debug!(
            "evaluate: {}/{} correct",
            evaluation.correct, evaluation.total
        );
        Ok(evaluation)
    }

    /// Information gain of each feature over the whole dataset.
    pub fn gains(&self, dataset: &Dataset, features: Option<&[String]>) -> ApplicationResult<Vec<FeatureGain>> {
        let features = self.resolve_features(dataset, features)?;
        Ok(rank_features(&dataset.rows, &features, &dataset.target)?)
    }

    pub fn rules(&self, model: &TrainedModel) -> Vec<Rule> {
        extract_rules(&model.tree)
    }

    /// Features to use on `dataset`: all non-target columns when `features` is
    /// empty, else the requested ones after checking them against the header.
    fn resolve_features(&self, dataset: &Dataset, features: Option<&[String]>) -> ApplicationResult<Vec<String>> {
        let Some(requested) = features.filter(|f| !f.is_empty()) else {
            return Ok(dataset.features());
        };
        if let Some(unknown) = requested.iter().find(|f| !dataset.columns.contains(f)) {
            return Err(ApplicationError::Dataset {
                message: format!(
                    "unknown feature '{}' (columns: {})",
                    unknown,
                    dataset.columns.join(", ")
                ),
            });
        }
        if requested.contains(&dataset.target) {
            return Err(DomainError::InvalidFeature(format!(
                "target column '{}' cannot be a split feature",
                dataset.target
            ))
            .into());
        }
        Ok(requested.to_vec())
    }
}
