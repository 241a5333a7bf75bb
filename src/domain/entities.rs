//! Domain entities: core data structures

use std::collections::{BTreeMap, HashMap};

use crate::domain::error::{DomainError, DomainResult};

/// Anything that can answer "what is the value of feature F".
///
/// Rows and plain maps both qualify, so the predictor accepts either.
pub trait FeatureLookup {
    fn feature(&self, name: &str) -> Option<&str>;
}

/// A sample to classify. Features may be missing or hold values never seen in training.
pub type Sample = BTreeMap<String, String>;

impl FeatureLookup for BTreeMap<String, String> {
    fn feature(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FeatureLookup for HashMap<String, String> {
    fn feature(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// One labeled record: ordered feature name → categorical value pairs,
/// including the target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position in the source dataset, used in error messages
    index: usize,
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new<K, V, I>(index: usize, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            index,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name`, or `UnknownFeature` if the row has no such column.
    pub fn value(&self, name: &str) -> DomainResult<&str> {
        self.get(name).ok_or_else(|| DomainError::UnknownFeature {
            feature: name.to_string(),
            row: self.index,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of the row without the target column, usable as a prediction input.
    pub fn to_sample(&self, target: &str) -> Sample {
        self.fields
            .iter()
            .filter(|(k, _)| k != target)
            .cloned()
            .collect()
    }
}

impl FeatureLookup for Row {
    fn feature(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

/// Ordered rows sharing one schema, plus the designated target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Column names in header order
    pub columns: Vec<String>,
    /// Name of the label column
    pub target: String,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, target: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            target: target.into(),
            rows,
        }
    }

    /// All columns except the target, in header order.
    pub fn features(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| **c != self.target)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(3, [("Outlook", "Sunny"), ("Wind", "Weak"), ("Play", "No")])
    }

    #[test]
    fn given_missing_column_when_reading_value_then_reports_row_index() {
        let err = row().value("Humidity").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownFeature {
                feature: "Humidity".into(),
                row: 3
            }
        );
    }

    #[test]
    fn given_row_when_converting_to_sample_then_target_is_dropped() {
        let sample = row().to_sample("Play");
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.feature("Outlook"), Some("Sunny"));
        assert_eq!(sample.feature("Play"), None);
    }

    #[test]
    fn given_dataset_when_listing_features_then_target_is_excluded() {
        let ds = Dataset::new(
            vec!["Outlook".into(), "Play".into(), "Wind".into()],
            "Play",
            vec![],
        );
        assert_eq!(ds.features(), vec!["Outlook".to_string(), "Wind".to_string()]);
        assert!(ds.is_empty());
    }
}
