//! Dataset parsing from delimited text.
//!
//! The first record is the header. Every column except the target is a
//! categorical feature; values are compared as trimmed strings.

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Dataset, Row};

/// Parse CSV `content` into a dataset.
///
/// # Arguments
/// * `target` - Label column; defaults to the last header column
/// * `delimiter` - Field separator byte, usually `b','`
///
/// Blank and whitespace-only lines are skipped. Records whose width differs from
/// the header are rejected.
pub fn parse_csv(content: &str, target: Option<&str>, delimiter: u8) -> ApplicationResult<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let header = reader.headers().map_err(csv_err)?.clone();
    let columns = validate_header(&header)?;

    let target = match target {
        Some(t) if columns.iter().any(|c| c == t) => t.to_string(),
        Some(t) => {
            return Err(ApplicationError::Dataset {
                message: format!("target column '{}' not in header [{}]", t, columns.join(", ")),
            })
        }
        None => columns[columns.len() - 1].clone(),
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        // whitespace-only lines trim down to a single empty field
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ApplicationError::Dataset {
                message: format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    columns.len(),
                    record.len()
                ),
            });
        }
        rows.push(Row::new(rows.len(), columns.iter().map(String::as_str).zip(record.iter())));
    }

    debug!(
        "parse_csv: {} rows, {} columns, target={}",
        rows.len(),
        columns.len(),
        target
    );
    Ok(Dataset::new(columns, target, rows))
}

fn validate_header(header: &StringRecord) -> ApplicationResult<Vec<String>> {
    if header.len() < 2 {
        return Err(ApplicationError::Dataset {
            message: format!(
                "header needs at least one feature and a target column, found {} column(s)",
                header.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for name in header.iter() {
        if name.is_empty() {
            return Err(ApplicationError::Dataset {
                message: "header contains an empty column name".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(ApplicationError::Dataset {
                message: format!("duplicate column '{}' in header", name),
            });
        }
    }
    Ok(header.iter().map(str::to_string).collect())
}

fn csv_err(e: csv::Error) -> ApplicationError {
    ApplicationError::Dataset {
        message: e.to_string(),
    }
}
