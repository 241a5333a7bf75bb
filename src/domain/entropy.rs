//! Label statistics: class counts, majority label and Shannon entropy.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::domain::entities::Row;
use crate::domain::error::{DomainError, DomainResult};

/// Counts of each target label, in first-encountered row order.
pub fn label_counts<R: Borrow<Row>>(rows: &[R], target: &str) -> DomainResult<Vec<(String, usize)>> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let label = row.borrow().value(target)?;
        match slots.get(label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(label, counts.len());
                counts.push((label.to_string(), 1));
            }
        }
    }
    Ok(counts)
}

/// Most frequent label in `counts`. Ties go to the earliest entry.
///
/// `None` only for empty `counts`.
pub fn majority(counts: &[(String, usize)]) -> Option<&str> {
    let mut best: Option<&(String, usize)> = None;
    for entry in counts {
        // strictly greater keeps the earliest label on ties
        if best.map_or(true, |(_, c)| entry.1 > *c) {
            best = Some(entry);
        }
    }
    best.map(|(label, _)| label.as_str())
}

/// Most frequent target label. Ties go to the label encountered first in row order.
pub fn majority_label<R: Borrow<Row>>(rows: &[R], target: &str) -> DomainResult<String> {
    let counts = label_counts(rows, target)?;
    majority(&counts)
        .map(str::to_string)
        .ok_or(DomainError::EmptyDataset)
}

/// Shannon entropy (base 2) of the target label distribution.
///
/// Errors with `EmptyDataset` on zero rows: entropy of an empty set is undefined.
pub fn entropy<R: Borrow<Row>>(rows: &[R], target: &str) -> DomainResult<f64> {
    if rows.is_empty() {
        return Err(DomainError::EmptyDataset);
    }
    let total = rows.len() as f64;
    let h = label_counts(rows, target)?
        .iter()
        .map(|(_, count)| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>();
    // a pure set sums to -0.0
    Ok(h.max(0.0))
}
