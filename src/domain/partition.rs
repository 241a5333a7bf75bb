//! Grouping rows by the values of one categorical feature.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::domain::entities::Row;
use crate::domain::error::DomainResult;

/// Rows sharing one value of the partitioning feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub value: String,
    pub rows: Vec<&'a Row>,
}

/// Split `rows` by their value of `feature`.
///
/// Groups appear in first-encountered value order and keep the input row order.
/// Every input row lands in exactly one group, and no group is empty.
pub fn partition<'a, R: Borrow<Row>>(rows: &'a [R], feature: &str) -> DomainResult<Vec<Group<'a>>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for row in rows {
        let row: &'a Row = row.borrow();
        let value = row.value(feature)?;
        match slots.get(value) {
            Some(&slot) => groups[slot].rows.push(row),
            None => {
                slots.insert(value, groups.len());
                groups.push(Group {
                    value: value.to_string(),
                    rows: vec![row],
                });
            }
        }
    }
    Ok(groups)
}
