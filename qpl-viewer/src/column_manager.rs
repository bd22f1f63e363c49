use std::collections::{BTreeMap, HashSet};

use crate::data::ordered_keys::OrderedKeySet;
use crate::data::record::Record;

/// A displayed column: the record field and its header text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
}

/// How the raw key set is turned into display columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRules {
    /// Keys never shown, wherever they appear
    pub exclude: Vec<String>,
    /// Preferred leading order; keys missing from the data are ignored
    pub order: Vec<String>,
    /// Header text per key; unmapped keys show the raw name
    pub labels: BTreeMap<String, String>,
}

/// Manages column-related operations for table display
pub struct ColumnManager;

impl ColumnManager {
    /// Derive the ordered display columns from the records.
    ///
    /// Preferred keys come first in preference order, then every other key in
    /// the order it first appears across the records. Excluded keys are
    /// dropped from both passes.
    pub fn resolve_columns(records: &[Record], rules: &ColumnRules) -> Vec<ColumnHeader> {
        let mut present = OrderedKeySet::new();
        for record in records {
            for key in record.keys() {
                present.insert(key);
            }
        }

        let excluded: HashSet<&str> = rules.exclude.iter().map(String::as_str).collect();
        let mut resolved = OrderedKeySet::new();

        for key in &rules.order {
            if present.contains(key) && !excluded.contains(key.as_str()) {
                resolved.insert(key);
            }
        }
        for key in present.iter() {
            if !excluded.contains(key) {
                resolved.insert(key);
            }
        }

        resolved
            .into_vec()
            .into_iter()
            .map(|key| ColumnHeader {
                label: rules.labels.get(&key).cloned().unwrap_or_else(|| key.clone()),
                key,
            })
            .collect()
    }

    /// Calculate column widths from the labels and formatted cells
    pub fn calculate_widths(headers: &[ColumnHeader], rows: &[Vec<String>]) -> Vec<u16> {
        let mut widths = Vec::with_capacity(headers.len());

        // For large pages, sample rows instead of checking all
        const MAX_ROWS_TO_CHECK: usize = 100;
        let total_rows = rows.len();

        let rows_to_check: Vec<usize> = if total_rows <= MAX_ROWS_TO_CHECK {
            (0..total_rows).collect()
        } else {
            let step = total_rows / MAX_ROWS_TO_CHECK;
            (0..MAX_ROWS_TO_CHECK)
                .map(|i| (i * step).min(total_rows - 1))
                .collect()
        };

        for (col_idx, header) in headers.iter().enumerate() {
            let mut max_width = header.label.chars().count();

            for &row_idx in &rows_to_check {
                if let Some(value) = rows.get(row_idx).and_then(|row| row.get(col_idx)) {
                    max_width = max_width.max(value.chars().count());
                }
            }

            // 2 chars of padding, kept within 4..=50
            let optimal_width = (max_width + 2).clamp(4, 50);
            widths.push(optimal_width as u16);
        }

        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(key: &str, label: &str) -> ColumnHeader {
        ColumnHeader {
            key: key.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_widths_use_longest_of_label_and_cells() {
        let headers = vec![header("a", "Part Number"), header("b", "Q")];
        let rows = vec![
            vec!["X".to_string(), "Yes".to_string()],
            vec!["Y".to_string(), "No".to_string()],
        ];
        assert_eq!(ColumnManager::calculate_widths(&headers, &rows), vec![13, 5]);
    }

    #[test]
    fn test_widths_are_clamped() {
        let headers = vec![header("a", "a"), header("b", "b")];
        let rows = vec![vec!["".to_string(), "x".repeat(200)]];
        assert_eq!(ColumnManager::calculate_widths(&headers, &rows), vec![4, 50]);
    }
}
