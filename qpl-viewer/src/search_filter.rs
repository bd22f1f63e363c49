use crate::data::record::Record;
use crate::data::value_format::ValueFormatter;

/// Free-text search over formatted record values
pub struct SearchFilter;

impl SearchFilter {
    /// Empty or whitespace-only queries select everything
    pub fn is_blank(query: &str) -> bool {
        query.trim().is_empty()
    }

    /// Indices of the records matching `query`, in source order.
    ///
    /// A record matches when any of the `keys` fields, formatted for display,
    /// contains the query as a case-insensitive substring.
    pub fn filter_rows(
        records: &[Record],
        keys: &[String],
        query: &str,
        formatter: &ValueFormatter,
    ) -> Vec<usize> {
        if Self::is_blank(query) {
            return (0..records.len()).collect();
        }

        let needle = query.to_lowercase();
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| Self::matches_record(record, keys, &needle, formatter))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// `needle` must already be lowercase
    pub fn matches_record(
        record: &Record,
        keys: &[String],
        needle: &str,
        formatter: &ValueFormatter,
    ) -> bool {
        keys.iter()
            .filter_map(|key| record.get(key))
            .any(|value| formatter.format(value).to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        let values = vec![
            json!({"supplierName": "Aimbo", "ctq": false, "lastUpdatedDate": "2017-11-24T03:43:02Z"}),
            json!({"supplierName": "Kwimbee", "ctq": true}),
            json!({"supplierName": "Tambee", "ctq": false, "partName": "Aimbo Mk2"}),
        ];
        crate::data::record::records_from_values(values)
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blank_query_selects_all() {
        let f = ValueFormatter::default();
        let all = keys(&["supplierName"]);
        assert_eq!(SearchFilter::filter_rows(&records(), &all, "", &f), vec![0, 1, 2]);
        assert_eq!(SearchFilter::filter_rows(&records(), &all, "   ", &f), vec![0, 1, 2]);
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let f = ValueFormatter::default();
        let k = keys(&["supplierName", "partName"]);
        assert_eq!(SearchFilter::filter_rows(&records(), &k, "mbo", &f), vec![0, 2]);
        assert_eq!(SearchFilter::filter_rows(&records(), &k, "AIMBO", &f), vec![0, 2]);
        assert_eq!(SearchFilter::filter_rows(&records(), &k, "bee", &f), vec![1, 2]);
    }

    #[test]
    fn test_matches_formatted_values() {
        let f = ValueFormatter::default();
        let k = keys(&["ctq", "lastUpdatedDate"]);
        assert_eq!(SearchFilter::filter_rows(&records(), &k, "yes", &f), vec![1]);
        assert_eq!(SearchFilter::filter_rows(&records(), &k, "11/24/2017", &f), vec![0]);
        // The raw value is not what is shown, so it is not matched
        assert!(SearchFilter::filter_rows(&records(), &k, "true", &f).is_empty());
        assert!(SearchFilter::filter_rows(&records(), &k, "03:43", &f).is_empty());
    }

    #[test]
    fn test_only_listed_keys_are_searched() {
        let f = ValueFormatter::default();
        let k = keys(&["supplierName"]);
        assert!(SearchFilter::filter_rows(&records(), &k, "Mk2", &f).is_empty());
    }
}
