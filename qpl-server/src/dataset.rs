use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// The QPL collection, loaded once at start-up and shared read-only
/// between request handlers.
#[derive(Debug, Clone)]
pub struct QplDataset {
    records: Arc<Vec<Value>>,
}

impl QplDataset {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Load the dataset from a JSON file holding a top-level array
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let dataset = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;
        debug!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        match value {
            Value::Array(records) => Ok(Self::new(records)),
            other => bail!(
                "Dataset must be a JSON array, found {}",
                json_type_name(&other)
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all(&self) -> &[Value] {
        &self.records
    }

    /// Records `[offset, offset + page_size)`, clamped to the end of the collection
    pub fn slice(&self, offset: usize, page_size: usize) -> &[Value] {
        let len = self.records.len();
        let start = offset.min(len);
        let end = offset.saturating_add(page_size).min(len);
        &self.records[start..end]
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn numbered(count: usize) -> QplDataset {
        QplDataset::new((0..count).map(|i| json!({ "partNumber": i })).collect())
    }

    #[test]
    fn test_slice_inside_bounds() {
        let dataset = numbered(10);
        let page = dataset.slice(2, 3);
        assert_eq!(page.len(), 3);
        assert_eq!(page[0]["partNumber"], 2);
        assert_eq!(page[2]["partNumber"], 4);
    }

    #[test]
    fn test_slice_is_clamped_at_the_end() {
        let dataset = numbered(5);
        assert_eq!(dataset.slice(4, 10).len(), 1);
        assert!(dataset.slice(5, 10).is_empty());
        assert!(dataset.slice(usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_empty() {
        assert!(numbered(5).slice(0, 0).is_empty());
    }

    #[test]
    fn test_rejects_non_array_document() {
        let err = QplDataset::from_json_str(r#"{"partNumber": "X"}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"partNumber": "A"}}, {{"partNumber": "B"}}]"#).unwrap();

        let dataset = QplDataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.all()[1]["partNumber"], "B");
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = QplDataset::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
