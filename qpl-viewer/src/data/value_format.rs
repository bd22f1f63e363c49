use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt::Write;

use crate::data::record::Record;

/// US-style month/day/year without padding, e.g. `11/24/2017`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Converts field values to the text shown in a cell.
///
/// Search matches against the same text, so anything visible in the table
/// can be found and nothing invisible is matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormatter {
    date_format: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ValueFormatter {
    /// Create a formatter with a chrono strftime pattern for dates
    pub fn new(date_format: impl Into<String>) -> Result<Self> {
        let date_format = date_format.into();
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date format '{}'", date_format);
        }
        Ok(Self { date_format })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Bool(true) => "Yes".to_string(),
            Value::Bool(false) => "No".to_string(),
            Value::String(s) => match parse_calendar_date(s) {
                Some(date) => self.format_date(date),
                None => s.clone(),
            },
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Format a record field; a missing field is an empty cell
    pub fn format_field(&self, record: &Record, key: &str) -> String {
        record
            .get(key)
            .map(|value| self.format(value))
            .unwrap_or_default()
    }

    fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.to_string();
        }
        out
    }
}

/// Parse a date or date-time string and keep only the calendar date.
/// Offsets are honoured as written; no conversion to local time happens.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Shortest accepted form is YYYY-MM-DD
    if s.len() < 10 || !s.as_bytes()[0].is_ascii_digit() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
