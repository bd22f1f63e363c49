use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::data::record::{records_from_values, Record};

pub const LIST_PATH: &str = "/api/v1/qpl";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Server-side slice of the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    pub offset: usize,
    pub page_size: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for the QPL list endpoint
#[derive(Clone)]
pub struct QplClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl QplClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url, LIST_PATH)
    }

    /// Fetch the records once. Without a range the whole collection is requested.
    pub fn fetch_records(&self, range: Option<FetchRange>) -> Result<Vec<Record>> {
        let url = self.list_url();
        let mut request = self.client.get(&url);
        if let Some(range) = range {
            request = request.query(&[("offset", range.offset), ("pageSize", range.page_size)]);
        }

        info!(target: "api", "Fetching QPL records from {} ({:?})", url, range);

        let response = request
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            bail!("API Error ({}): {}", status, message);
        }

        let values: Vec<Value> = response
            .json()
            .context("Response is not a JSON array of records")?;
        let records = records_from_values(values);

        info!(target: "api", "Received {} records", records.len());
        Ok(records)
    }
}
