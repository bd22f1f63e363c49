use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::dataset::QplDataset;
use crate::error::ApiError;

pub const HEALTH_MESSAGE: &str = "Server works.";

/// Raw query parameters of `GET /api/v1/qpl`.
/// Kept as strings so that bad values produce our own 400 body.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub offset: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRange {
    All,
    Slice { offset: usize, page_size: usize },
}

impl ListParams {
    pub fn range(&self) -> Result<ListRange, ApiError> {
        match (&self.offset, &self.page_size) {
            (None, None) => Ok(ListRange::All),
            (Some(offset), Some(page_size)) => Ok(ListRange::Slice {
                offset: parse_non_negative("offset", offset)?,
                page_size: parse_non_negative("pageSize", page_size)?,
            }),
            _ => Err(ApiError::bad_request(
                "offset and pageSize must be supplied together",
            )),
        }
    }
}

fn parse_non_negative(name: &str, raw: &str) -> Result<usize, ApiError> {
    raw.trim().parse::<usize>().map_err(|_| {
        ApiError::bad_request(format!(
            "{name} must be a non-negative integer, got '{raw}'"
        ))
    })
}

/// `GET /api/v1/qpl[?offset=<int>&pageSize=<int>]`
pub async fn list_qpl(
    State(dataset): State<QplDataset>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let records = match params.range()? {
        ListRange::All => dataset.all(),
        ListRange::Slice { offset, page_size } => dataset.slice(offset, page_size),
    };
    debug!("Returning {} of {} records", records.len(), dataset.len());

    Ok(Json(records.to_vec()))
}

/// `GET /`
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// Fallback for unknown routes and unsupported methods
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
