use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api_client::FetchRange;
use crate::column_manager::ColumnRules;
use crate::data::value_format::{ValueFormatter, DEFAULT_DATE_FORMAT};

pub const API_URL_ENV: &str = "QPL_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the QPL server
    pub url: String,

    /// Request the whole collection instead of an offset/pageSize slice
    pub fetch_all: bool,

    /// Slice requested when `fetch_all` is false
    pub fetch_offset: usize,
    pub fetch_page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page when the viewer starts
    pub initial_page_size: usize,

    /// Choices cycled with +/-
    pub page_size_options: Vec<usize>,

    /// Fields that are never shown or searched
    pub exclude: Vec<String>,

    /// Preferred leading column order
    pub column_order: Vec<String>,

    /// Header text per field name
    pub column_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,

    /// chrono strftime pattern for date cells
    pub date_format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3080".to_string(),
            fetch_all: false,
            fetch_offset: 0,
            fetch_page_size: 100,
        }
    }
}

const DEFAULT_COLUMNS: [(&str, &str); 13] = [
    ("partNumber", "Part Number"),
    ("revision", "Part Revision"),
    ("partName", "Part Name"),
    ("toolDieSetNumber", "Tool / Die Set Number"),
    ("isQualified", "QPL"),
    ("openPo", "Open PO"),
    ("jurisdiction", "Part Jurisdiction"),
    ("classification", "Part Classification"),
    ("supplierName", "Supplier Company Name"),
    ("supplierCode", "Supplier Company Code"),
    ("ctq", "CTQ"),
    ("lastUpdatedBy", "QPL Last Updated By"),
    ("lastUpdatedDate", "QPL Last Updated Date"),
];

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_page_size: 20,
            page_size_options: vec![5, 10, 20, 50, 100],
            exclude: vec!["qplExpirationDate".to_string()],
            column_order: DEFAULT_COLUMNS.iter().map(|(k, _)| k.to_string()).collect(),
            column_labels: DEFAULT_COLUMNS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "View QPL Parts List".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl TableConfig {
    /// Configured page sizes, ascending, without zeros or duplicates
    pub fn page_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&s| s > 0)
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Next larger configured size, if any
    pub fn larger_page_size(&self, current: usize) -> Option<usize> {
        self.page_sizes().into_iter().find(|&s| s > current)
    }

    /// Next smaller configured size, if any
    pub fn smaller_page_size(&self, current: usize) -> Option<usize> {
        self.page_sizes().into_iter().rev().find(|&s| s < current)
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Fail at start-up rather than on the first date cell
        ValueFormatter::new(config.display.date_format.clone())?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("qpl-viewer").join("config.toml"))
    }

    /// `QPL_API_URL` wins over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.url = url.trim().to_string();
            }
        }
    }

    pub fn fetch_range(&self) -> Option<FetchRange> {
        if self.api.fetch_all {
            None
        } else {
            Some(FetchRange {
                offset: self.api.fetch_offset,
                page_size: self.api.fetch_page_size,
            })
        }
    }

    pub fn column_rules(&self) -> ColumnRules {
        ColumnRules {
            exclude: self.table.exclude.clone(),
            order: self.table.column_order.clone(),
            labels: self.table.column_labels.clone(),
        }
    }

    pub fn value_formatter(&self) -> Result<ValueFormatter> {
        ValueFormatter::new(self.display.date_format.clone())
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# QPL Viewer Configuration File
# Location: ~/.config/qpl-viewer/config.toml (Linux)
#           ~/Library/Application Support/qpl-viewer/config.toml (macOS)
#           %APPDATA%\qpl-viewer\config.toml (Windows)

[api]
# Base URL of the QPL server (QPL_API_URL and --url override this)
url = "http://localhost:3080"

# Fetch the whole collection in one request instead of a slice
fetch_all = false

# Slice requested on start-up when fetch_all = false
fetch_offset = 0
fetch_page_size = 100

[table]
# Rows per page on start-up
initial_page_size = 20

# Page sizes cycled with + and -
page_size_options = [5, 10, 20, 50, 100]

# Fields that are never displayed or searched
exclude = ["qplExpirationDate"]

# Leading column order; remaining fields follow in the order they first appear
column_order = [
    "partNumber",
    "revision",
    "partName",
    "toolDieSetNumber",
    "isQualified",
    "openPo",
    "jurisdiction",
    "classification",
    "supplierName",
    "supplierCode",
    "ctq",
    "lastUpdatedBy",
    "lastUpdatedDate",
]

# Header text per field; unmapped fields show their raw name
[table.column_labels]
classification = "Part Classification"
ctq = "CTQ"
isQualified = "QPL"
jurisdiction = "Part Jurisdiction"
lastUpdatedBy = "QPL Last Updated By"
lastUpdatedDate = "QPL Last Updated Date"
openPo = "Open PO"
partName = "Part Name"
partNumber = "Part Number"
revision = "Part Revision"
supplierCode = "Supplier Company Code"
supplierName = "Supplier Company Name"
toolDieSetNumber = "Tool / Die Set Number"

[display]
title = "View QPL Parts List"

# chrono strftime pattern used for date values (time of day is dropped)
date_format = "%-m/%-d/%Y"
"#
        .to_string()
    }
}
