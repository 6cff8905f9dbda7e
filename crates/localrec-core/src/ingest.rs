//! Catalog sources: CSV and JSON files plus an in-memory fixture.
//!
//! Every failure is reported as `Error::Ingestion` carrying the path and the
//! offending row so the caller can fix the data and retry.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::CatalogSource;
use crate::types::Item;

/// Tabular catalog with a header row. Required columns: `product_id`,
/// `name`, `category`, `description`, `price`; others are ignored.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }
}

impl CatalogSource for CsvSource {
    fn load(&self) -> Result<Vec<Item>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| Error::ingestion(&self.path, format!("failed to open CSV: {e}")))?;
        let mut items = Vec::new();
        for (row, record) in reader.deserialize::<Item>().enumerate() {
            // header is line 1
            let line = row + 2;
            let item = record.map_err(|e| Error::ingestion(&self.path, format!("malformed row at line {line}: {e}")))?;
            validate(&self.path, &item, line)?;
            items.push(item);
        }
        debug!(path = %self.path.display(), rows = items.len(), "read CSV catalog");
        Ok(items)
    }

    fn describe(&self) -> String { format!("csv:{}", self.path.display()) }
}

/// A JSON array of item objects using the same field names as the CSV header.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl CatalogSource for JsonSource {
    fn load(&self) -> Result<Vec<Item>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| Error::ingestion(&self.path, format!("failed to read file: {e}")))?;
        let items: Vec<Item> = serde_json::from_str(&raw).map_err(|e| Error::ingestion(&self.path, format!("invalid JSON: {e}")))?;
        for (idx, item) in items.iter().enumerate() {
            validate(&self.path, item, idx + 1)?;
        }
        debug!(path = %self.path.display(), rows = items.len(), "read JSON catalog");
        Ok(items)
    }

    fn describe(&self) -> String { format!("json:{}", self.path.display()) }
}

/// Items held in memory; useful for fixtures and embedding applications.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    items: Vec<Item>,
}

impl MemorySource {
    pub fn new(items: Vec<Item>) -> Self { Self { items } }
}

impl CatalogSource for MemorySource {
    fn load(&self) -> Result<Vec<Item>> { Ok(self.items.clone()) }

    fn describe(&self) -> String { format!("memory:{} items", self.items.len()) }
}

/// Pick a source by file extension: `.json` reads JSON, anything else CSV.
pub fn source_for_path(path: impl Into<PathBuf>) -> Box<dyn CatalogSource> {
    let path = path.into();
    let is_json = path.extension().and_then(|s| s.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { Box::new(JsonSource::new(path)) } else { Box::new(CsvSource::new(path)) }
}

fn validate(path: &Path, item: &Item, row: usize) -> Result<()> {
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(Error::ingestion(path, format!("row {row} (product {}) has invalid price {}", item.id, item.price)));
    }
    Ok(())
}
