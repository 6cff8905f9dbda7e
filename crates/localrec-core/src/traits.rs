use crate::error::Result;
use crate::types::Item;

/// Anything that can produce a catalog snapshot (file, API, fixture).
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Vec<Item>>;
    /// Human-readable origin used in logs and error context.
    fn describe(&self) -> String;
}

/// Turns free text into normalized terms. Output order follows the text.
pub trait TermAnalyzer: Send + Sync {
    fn terms(&self, text: &str) -> Vec<String>;
}
