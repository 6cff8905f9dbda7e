#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod traits;
pub mod types;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use types::{Item, ItemId, ScoredItem};
