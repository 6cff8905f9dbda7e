//! localrec-engine
//!
//! Content-based recommender: owns the catalog snapshot and the trained
//! TF-IDF / similarity model, and answers top-k queries against them.

pub mod engine;

pub use engine::{EngineStatus, RecommendationEngine, TrainedModel};
pub use localrec_core::config::TrainPolicy;
