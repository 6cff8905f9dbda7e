//! localrec-text
//!
//! Text side of the recommender: per-item feature text, tokenization with
//! stop-word removal, and the TF-IDF vector space fitted over a catalog.

pub mod analyzer;
pub mod compose;
pub mod stopwords;
pub mod vectorize;

pub use analyzer::SimpleAnalyzer;
pub use compose::compose;
pub use vectorize::{TfidfVectorizer, VectorSpace};
