//! localrec-similarity
//!
//! Dense pairwise cosine similarity over pre-normalized item vectors and the
//! stable top-k ranking used by the recommender.

pub mod matrix;
pub mod rank;

pub use matrix::{cosine_matrix, dot, SimilarityMatrix};
pub use rank::rank_row;
