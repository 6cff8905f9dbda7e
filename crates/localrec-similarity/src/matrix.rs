use tracing::debug;

/// Symmetric N x N similarity scores, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Score between rows `i` and `j`, `None` when either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        (i < self.n && j < self.n).then(|| self.scores[i * self.n + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.n).then(|| &self.scores[i * self.n..(i + 1) * self.n])
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

/// Cosine similarity of unit-length (or all-zero) vectors, computed as a dot
/// product over the upper triangle and mirrored. A zero vector scores 0
/// against everything, itself included.
pub fn cosine_matrix(vectors: &[Vec<f32>]) -> SimilarityMatrix {
    let n = vectors.len();
    let mut scores = vec![0f32; n * n];
    for i in 0..n {
        for j in i..n {
            let s = dot(&vectors[i], &vectors[j]);
            scores[i * n + j] = s;
            scores[j * n + i] = s;
        }
    }
    debug!(items = n, "computed similarity matrix");
    SimilarityMatrix { n, scores }
}
