//! TF-IDF vector space over a corpus of composed item texts.
//!
//! weight(t, d) = count(t, d) * (ln((1 + N) / (1 + df(t))) + 1), then each
//! row is L2-normalized. Rows with no surviving terms stay all-zero.
//! Dimension indices follow lexicographic term order, so identical corpora
//! always produce identical vectors.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use localrec_core::config::VectorizerSettings;
use localrec_core::traits::TermAnalyzer;
use localrec_core::{Error, Result};

use crate::analyzer::SimpleAnalyzer;

#[derive(Clone)]
pub struct TfidfVectorizer {
    analyzer: Arc<dyn TermAnalyzer>,
}

impl TfidfVectorizer {
    pub fn new(analyzer: Arc<dyn TermAnalyzer>) -> Self { Self { analyzer } }

    pub fn from_settings(settings: &VectorizerSettings) -> Self {
        Self::new(Arc::new(SimpleAnalyzer::from_settings(settings)))
    }

    /// Fit vocabulary and IDF on `corpus` and project every document.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> Result<VectorSpace> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let docs: Vec<Vec<String>> = corpus.iter().map(|d| self.analyzer.terms(d.as_ref())).collect();

        let terms: BTreeSet<&str> = docs.iter().flatten().map(String::as_str).collect();
        if terms.is_empty() {
            return Err(Error::EmptyVocabulary);
        }
        let vocabulary: BTreeMap<String, usize> =
            terms.into_iter().enumerate().map(|(idx, term)| (term.to_string(), idx)).collect();

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &docs {
            let unique: BTreeSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for idx in unique {
                df[idx] += 1;
            }
        }
        let n = docs.len() as f64;
        let idf: Vec<f64> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0).collect();

        let mut space = VectorSpace { vocabulary, idf, vectors: Vec::with_capacity(docs.len()) };
        space.vectors = docs.iter().map(|doc| space.project(doc)).collect();
        debug!(documents = docs.len(), dimension = space.dimension(), "fitted tf-idf space");
        Ok(space)
    }

    /// Project unseen text into a fitted space; unknown terms are ignored.
    pub fn transform(&self, space: &VectorSpace, text: &str) -> Vec<f32> {
        space.project(&self.analyzer.terms(text))
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self { Self::new(Arc::new(SimpleAnalyzer::default())) }
}

#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<Vec<f32>>,
}

impl VectorSpace {
    pub fn dimension(&self) -> usize { self.vocabulary.len() }

    pub fn len(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> { &self.vocabulary }

    /// Terms in dimension order.
    pub fn terms(&self) -> impl Iterator<Item = &str> { self.vocabulary.keys().map(String::as_str) }

    pub fn idf(&self, term: &str) -> Option<f64> { self.vocabulary.get(term).map(|&idx| self.idf[idx]) }

    pub fn vector(&self, pos: usize) -> Option<&[f32]> { self.vectors.get(pos).map(Vec::as_slice) }

    pub fn vectors(&self) -> &[Vec<f32>] { &self.vectors }

    fn project(&self, terms: &[String]) -> Vec<f32> {
        let mut weights = vec![0f64; self.dimension()];
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                weights[idx] += self.idf[idx];
            }
        }
        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }
        weights.into_iter().map(|w| w as f32).collect()
    }
}
