use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use localrec_core::config::VectorizerSettings;
use localrec_core::traits::TermAnalyzer;

use crate::stopwords;

/// Tantivy pipeline: split on every non-alphanumeric char, optionally
/// lowercase, then drop stop words and terms shorter than `min_term_len`.
#[derive(Clone)]
pub struct SimpleAnalyzer {
    analyzer: TextAnalyzer,
    min_term_len: usize,
}

impl SimpleAnalyzer {
    pub fn from_settings(settings: &VectorizerSettings) -> Self {
        let stop_words = stopwords::resolve(&settings.stop_words, settings.lowercase);
        let analyzer = match (settings.lowercase, stop_words) {
            (true, Some(words)) => TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(LowerCaser)
                .filter(StopWordFilter::remove(words))
                .build(),
            (true, None) => TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser).build(),
            (false, Some(words)) => TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(StopWordFilter::remove(words))
                .build(),
            (false, None) => TextAnalyzer::from(SimpleTokenizer::default()),
        };
        Self { analyzer, min_term_len: settings.min_term_len.max(1) }
    }
}

impl Default for SimpleAnalyzer {
    fn default() -> Self { Self::from_settings(&VectorizerSettings::default()) }
}

impl TermAnalyzer for SimpleAnalyzer {
    fn terms(&self, text: &str) -> Vec<String> {
        // token_stream needs &mut; clones share the boxed pipeline definition
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            let term = &stream.token().text;
            if term.chars().count() >= self.min_term_len {
                out.push(term.clone());
            }
        }
        out
    }
}
