//! TF-IDF similarity index
//!
//! The vectorizer learns a vocabulary of at most `max_features` terms from a
//! corpus (the most frequent terms overall, ties broken by term order) and
//! weights them with a smoothed IDF:
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! Each document row is raw term count times IDF, L2-normalized. Query text
//! is projected the same way; unknown terms are ignored.

use crate::tokenizer::tokenize;
use ahash::AHashMap;
use bioquery_core::{Error, Result, SparseVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_MAX_FEATURES: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TfidfConfig {
    /// Vocabulary cap
    pub max_features: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl TfidfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be at least 1".into()));
        }
        Ok(())
    }
}

/// Fitted vocabulary and IDF weights
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> column
    vocabulary: AHashMap<String, usize>,
    /// column -> term, sorted
    terms: Vec<String>,
    /// IDF weight per column
    idf: Vec<f32>,
}

/// One L2-normalized TF-IDF row per document
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    rows: Vec<SparseVector>,
    n_cols: usize,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF from `documents` and return the vectorizer
    /// together with the document matrix.
    pub fn fit_transform(documents: &[&str], config: &TfidfConfig) -> Result<(Self, TfidfMatrix)> {
        config.validate()?;
        info!("Building TF-IDF index over {} documents", documents.len());

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut corpus_freq: AHashMap<&str, u64> = AHashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *corpus_freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort_unstable();

        let vocabulary: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let mut doc_freq = vec![0u32; terms.len()];
        for tokens in &tokenized {
            let mut seen: Vec<usize> = tokens
                .iter()
                .filter_map(|t| vocabulary.get(t).copied())
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for col in seen {
                doc_freq[col] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, terms, idf };
        let rows: Vec<SparseVector> = tokenized.iter().map(|t| vectorizer.weigh(t)).collect();
        let matrix = TfidfMatrix {
            rows,
            n_cols: vectorizer.n_features(),
        };

        debug!(
            "TF-IDF vocabulary: {} terms, matrix {}x{}",
            vectorizer.n_features(),
            matrix.n_rows(),
            matrix.n_cols()
        );
        info!("Index built");

        Ok((vectorizer, matrix))
    }

    /// Project text into the fitted space
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let entries: Vec<(usize, f32)> = tokens
            .iter()
            .filter_map(|t| self.vocabulary.get(t).map(|&col| (col, self.idf[col])))
            .collect();
        // SparseVector::new sums repeated columns, giving count * idf
        SparseVector::new(self.n_features(), entries).normalized()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary terms in column order
    #[inline]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col])
    }
}

impl TfidfMatrix {
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Cosine similarity of `query` against every row, in row order
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.rows.iter().map(|row| row.cosine_similarity(query)).collect()
    }
}
