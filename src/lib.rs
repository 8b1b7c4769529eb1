//! # bioquery
//!
//! Answers a free-text space biology query against a CSV table of experiment
//! records. Each run loads the table, keeps the rows with a known organism and
//! a gravity or radiation context, builds a TF-IDF index over the abstracts and
//! prints the best matching rows as JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! bioquery "mouse liver microgravity" --data public/data/nasa_papers_meta_cleaned.csv
//! ```
//!
//! ## Crate Structure
//!
//! - `bioquery-core` - Records, CSV loading and filtering, sparse vectors
//! - `bioquery-similarity` - TF-IDF index, query parameters, ranking

pub use bioquery_core::{Dataset, Error, Record, Result, SparseVector};
pub use bioquery_similarity::{
    generate_prediction, Match, ParamKey, PredictionResult, Predictor, QueryParams,
    RankingConfig, Summary, TfidfConfig, TfidfMatrix, TfidfVectorizer,
};

use std::path::Path;
use tracing::info;

/// Everything one invocation needs to answer a query
pub struct Engine {
    dataset: Dataset,
    vectorizer: TfidfVectorizer,
    matrix: TfidfMatrix,
}

impl Engine {
    /// Load the dataset from `path` and build its index
    pub fn load<P: AsRef<Path>>(path: P, tfidf: &TfidfConfig) -> Result<Self> {
        Self::from_dataset(Dataset::load(path)?, tfidf)
    }

    pub fn from_dataset(dataset: Dataset, tfidf: &TfidfConfig) -> Result<Self> {
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&dataset.abstracts(), tfidf)?;
        info!("Data and model ready");
        Ok(Self { dataset, vectorizer, matrix })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn matrix(&self) -> &TfidfMatrix {
        &self.matrix
    }

    /// Extract parameters from `query` and rank the dataset
    pub fn query(&self, query: &str, ranking: RankingConfig) -> Result<PredictionResult> {
        let query = query.to_lowercase();
        let params = QueryParams::extract(&query);
        info!("Params parsed: {}", params);

        let predictor = Predictor::new(&self.dataset, &self.vectorizer, &self.matrix, ranking)?;
        let result = predictor.predict(&query, &params);
        info!("Prediction complete");
        Ok(result)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Dataset, Engine, Error, PredictionResult, QueryParams, RankingConfig, Record, Result,
        TfidfConfig,
    };
}
