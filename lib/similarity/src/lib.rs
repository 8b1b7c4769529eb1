//! # bioquery Similarity
//!
//! Text similarity and ranking over an experiment dataset.
//!
//! ## Features
//!
//! - **TF-IDF Index**: Vocabulary capped at the most frequent terms, English stop words removed
//! - **Query Parameters**: Organism, tissue and condition flags from keyword matching
//! - **Ranking**: Cosine similarity blended with metadata matches, with a per-query summary
//!
//! ## Example
//!
//! ```rust
//! use bioquery_core::Dataset;
//! use bioquery_similarity::{generate_prediction, QueryParams, TfidfConfig, TfidfVectorizer};
//!
//! let csv = "Organism,Gravity_Condition,Experimental_Type,Abstract\n\
//!            Mus musculus,Microgravity,Spaceflight,Liver changes in mice\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//! let (vectorizer, matrix) =
//!     TfidfVectorizer::fit_transform(&dataset.abstracts(), &TfidfConfig::default()).unwrap();
//!
//! let query = "mouse liver";
//! let params = QueryParams::extract(query);
//! let result = generate_prediction(query, &params, &dataset, &vectorizer, &matrix).unwrap();
//! assert_eq!(result.matches.len(), 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Dataset   │────>│   TF-IDF    │────>│   Matrix    │
//! │ (abstracts) │     │ (vectorizer)│     │   (rows)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐            │
//! │    Query    │────>│  Predictor  │<───────────┘
//! │  (params)   │     │  (ranking)  │
//! └─────────────┘     └─────────────┘
//! ```

pub mod tokenizer;
pub mod tfidf;
pub mod query;
pub mod predict;

pub use tokenizer::{tokenize, ENGLISH_STOP_WORDS};
pub use tfidf::{TfidfConfig, TfidfMatrix, TfidfVectorizer, DEFAULT_MAX_FEATURES};
pub use query::{ParamKey, QueryParams};
pub use predict::{
    generate_prediction, Match, PredictionResult, Predictor, RankingConfig, Summary,
    DEFAULT_TOP_K,
};
