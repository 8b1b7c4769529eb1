//! Ranking of dataset rows against a query
//!
//! Each row gets a weighted score combining text similarity (cosine between
//! the projected query and the row's TF-IDF vector) with a metadata score
//! (fraction of extracted query parameters the row satisfies). Rows scoring
//! zero are dropped, ties keep dataset order.

use crate::query::{ParamKey, QueryParams};
use crate::tfidf::{TfidfMatrix, TfidfVectorizer};
use bioquery_core::{Dataset, Error, Record, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const DEFAULT_TOP_K: usize = 5;
pub const SNIPPET_CHARS: usize = 240;
const ELLIPSIS: &str = "...";

const ORGANISM_ALIASES: &[(&str, &[&str])] = &[
    ("mouse", &["mouse", "mice", "mus musculus"]),
    ("rat", &["rat", "rattus"]),
    ("human", &["human", "homo sapiens"]),
];

const CONDITION_ALIASES: &[(&str, &[&str])] = &[
    ("microgravity", &["microgravity", "spaceflight", "space flight"]),
    ("radiation", &["radiation", "irradiat"]),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingConfig {
    /// Maximum number of matches returned
    pub top_k: usize,
    pub text_weight: f32,
    pub metadata_weight: f32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            text_weight: 0.7,
            metadata_weight: 0.3,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".into()));
        }
        if self.text_weight < 0.0 || self.metadata_weight < 0.0 {
            return Err(Error::InvalidConfig("weights cannot be negative".into()));
        }
        if self.text_weight + self.metadata_weight <= 0.0 {
            return Err(Error::InvalidConfig("total weight cannot be zero".into()));
        }
        Ok(())
    }
}

/// One ranked row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub rank: usize,
    /// Row position in the source file
    pub row: usize,
    pub score: f32,
    pub text_score: f32,
    pub metadata_score: f32,
    pub organism: Option<String>,
    pub gravity_condition: Option<String>,
    pub experimental_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub snippet: String,
}

/// Aggregates over the returned matches
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub organisms: BTreeMap<String, usize>,
    pub conditions: BTreeMap<String, usize>,
    pub dominant_organism: Option<String>,
    pub mean_score: f32,
    pub top_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub query: String,
    pub params: QueryParams,
    /// Rows in the filtered dataset
    pub total_records: usize,
    /// Rows with a non-zero score before truncation to `top_k`
    pub candidates: usize,
    pub matches: Vec<Match>,
    pub summary: Summary,
}

/// Scores rows of a dataset against queries using a fitted index
pub struct Predictor<'a> {
    dataset: &'a Dataset,
    vectorizer: &'a TfidfVectorizer,
    matrix: &'a TfidfMatrix,
    config: RankingConfig,
}

impl<'a> Predictor<'a> {
    pub fn new(
        dataset: &'a Dataset,
        vectorizer: &'a TfidfVectorizer,
        matrix: &'a TfidfMatrix,
        config: RankingConfig,
    ) -> Result<Self> {
        config.validate()?;
        if matrix.n_rows() != dataset.len() {
            return Err(Error::InvalidConfig(format!(
                "index has {} rows but dataset has {}",
                matrix.n_rows(),
                dataset.len()
            )));
        }
        Ok(Self { dataset, vectorizer, matrix, config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank the dataset for `query` given its extracted parameters
    pub fn predict(&self, query: &str, params: &QueryParams) -> PredictionResult {
        let query_vector = self.vectorizer.transform(query);
        if query_vector.is_zero() {
            debug!("Query has no terms in the index vocabulary");
        }
        let text_scores = self.matrix.similarities(&query_vector);

        let mut scored: Vec<(usize, f32, f32, f32)> = self
            .dataset
            .iter()
            .zip(text_scores)
            .enumerate()
            .filter_map(|(idx, (record, text_score))| {
                let metadata_score = metadata_score(record, params);
                let score = self.config.text_weight * text_score
                    + self.config.metadata_weight * metadata_score;
                (score > 0.0).then_some((idx, score, text_score, metadata_score))
            })
            .collect();

        // stable sort keeps dataset order on ties
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let candidates = scored.len();
        scored.truncate(self.config.top_k);

        let matches: Vec<Match> = scored
            .into_iter()
            .enumerate()
            .filter_map(|(i, (idx, score, text_score, metadata_score))| {
                let record = self.dataset.get(idx)?;
                Some(Match {
                    rank: i + 1,
                    row: record.row,
                    score,
                    text_score,
                    metadata_score,
                    organism: record.organism().map(str::to_string),
                    gravity_condition: record.gravity_condition().map(str::to_string),
                    experimental_type: record.experimental_type().map(str::to_string),
                    title: record.title().map(str::to_string),
                    link: record.link().map(str::to_string),
                    snippet: snippet(&record.abstract_text, SNIPPET_CHARS),
                })
            })
            .collect();

        if matches.is_empty() {
            warn!("No rows matched the query");
        }
        info!("Ranked {} candidates, returning {}", candidates, matches.len());

        PredictionResult {
            query: query.to_string(),
            params: params.clone(),
            total_records: self.dataset.len(),
            candidates,
            summary: summarize(&matches),
            matches,
        }
    }
}

/// Rank `dataset` for `query` with the default ranking configuration.
pub fn generate_prediction(
    query: &str,
    params: &QueryParams,
    dataset: &Dataset,
    vectorizer: &TfidfVectorizer,
    matrix: &TfidfMatrix,
) -> Result<PredictionResult> {
    let predictor = Predictor::new(dataset, vectorizer, matrix, RankingConfig::default())?;
    Ok(predictor.predict(query, params))
}

fn contains_any(haystack: Option<&str>, needles: &[&str]) -> bool {
    haystack
        .map(|h| {
            let h = h.to_lowercase();
            needles.iter().any(|n| h.contains(n))
        })
        .unwrap_or(false)
}

fn aliases<'t>(table: &'t [(&str, &'t [&'t str])], value: &'t str) -> Vec<&'t str> {
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, a)| a.to_vec())
        .unwrap_or_else(|| vec![value])
}

/// Whether `record` satisfies a single query parameter
pub fn param_matches(record: &Record, key: ParamKey, value: &str) -> bool {
    let value = value.to_lowercase();
    match key {
        ParamKey::Organism => {
            contains_any(record.organism(), &aliases(ORGANISM_ALIASES, &value))
        }
        ParamKey::Tissue => {
            contains_any(record.title(), &[value.as_str()])
                || contains_any(Some(record.abstract_text.as_str()), &[value.as_str()])
        }
        ParamKey::Condition => {
            let needles = aliases(CONDITION_ALIASES, &value);
            contains_any(record.gravity_condition(), &needles)
                || contains_any(record.experimental_type(), &needles)
        }
    }
}

/// Fraction of `params` the record satisfies; 0 without params
pub fn metadata_score(record: &Record, params: &QueryParams) -> f32 {
    if params.is_empty() {
        return 0.0;
    }
    let hits = params
        .iter()
        .filter(|(key, value)| param_matches(record, *key, value))
        .count();
    hits as f32 / params.len() as f32
}

fn snippet(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(ELLIPSIS.len())).collect();
    cut.push_str(ELLIPSIS);
    cut
}

fn summarize(matches: &[Match]) -> Summary {
    if matches.is_empty() {
        return Summary::default();
    }

    let mut organisms: BTreeMap<String, usize> = BTreeMap::new();
    let mut conditions: BTreeMap<String, usize> = BTreeMap::new();
    for m in matches {
        if let Some(organism) = &m.organism {
            *organisms.entry(organism.clone()).or_insert(0) += 1;
        }
        if let Some(condition) = m.gravity_condition.as_ref().or(m.experimental_type.as_ref()) {
            *conditions.entry(condition.clone()).or_insert(0) += 1;
        }
    }

    // highest count, first name alphabetically on ties
    let dominant_organism = organisms
        .iter()
        .fold(None::<(&String, usize)>, |best, (name, &count)| match best {
            Some((_, c)) if c >= count => best,
            _ => Some((name, count)),
        })
        .map(|(name, _)| name.clone());

    let mean_score = matches.iter().map(|m| m.score).sum::<f32>() / matches.len() as f32;
    let top_score = matches.first().map(|m| m.score).unwrap_or(0.0);

    Summary {
        organisms,
        conditions,
        dominant_organism,
        mean_score,
        top_score,
    }
}
