//! Keyword flags extracted from a free-text query
//!
//! Extraction is plain substring containment on the lowercased query. Rules
//! run in table order and a later rule for the same key overwrites an earlier
//! one, so "rat" wins over "mouse" and "human" over both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKey {
    Organism,
    Tissue,
    Condition,
}

impl ParamKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::Organism => "organism",
            ParamKey::Tissue => "tissue",
            ParamKey::Condition => "condition",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (needles, key, value)
const KEYWORD_RULES: &[(&[&str], ParamKey, &str)] = &[
    (&["mouse", "mice"], ParamKey::Organism, "mouse"),
    (&["rat"], ParamKey::Organism, "rat"),
    (&["human"], ParamKey::Organism, "human"),
    (&["liver"], ParamKey::Tissue, "liver"),
    (&["heart"], ParamKey::Tissue, "heart"),
    (&["microgravity"], ParamKey::Condition, "microgravity"),
    (&["radiation"], ParamKey::Condition, "radiation"),
];

/// Recognised query keys and their values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<ParamKey, String>);

impl QueryParams {
    /// Extract parameters from a raw query; case-insensitive.
    pub fn extract(query: &str) -> Self {
        let query = query.to_lowercase();
        let mut params = BTreeMap::new();

        for (needles, key, value) in KEYWORD_RULES {
            if needles.iter().any(|n| query.contains(n)) {
                params.insert(*key, value.to_string());
            }
        }

        Self(params)
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn insert(&mut self, key: ParamKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_liver_microgravity() {
        let params = QueryParams::extract("mouse liver microgravity");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get(ParamKey::Organism), Some("mouse"));
        assert_eq!(params.get(ParamKey::Tissue), Some("liver"));
        assert_eq!(params.get(ParamKey::Condition), Some("microgravity"));
    }

    #[test]
    fn test_no_keywords() {
        let params = QueryParams::extract("plant root growth");
        assert!(params.is_empty());
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");
    }

    #[test]
    fn test_case_insensitive() {
        let params = QueryParams::extract("Effects of RADIATION on Mice");
        assert_eq!(params.get(ParamKey::Organism), Some("mouse"));
        assert_eq!(params.get(ParamKey::Condition), Some("radiation"));
    }

    #[test]
    fn test_later_rule_wins_within_key() {
        let params = QueryParams::extract("mouse versus human heart liver");
        assert_eq!(params.get(ParamKey::Organism), Some("human"));
        assert_eq!(params.get(ParamKey::Tissue), Some("heart"));
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let a = QueryParams::extract("microgravity liver mouse");
        let b = QueryParams::extract("mouse liver microgravity");
        assert_eq!(a, b);
        assert_eq!(a, QueryParams::extract("microgravity liver mouse"));
    }

    #[test]
    fn test_keys_independent() {
        let tissue_only = QueryParams::extract("heart");
        let both = QueryParams::extract("heart radiation");
        assert_eq!(tissue_only.get(ParamKey::Tissue), both.get(ParamKey::Tissue));
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_substring_match() {
        // plain containment: "rat" inside "migration"
        let params = QueryParams::extract("cell migration");
        assert_eq!(params.get(ParamKey::Organism), Some("rat"));
    }

    #[test]
    fn test_json_shape() {
        let params = QueryParams::extract("rat heart");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"organism": "rat", "tissue": "heart"})
        );
        assert_eq!(params.to_string(), "{organism: rat, tissue: heart}");
    }
}
