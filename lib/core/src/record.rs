use serde::{Deserialize, Serialize};

/// Placeholder the source data uses for an unknown value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Experimental types that qualify a record even without a gravity condition.
pub const QUALIFYING_EXPERIMENT_TYPES: [&str; 2] = ["Radiation", "Microgravity"];

/// One experiment row of the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Position among the data rows of the source file (0-based)
    pub row: usize,
    pub organism: Option<String>,
    pub gravity_condition: Option<String>,
    pub experimental_type: Option<String>,
    /// Free-text abstract, empty when the source cell is missing
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A cell counts as present when it has non-blank content other than `N/A`.
#[inline]
pub fn is_present(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            !v.is_empty() && v != NOT_AVAILABLE
        }
        None => false,
    }
}

impl Record {
    /// Keep iff the organism is known and the row is tied to a gravity
    /// condition or to a radiation/microgravity experiment.
    pub fn is_included(&self) -> bool {
        if !is_present(self.organism.as_deref()) {
            return false;
        }

        is_present(self.gravity_condition.as_deref())
            || self
                .experimental_type
                .as_deref()
                // exact, untrimmed match like the source table's categories
                .map(|t| QUALIFYING_EXPERIMENT_TYPES.contains(&t))
                .unwrap_or(false)
    }

    /// Organism with absent values collapsed to `None`
    pub fn organism(&self) -> Option<&str> {
        present(self.organism.as_deref())
    }

    pub fn gravity_condition(&self) -> Option<&str> {
        present(self.gravity_condition.as_deref())
    }

    pub fn experimental_type(&self) -> Option<&str> {
        present(self.experimental_type.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        present(self.title.as_deref())
    }

    pub fn link(&self) -> Option<&str> {
        present(self.link.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    if is_present(value) {
        value.map(str::trim)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(organism: &str, gravity: &str, exp_type: &str) -> Record {
        let cell = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        Record {
            row: 0,
            organism: cell(organism),
            gravity_condition: cell(gravity),
            experimental_type: cell(exp_type),
            abstract_text: String::new(),
            title: None,
            link: None,
        }
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(Some("Mus musculus")));
        assert!(!is_present(Some("N/A")));
        assert!(!is_present(Some("  N/A ")));
        assert!(!is_present(Some("   ")));
        assert!(!is_present(None));
    }

    #[test]
    fn test_included_with_gravity_condition() {
        assert!(record("Mus musculus", "Microgravity", "N/A").is_included());
        assert!(record("Homo sapiens", "Hypergravity", "").is_included());
    }

    #[test]
    fn test_included_with_qualifying_experiment_type() {
        assert!(record("Rattus norvegicus", "N/A", "Radiation").is_included());
        assert!(record("Rattus norvegicus", "", "Microgravity").is_included());
    }

    #[test]
    fn test_excluded_without_organism() {
        assert!(!record("N/A", "Microgravity", "Radiation").is_included());
        assert!(!record("", "Microgravity", "Radiation").is_included());
    }

    #[test]
    fn test_excluded_with_other_experiment_type() {
        assert!(!record("Mus musculus", "N/A", "Genomics").is_included());
        // exact match only
        assert!(!record("Mus musculus", "N/A", "radiation").is_included());
        assert!(!record("Mus musculus", "N/A", "Radiation ").is_included());
    }

    #[test]
    fn test_accessors_hide_sentinel() {
        let r = record("Mus musculus", "N/A", "Radiation");
        assert_eq!(r.organism(), Some("Mus musculus"));
        assert_eq!(r.gravity_condition(), None);
        assert_eq!(r.experimental_type(), Some("Radiation"));
    }
}
