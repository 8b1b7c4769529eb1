use serde::{Deserialize, Serialize};

/// A sparse vector of (column, weight) pairs sorted by column
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from unordered entries. Duplicate columns are summed and zero
    /// weights dropped; columns must be below `dim`.
    #[must_use]
    pub fn new(dim: usize, mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(col, _)| col);

        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (col, weight) in entries {
            debug_assert!(col < dim, "column {} out of range {}", col, dim);
            if let Some((last, w)) = merged.last_mut() {
                if *last == col {
                    *w += weight;
                    continue;
                }
            }
            merged.push((col, weight));
        }
        merged.retain(|&(_, w)| w != 0.0);

        Self { dim, entries: merged }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn get(&self, col: usize) -> f32 {
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dense copy, mostly useful for debugging and tests
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dim];
        for &(col, w) in &self.entries {
            dense[col] = w;
        }
        dense
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            match ca.cmp(&cb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Compute cosine similarity with another vector.
    /// Zero vectors and mismatched dimensions score 0.
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        if self.dim != other.dim {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Normalize the vector to unit length
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for (_, w) in &mut self.entries {
                *w *= inv_norm;
            }
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}
