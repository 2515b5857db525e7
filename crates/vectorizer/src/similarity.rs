//! Dense pairwise cosine similarity between course vectors.
//!
//! Built once at startup, read-only afterwards. Rows are computed in
//! parallel; each entry is `dot(v_i, v_j) / (|v_i| * |v_j|)`, or 0 when
//! either vector has zero norm.

use crate::tfidf::TermVector;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Cosine similarity of two sparse vectors, 0 when either norm is 0
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// N×N symmetric similarity matrix, row-major
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the full matrix for `vectors`.
    ///
    /// The diagonal is exactly 1.0 for non-zero vectors and 0.0 otherwise.
    #[instrument(skip(vectors), fields(courses = vectors.len()))]
    pub fn build(vectors: &[TermVector]) -> Self {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(TermVector::norm).collect();
        let mut values = vec![0.0; size * size];

        if size > 0 {
            values
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    if norms[i] == 0.0 {
                        return;
                    }
                    for (j, cell) in row.iter_mut().enumerate() {
                        if i == j {
                            *cell = 1.0;
                        } else if norms[j] != 0.0 {
                            // Norm product is commutative, so (i, j) == (j, i) exactly
                            *cell = vectors[i].dot(&vectors[j]) / (norms[i] * norms[j]);
                        }
                    }
                });
        }

        debug!("Built {}x{} similarity matrix", size, size);
        Self { size, values }
    }

    /// Number of rows (= columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between positions `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Full similarity row for position `i`
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.values[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }
}
