//! TF-IDF term vectors over a corpus-wide vocabulary.
//!
//! ## Weighting
//! - tf(t, d) = raw count of `t` in document `d`
//! - idf(t) = ln((1 + N) / (1 + df(t)))
//!
//! A term present in every document gets idf 0; a term unique to one
//! document gets the largest idf in the corpus. Rows are L2-normalized by
//! default.

use crate::tokenizer::tokenize;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

// =============================================================================
// Vocabulary
// =============================================================================

/// Distinct corpus terms with stable column positions (lexicographic order)
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_terms(terms: BTreeSet<String>) -> Self {
        let terms: Vec<String> = terms.into_iter().collect();
        let columns = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        Self { terms, columns }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

// =============================================================================
// TermVector
// =============================================================================

/// Sparse weighted term vector.
///
/// Entries are `(column, weight)` sorted by column with no zero weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    /// Build from arbitrary entries; sorts by column and drops zero weights
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_by_key(|&(column, _)| column);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at a column (0.0 when absent)
    pub fn weight(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0.0)
    }

    /// Dot product by merging the two sorted entry lists.
    ///
    /// Products are summed in ascending column order, so `a.dot(b)` and
    /// `b.dot(a)` are bit-identical.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
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

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }
}

// =============================================================================
// TfidfVectorizer
// =============================================================================

/// Output of [`TfidfVectorizer::fit_transform`]: one vector per document
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    pub vocabulary: Vocabulary,
    /// idf per vocabulary column
    pub idf: Vec<f64>,
    /// One vector per input document, in input order
    pub vectors: Vec<TermVector>,
}

impl TfidfModel {
    /// Dimensionality shared by every vector
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Builds TF-IDF vectors from a static corpus
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    normalize: bool,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self { normalize: true }
    }

    /// Toggle L2 row normalization (default: on)
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Learn the vocabulary and idf from `documents` and vectorize them.
    ///
    /// An empty corpus yields an empty vocabulary and no vectors.
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> TfidfModel {
        let n_docs = documents.len();

        // Term counts per document
        let counts: Vec<HashMap<String, usize>> = documents
            .par_iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for token in tokenize(doc.as_ref()) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let terms: BTreeSet<String> = counts
            .iter()
            .flat_map(|doc| doc.keys().cloned())
            .collect();
        let vocabulary = Vocabulary::from_terms(terms);

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                if let Some(column) = vocabulary.column_of(term) {
                    doc_freq[column] += 1;
                }
            }
        }
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| inverse_document_frequency(n_docs, df))
            .collect();

        let vectors: Vec<TermVector> = counts
            .par_iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .filter_map(|(term, &tf)| {
                        let column = vocabulary.column_of(term)?;
                        Some((column, tf as f64 * idf[column]))
                    })
                    .collect();
                let mut vector = TermVector::from_entries(entries);
                if self.normalize {
                    vector.normalize();
                }
                vector
            })
            .collect();

        debug!(
            "Vectorized {} documents over {} terms",
            n_docs,
            vocabulary.len()
        );

        TfidfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

fn inverse_document_frequency(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln()
}
