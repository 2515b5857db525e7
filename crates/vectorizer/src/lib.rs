//! # Vectorizer Crate
//!
//! Turns course text into TF-IDF term vectors and precomputes the pairwise
//! cosine similarity matrix the recommendation engine reads from.
//!
//! ## Components
//!
//! - **tokenizer** / **stop_words**: lowercase word tokens minus English stop words
//! - **tfidf**: vocabulary, idf and sparse [`TermVector`]s
//! - **similarity**: dense symmetric [`SimilarityMatrix`]
//!
//! ## Example Usage
//!
//! ```ignore
//! use vectorizer::{SimilarityMatrix, TfidfVectorizer};
//!
//! let model = TfidfVectorizer::new().fit_transform(catalog.text_features());
//! let matrix = SimilarityMatrix::build(&model.vectors);
//! let score = matrix.get(0, 1);
//! ```

pub mod stop_words;
pub mod tokenizer;
pub mod tfidf;
pub mod similarity;

pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use tfidf::{TermVector, TfidfModel, TfidfVectorizer, Vocabulary};
pub use tokenizer::tokenize;
