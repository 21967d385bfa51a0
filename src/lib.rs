//! TF-IDF inverted index builder for code-fragment corpora.
//!
//! A corpus is a [`DocumentCollection`]: three parallel token fields per
//! document (method-name tokens, free tokens, API call sequence). The build
//! normalizes every raw token (camel-split upstream, underscore-split,
//! length/stopword filtered, stemmed, synonym-collapsed), accumulates raw
//! term frequencies per document, then replaces counts by TF-IDF weights and
//! sorts each postings list. The finished [`Index`] is persisted once,
//! complete, through [`persist`].

pub mod build;
pub mod index;
pub mod persist;
pub mod preprocess;
pub mod synonyms;
pub mod tokenizer;
pub mod vocab;

pub use index::{CountIndex, DocId, DocumentCollection, Index, Posting};
