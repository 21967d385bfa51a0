//! Index data model: raw term counts during accumulation, weighted postings
//! after the TF-IDF pass. The two phases get distinct types so the
//! count-to-weight transition is a visible barrier instead of an in-place
//! type change.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// One entry of a weighted postings list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// TF-IDF weight: `log10(N / df) * log10(1 + tf)`.
    pub weight: f32,
}

/// Three parallel token fields, aligned by `doc_id`. Read-only input to the
/// build; row `i` of every field describes the same code fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCollection {
    pub methnames: Vec<Vec<String>>,
    pub tokens: Vec<Vec<String>>,
    pub apiseqs: Vec<Vec<String>>,
}

impl DocumentCollection {
    /// Number of documents. The method-name field is the reference length
    /// and supplies the corpus size `N` for IDF.
    pub fn len(&self) -> usize {
        self.methnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methnames.is_empty()
    }

    /// Check that the three fields are aligned. A length mismatch would
    /// silently attribute terms to the wrong documents, so the build refuses
    /// to start on one.
    pub fn validate(&self) -> Result<()> {
        if self.tokens.len() != self.methnames.len() || self.apiseqs.len() != self.methnames.len()
        {
            bail!(
                "document fields are misaligned: {} method-name rows, {} token rows, {} api-sequence rows",
                self.methnames.len(),
                self.tokens.len(),
                self.apiseqs.len()
            );
        }
        Ok(())
    }
}

/// Accumulation-phase index: term -> doc_id -> raw occurrence count.
///
/// An inner entry exists iff the term occurred at least once in that
/// document, so the entry count per term is exactly the document frequency.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountIndex {
    counts: HashMap<String, HashMap<DocId, u32>>,
}

impl CountIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `term` in document `doc_id`.
    pub fn bump(&mut self, term: String, doc_id: DocId) {
        *self
            .counts
            .entry(term)
            .or_default()
            .entry(doc_id)
            .or_insert(0) += 1;
    }

    /// Pointwise-add another partial index into this one. Counter addition
    /// is commutative and associative, which is what makes sharded
    /// accumulation safe to merge in any order.
    pub fn merge(&mut self, other: CountIndex) {
        for (term, counts) in other.counts {
            let slot = self.counts.entry(term).or_default();
            for (doc_id, tf) in counts {
                *slot.entry(doc_id).or_insert(0) += tf;
            }
        }
    }

    pub fn num_terms(&self) -> usize {
        self.counts.len()
    }

    /// Raw occurrence count for a term in a document (0 if absent).
    pub fn count(&self, term: &str, doc_id: DocId) -> u32 {
        self.counts
            .get(term)
            .and_then(|c| c.get(&doc_id))
            .copied()
            .unwrap_or(0)
    }

    /// Document frequency: number of documents the term occurs in.
    pub fn df(&self, term: &str) -> usize {
        self.counts.get(term).map_or(0, |c| c.len())
    }

    /// The weighting barrier: consume the raw counts and produce the final
    /// weighted index.
    ///
    /// Per term, `idf = log10(N / df)` with `df` the postings size (>= 1 by
    /// construction, so no division by zero), and every count `tf` becomes
    /// `idf * log10(1 + tf)`. A term present in every document gets idf 0
    /// and all-zero weights, but keeps its postings. Each list is then
    /// sorted by weight descending, doc_id ascending on ties, which makes
    /// the output deterministic regardless of hash-map iteration order.
    pub fn into_weighted(self, num_docs: u32) -> Index {
        let mut postings = HashMap::with_capacity(self.counts.len());
        for (term, counts) in self.counts {
            let idf = (num_docs as f32 / counts.len() as f32).log10();
            let mut list: Vec<Posting> = counts
                .into_iter()
                .map(|(doc_id, tf)| Posting {
                    doc_id,
                    weight: idf * (1.0 + tf as f32).log10(),
                })
                .collect();
            list.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.doc_id.cmp(&b.doc_id)));
            postings.insert(term, list);
        }
        Index { postings, num_docs }
    }
}

/// The finished index: term -> postings sorted by descending weight.
/// Immutable after the weighting pass; a rebuild always starts from scratch.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub postings: HashMap<String, Vec<Posting>>,
    pub num_docs: u32,
}

impl Index {
    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_counts_term_frequency() {
        let mut idx = CountIndex::new();
        idx.bump("load".into(), 0);
        idx.bump("load".into(), 0);
        idx.bump("load".into(), 3);
        assert_eq!(idx.count("load", 0), 2);
        assert_eq!(idx.count("load", 3), 1);
        assert_eq!(idx.df("load"), 2);
    }

    #[test]
    fn merge_adds_counters_pointwise() {
        let mut a = CountIndex::new();
        a.bump("store".into(), 0);
        a.bump("store".into(), 1);
        let mut b = CountIndex::new();
        b.bump("store".into(), 1);
        b.bump("exit".into(), 2);
        a.merge(b);
        assert_eq!(a.count("store", 0), 1);
        assert_eq!(a.count("store", 1), 2);
        assert_eq!(a.count("exit", 2), 1);
    }

    #[test]
    fn weighting_matches_reference_values() {
        // N = 10, "store" in 2 of 10 docs with tf 1 and 3.
        let mut idx = CountIndex::new();
        idx.bump("store".into(), 4);
        for _ in 0..3 {
            idx.bump("store".into(), 7);
        }
        let weighted = idx.into_weighted(10);
        let postings = weighted.postings("store").unwrap();
        let idf = 5.0f32.log10();
        // tf = 3 outweighs tf = 1, so doc 7 ranks first
        assert_eq!(postings[0].doc_id, 7);
        assert!((postings[0].weight - idf * 4.0f32.log10()).abs() < 1e-6);
        assert_eq!(postings[1].doc_id, 4);
        assert!((postings[1].weight - idf * 2.0f32.log10()).abs() < 1e-6);
    }

    #[test]
    fn universal_term_gets_zero_weight_but_keeps_postings() {
        let mut idx = CountIndex::new();
        for doc in 0..5 {
            idx.bump("check".into(), doc);
        }
        let weighted = idx.into_weighted(5);
        let postings = weighted.postings("check").unwrap();
        assert_eq!(postings.len(), 5);
        assert!(postings.iter().all(|p| p.weight == 0.0));
        // zero-weight ties fall back to ascending doc_id
        let ids: Vec<DocId> = postings.iter().map(|p| p.doc_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn misaligned_collection_is_rejected() {
        let collection = DocumentCollection {
            methnames: vec![vec!["read".into()]],
            tokens: vec![],
            apiseqs: vec![vec![]],
        };
        let err = collection.validate().unwrap_err();
        assert!(err.to_string().contains("misaligned"));
    }
}
