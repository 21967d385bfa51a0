//! Index builder: field-by-field accumulation of raw term counts, followed
//! by the weighting barrier.

use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::index::{CountIndex, DocId, DocumentCollection, Index};
use crate::tokenizer::normalize;

/// Stopword added on top of the base set for the free-token pass only.
/// "new" is all noise among free tokens (`new Foo()` everywhere) but still
/// meaningful inside method names ("newInstance" should index as "creat"),
/// so the method-name pass must run without it.
pub const TOKEN_PASS_STOPWORD: &str = "new";

/// The only token the API-sequence pass indexes: a per-document marker that
/// the fragment works with an array/collection type.
const ARRAY_MARKER: &str = "[]";

/// Accumulate one stopworded field: for document `i`, normalize every raw
/// token of row `i` and bump the count of each surviving term.
pub fn accumulate(index: &mut CountIndex, lines: &[Vec<String>], stopwords: &HashSet<String>) {
    accumulate_range(index, lines, stopwords, 0);
}

/// Same as [`accumulate`], with document ids offset by `base`. Shards pass
/// their range start here so partial indexes line up before the merge.
pub fn accumulate_range(
    index: &mut CountIndex,
    lines: &[Vec<String>],
    stopwords: &HashSet<String>,
    base: DocId,
) {
    for (i, line) in lines.iter().enumerate() {
        let doc_id = base + i as DocId;
        for raw_word in line {
            for term in normalize(raw_word, stopwords) {
                index.bump(term, doc_id);
            }
        }
    }
}

/// Accumulate the API-call field. Stopwords are disabled and normalization
/// is bypassed: only the literal `[]` token counts, one term flagging array
/// usage per document.
pub fn accumulate_markers(index: &mut CountIndex, lines: &[Vec<String>]) {
    accumulate_markers_range(index, lines, 0);
}

pub fn accumulate_markers_range(index: &mut CountIndex, lines: &[Vec<String>], base: DocId) {
    for (i, line) in lines.iter().enumerate() {
        let doc_id = base + i as DocId;
        for word in line {
            if word == ARRAY_MARKER {
                index.bump(ARRAY_MARKER.to_string(), doc_id);
            }
        }
    }
}

/// Build the full weighted index over a document collection.
///
/// The three field passes run in a fixed order: method names with the base
/// stopword set, free tokens with the base set plus [`TOKEN_PASS_STOPWORD`]
/// (extended on a copy, so the caller's set and the first pass are
/// unaffected), then API sequences in marker-only mode. The corpus size for
/// IDF is the number of method-name rows.
pub fn build_index(collection: &DocumentCollection, stopwords: &HashSet<String>) -> Result<Index> {
    collection.validate()?;
    let num_docs = collection.len() as u32;

    let mut index = CountIndex::new();
    accumulate(&mut index, &collection.methnames, stopwords);

    let mut token_stopwords = stopwords.clone();
    token_stopwords.insert(TOKEN_PASS_STOPWORD.to_string());
    accumulate(&mut index, &collection.tokens, &token_stopwords);

    accumulate_markers(&mut index, &collection.apiseqs);

    tracing::info!(
        num_docs,
        num_terms = index.num_terms(),
        "accumulated raw term counts"
    );
    Ok(index.into_weighted(num_docs))
}

/// Sharded variant of [`build_index`]: documents are partitioned by id
/// range, each shard accumulates into its own `CountIndex` on its own
/// thread, and the partial counters are summed before the weighting pass.
/// Produces the same index as the sequential build.
pub fn build_index_sharded(
    collection: &DocumentCollection,
    stopwords: &HashSet<String>,
    num_shards: usize,
) -> Result<Index> {
    collection.validate()?;
    if num_shards <= 1 || collection.len() < 2 {
        return build_index(collection, stopwords);
    }
    let num_docs = collection.len() as u32;

    let mut token_stopwords = stopwords.clone();
    token_stopwords.insert(TOKEN_PASS_STOPWORD.to_string());
    let token_stopwords = &token_stopwords;

    let chunk = collection.len().div_ceil(num_shards);
    let partials: Vec<std::thread::Result<CountIndex>> = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_shards);
        for shard in 0..num_shards {
            let start = shard * chunk;
            if start >= collection.len() {
                break;
            }
            let end = (start + chunk).min(collection.len());
            handles.push(scope.spawn(move || {
                let base = start as DocId;
                let mut partial = CountIndex::new();
                accumulate_range(&mut partial, &collection.methnames[start..end], stopwords, base);
                accumulate_range(&mut partial, &collection.tokens[start..end], token_stopwords, base);
                accumulate_markers_range(&mut partial, &collection.apiseqs[start..end], base);
                partial
            }));
        }
        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut merged = CountIndex::new();
    for partial in partials {
        match partial {
            Ok(partial) => merged.merge(partial),
            Err(_) => bail!("index shard worker panicked"),
        }
    }
    tracing::info!(
        num_docs,
        num_shards,
        num_terms = merged.num_terms(),
        "merged sharded term counts"
    );
    Ok(merged.into_weighted(num_docs))
}
