//! Term normalization: raw identifier pieces in, index terms out.

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::synonyms::replace_synonyms;

/// Pieces shorter than this are noise (single letters, loop variables).
const MIN_TERM_LEN: usize = 2;
/// Pieces longer than this are almost always generated identifiers.
const MAX_TERM_LEN: usize = 18;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Normalize one raw whitespace token into zero or more index terms.
///
/// The token is expected to be camel-case-split upstream (see
/// [`crate::preprocess`], which leaves the split pieces whitespace-joined);
/// each whitespace- or `_`-separated sub-piece goes through an
/// unconditional gate chain: NFKC fold and lowercase, length filter,
/// stopword filter, stemming, synonym collapse. The stopword check runs on
/// the raw sub-piece, before stemming, so stopword lists are written in
/// surface form.
pub fn normalize(raw_word: &str, stopwords: &HashSet<String>) -> Vec<String> {
    let mut terms = Vec::new();
    for sub_piece in raw_word.split(|c: char| c == '_' || c.is_whitespace()) {
        let sub_piece = sub_piece.nfkc().collect::<String>().to_lowercase();
        let length = sub_piece.chars().count();
        if length < MIN_TERM_LEN || length > MAX_TERM_LEN {
            continue;
        }
        if stopwords.contains(sub_piece.as_str()) {
            continue;
        }
        let stem = STEMMER.stem(&sub_piece).to_string();
        terms.push(replace_synonyms(&stem));
    }
    terms
}
