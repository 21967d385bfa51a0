//! Vocabulary tables: word -> id maps and their inverses, used to turn
//! integer-encoded document rows back into term strings before indexing.

use anyhow::{bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Placeholder for ids missing from the vocabulary.
pub const UNKNOWN_TERM: &str = "UNK";

/// Load a word -> id vocabulary table.
pub fn load_vocab(path: &Path) -> Result<HashMap<String, u32>> {
    if !path.exists() {
        bail!("vocabulary file {} not found", path.display());
    }
    let mut buf = Vec::new();
    File::open(path)?.read_to_end(&mut buf)?;
    bincode::deserialize(&buf).with_context(|| format!("decoding vocabulary {}", path.display()))
}

/// Invert a vocabulary into an id -> word map for decoding.
pub fn invert(vocab: &HashMap<String, u32>) -> HashMap<u32, String> {
    vocab.iter().map(|(word, id)| (*id, word.clone())).collect()
}

/// Decode integer-encoded rows into term strings, substituting
/// [`UNKNOWN_TERM`] for ids absent from the vocabulary.
pub fn decode_rows(rows: &[Vec<u32>], inverted: &HashMap<u32, String>) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|id| {
                    inverted
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_TERM.to_string())
                })
                .collect()
        })
        .collect()
}

/// Read a stopword set from a newline-separated file.
pub fn read_stopwords(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        bail!("stopword file {} not found", path.display());
    }
    let reader = BufReader::new(File::open(path)?);
    let mut words = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_unk_fallback() {
        let vocab: HashMap<String, u32> =
            [("load".to_string(), 0), ("store".to_string(), 1)].into();
        let inverted = invert(&vocab);
        let rows = vec![vec![1, 0, 99]];
        assert_eq!(
            decode_rows(&rows, &inverted),
            vec![vec!["store".to_string(), "load".to_string(), "UNK".to_string()]]
        );
    }

    #[test]
    fn invert_round_trips() {
        let vocab: HashMap<String, u32> =
            [("alpha".to_string(), 3), ("beta".to_string(), 7)].into();
        let inverted = invert(&vocab);
        assert_eq!(inverted.get(&3).map(String::as_str), Some("alpha"));
        assert_eq!(inverted.get(&7).map(String::as_str), Some("beta"));
    }
}
