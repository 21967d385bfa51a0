//! Raw source to camelCase-split token lines.
//!
//! Upstream of the indexer proper: each raw source line is stripped of
//! short string literals and non-alphabetic characters (keeping `[` so that
//! array markers survive), then split on camelCase boundaries and
//! lowercased. The output rows feed [`crate::build`] directly.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE_STRING_LIT: Regex = Regex::new(r#""[^"\n]?""#).expect("valid regex");
    static ref RE_NON_ALPHA: Regex = Regex::new(r"[^\[a-zA-Z ]+").expect("valid regex");
    static ref RE_SPACES: Regex = Regex::new(r"  +").expect("valid regex");
    /// Identifiers whose camel humps are not separate words.
    static ref DO_NOT_SPLIT: HashSet<&'static str> = [
        "ArrayList",
        "ArrayType",
        "HashMap",
        "heatMapTL",
        "HttpClient",
        "InputStream",
        "OutputStram",
        "ReadOnly",
        "StringBuffer",
        "yyyyMMdd",
        "YYYYMMDD",
    ]
    .into_iter()
    .collect();
}

/// Insert a space before each camelCase boundary: an uppercase letter that
/// follows a lowercase one, or an uppercase letter followed by a lowercase
/// one when not at the start ("parseJSONValue" -> "parse JSON Value").
fn split_camel_case(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            let after_lower = chars[i - 1].is_ascii_lowercase();
            let before_lower = chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());
            if after_lower || before_lower {
                out.push(' ');
            }
        }
        out.push(ch);
    }
    out
}

/// Process one raw source line into its token row.
pub fn process_line(line: &str) -> Vec<String> {
    let line = RE_STRING_LIT.replace_all(line, "");
    let line = RE_NON_ALPHA.replace_all(&line, " ");
    let line = RE_SPACES.replace_all(line.trim(), " ");
    line.split(' ')
        .map(|word| {
            // exception class names stay whole; splitting them would index
            // every fragment that throws anything under "exception"
            if DO_NOT_SPLIT.contains(word) || word.to_ascii_lowercase().ends_with("exception") {
                word.to_lowercase()
            } else {
                split_camel_case(word).to_lowercase()
            }
        })
        .collect()
}

/// Process a whole source listing, one token row per line.
pub fn process_source<'a, I>(lines: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(process_line).collect()
}
