//! Synonym collapsing for already-stemmed words.
//!
//! Heterogeneous codebases spell the same intent many ways ("read" vs
//! "load", "push" vs "add", "doubl" vs "float"). Collapsing these to one
//! canonical term makes semantically equivalent queries and documents meet
//! in the index, trading fine-grained distinctions for recall.

/// Ordered rewrite rules over a space-padded word.
///
/// Each pattern is matched literally against the working string, whose value
/// starts as `" word "`; the leading/trailing spaces in a pattern pin it to
/// word boundaries (`" read "` must not fire inside `" readable "`). Rules
/// run in sequence and each rule rewrites the output of the previous one, so
/// the order below is part of the contract: reordering changes results
/// (`" termin "` must be consumed before `" determin "` is considered, and
/// only the padded spelling keeps them apart).
const RULES: &[(&str, &str)] = &[
    (" read ", "load"),
    (" write", "store"),
    (" save", "store"),
    (" dump", "store"),
    (" quit", "exit"),
    (" termin ", "exit"),
    (" leav", "exit"),
    (" break ", "exit"),
    (" pop ", "delet"),
    ("remov", "delet"),
    (" trim ", "delet"),
    (" strip ", "delet"),
    (" halt", "stop"),
    ("restart", "continu"),
    ("push ", "add"),
    ("object", "instanc"),
    (" null ", "none"),
    ("method", "function"),
    ("concat ", "combin"),
    (" for ", "loop"),
    (" foreach ", "loop"),
    (" while ", "loop"),
    (" iterat ", "loop"),
    (" integ ", "int"),
    ("tinyint ", "int"),
    (" smallint ", "int"),
    (" bigint ", "int"),
    (" shortint ", "int"),
    ("longint ", "int"),
    (" byte ", "int"),
    (" short ", "int"),
    (" doubl ", "float"),
    (" long ", "float"),
    (" decim ", "float"),
    ("real ", "float"),
    (" array ", "[]"),
    (" arr ", "[]"),
    (" fastest ", "fast"),
    (" speed ", "fast"),
    (" defin ", "creat"),
    (" declar ", "creat"),
    (" init ", "creat"),
    (" construct ", "creat"),
    (" new ", "creat"),
    (" make ", "creat"),
    (" initi ", "creat"),
    (" initid ", "creat"),
    (" boolean ", "bool"),
    ("begin", "start"),
    ("run ", "execut"),
    ("runnabl", "execut"),
    (" enumer ", "enum"),
    (" enumerd ", "enum"),
    (" websit ", "web"),
    (" vertex ", "node"),
    (" arc ", "edg"),
    (" math ", "calc"),
    (" determin ", "calc"),
    (" should ", "check"),
    (" test ", "check"),
    (" is ", "check"),
    (" ensur ", "check"),
    (" equal ", "compar"),
    (" implement ", "extend"),
    (" whitespac ", "space"),
];

/// Rewrite a stemmed word to its canonical synonym.
///
/// Pure function; a word with no matching rule comes back unchanged, and
/// canonical forms are fixed points (`replace_synonyms("load") == "load"`).
pub fn replace_synonyms(word: &str) -> String {
    let mut padded = format!(" {word} ");
    for (pattern, replacement) in RULES {
        if padded.contains(pattern) {
            padded = padded.replace(pattern, replacement);
        }
    }
    padded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_io_verbs() {
        assert_eq!(replace_synonyms("read"), "load");
        assert_eq!(replace_synonyms("write"), "store");
        assert_eq!(replace_synonyms("save"), "store");
    }

    #[test]
    fn collapses_collection_verbs() {
        assert_eq!(replace_synonyms("push"), "add");
        assert_eq!(replace_synonyms("pop"), "delet");
        assert_eq!(replace_synonyms("object"), "instanc");
    }

    #[test]
    fn collapses_type_families() {
        assert_eq!(replace_synonyms("doubl"), "float");
        assert_eq!(replace_synonyms("byte"), "int");
        assert_eq!(replace_synonyms("array"), "[]");
        assert_eq!(replace_synonyms("arr"), "[]");
    }

    #[test]
    fn padding_pins_word_boundaries() {
        // " termin " fires on the whole word only; "determin" falls through
        // to the calc rule further down the table.
        assert_eq!(replace_synonyms("termin"), "exit");
        assert_eq!(replace_synonyms("determin"), "calc");
    }

    #[test]
    fn canonical_forms_are_fixed_points() {
        for canonical in ["load", "store", "exit", "delet", "creat", "check"] {
            assert_eq!(replace_synonyms(canonical), canonical);
        }
    }

    #[test]
    fn unmatched_words_pass_through() {
        assert_eq!(replace_synonyms("parser"), "parser");
        assert_eq!(replace_synonyms("socket"), "socket");
    }
}
