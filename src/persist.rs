//! Index store boundary: save/load of index variants, document collections,
//! and build metadata under one root directory.
//!
//! Binary artifacts are bincode; `meta.json` stays human-readable. The
//! index is written exactly once, after the weighting pass — there is no
//! partial persistence, so a failed build leaves nothing behind to clean up.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::index::{DocumentCollection, Index};

pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Which index variant a save/load call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// The integer-encoded document collection itself serves as the index;
    /// nothing separate is built or stored for this variant.
    WordIndices,
    /// The weighted inverted index.
    InvertedIndex,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::WordIndices => "word_indices",
            IndexKind::InvertedIndex => "inverted_index",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`load_index`]: the `word_indices` variant resolves to the raw
/// collection, every other variant to a built index.
#[derive(Debug)]
pub enum LoadedIndex {
    Inverted(Index),
    WordIndices(DocumentCollection),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn new(num_docs: u32) -> Self {
        Self {
            num_docs,
            created_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| String::new()),
            version: INDEX_FORMAT_VERSION,
        }
    }
}

/// Path layout of all on-disk artifacts under one index root.
pub struct IndexPaths {
    pub root: PathBuf,
}

const FIELD_NAMES: [&str; 3] = ["methnames", "tokens", "apiseqs"];

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn index_file(&self, kind: IndexKind) -> PathBuf {
        self.root.join(format!("{}.bin", kind.as_str()))
    }
    fn field_file(&self, field: &str) -> PathBuf {
        self.root.join(format!("{field}.bin"))
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut f =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let bytes = bincode::serialize(value)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn read_bincode<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let mut buf = Vec::new();
    File::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .read_to_end(&mut buf)?;
    bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))
}

/// Persist a finished index. The `word_indices` variant is a passthrough:
/// the call succeeds without writing anything.
pub fn save_index(paths: &IndexPaths, kind: IndexKind, index: &Index) -> Result<()> {
    if kind == IndexKind::WordIndices {
        tracing::debug!("word_indices variant is a passthrough, nothing to save");
        return Ok(());
    }
    create_dir_all(&paths.root)?;
    let file = paths.index_file(kind);
    write_bincode(&file, index)?;
    tracing::info!(
        file = %file.display(),
        num_terms = index.num_terms(),
        num_docs = index.num_docs,
        "index saved"
    );
    Ok(())
}

/// Load a previously built index variant. A missing file fails this call
/// with the path named, and nothing else: no in-memory state is touched.
pub fn load_index(paths: &IndexPaths, kind: IndexKind) -> Result<LoadedIndex> {
    if kind == IndexKind::WordIndices {
        return Ok(LoadedIndex::WordIndices(load_collection(paths)?));
    }
    let file = paths.index_file(kind);
    if !file.exists() {
        bail!("index file {} not found", file.display());
    }
    tracing::info!(file = %file.display(), "loading index");
    Ok(LoadedIndex::Inverted(read_bincode(&file)?))
}

/// Persist the three document fields, one artifact per field.
pub fn save_collection(paths: &IndexPaths, collection: &DocumentCollection) -> Result<()> {
    create_dir_all(&paths.root)?;
    let fields = [
        &collection.methnames,
        &collection.tokens,
        &collection.apiseqs,
    ];
    for (name, rows) in FIELD_NAMES.iter().zip(fields) {
        write_bincode(&paths.field_file(name), rows)?;
    }
    Ok(())
}

/// Load the three document fields. Every field file must be present before
/// any index work starts; the first missing one aborts with its path.
pub fn load_collection(paths: &IndexPaths) -> Result<DocumentCollection> {
    for name in FIELD_NAMES {
        let file = paths.field_file(name);
        if !file.exists() {
            bail!("document field {name} not found at {}", file.display());
        }
    }
    Ok(DocumentCollection {
        methnames: read_bincode(&paths.field_file("methnames"))?,
        tokens: read_bincode(&paths.field_file("tokens"))?,
        apiseqs: read_bincode(&paths.field_file("apiseqs"))?,
    })
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    let mut f = File::create(paths.meta())?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let path = paths.meta();
    let mut buf = String::new();
    File::open(&path)
        .with_context(|| format!("opening {}", path.display()))?
        .read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
