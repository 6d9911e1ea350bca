//! Word cluster resource
//!
//! Brown clusters map each word to a bit-string path in a binary merge tree.
//! Discourse models use prefixes of that path as coarse lexical features.
//!
//! Files use the standard Brown-cluster output layout, one word per line:
//!
//! ```text
//! <bits>\t<word>[\t<count>]
//! ```
//!
//! Files ending in `.gz` are read through a gzip decoder.

use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("could not read cluster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected '<bits>\\t<word>', found '{content}'")]
    Format { line: usize, content: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterResource {
    clusters: HashMap<String, String>,
}

impl ClusterResource {
    /// A resource with no entries; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClusterError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let gzipped = path.extension().is_some_and(|ext| ext == "gz");
        let resource = if gzipped {
            Self::from_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            Self::from_reader(BufReader::new(file))?
        };
        info!(path = %path.display(), words = resource.len(), "loaded word clusters");
        Ok(resource)
    }

    pub fn from_reader<R: Read>(reader: BufReader<R>) -> Result<Self, ClusterError> {
        let mut clusters = HashMap::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(bits), Some(word)) if is_bit_path(bits) && !word.is_empty() => {
                    if let Some(previous) = clusters.insert(word.to_string(), bits.to_string()) {
                        warn!(line = i + 1, word, %previous, "word listed twice, keeping later cluster");
                    }
                }
                _ => {
                    return Err(ClusterError::Format {
                        line: i + 1,
                        content: line,
                    })
                }
            }
        }
        Ok(Self { clusters })
    }

    pub fn from_text(source: &str) -> Result<Self, ClusterError> {
        Self::from_reader(BufReader::new(source.as_bytes()))
    }

    /// Full cluster bit-string for `word`
    pub fn cluster(&self, word: &str) -> Option<&str> {
        self.clusters.get(word).map(String::as_str)
    }

    /// The first `len` bits of the word's cluster (the whole path if shorter)
    pub fn prefix(&self, word: &str, len: usize) -> Option<&str> {
        self.cluster(word).map(|bits| &bits[..len.min(bits.len())])
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Cluster paths are non-empty binary strings
fn is_bit_path(bits: &str) -> bool {
    !bits.is_empty() && bits.bytes().all(|b| b == b'0' || b == b'1')
}
