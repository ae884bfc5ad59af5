use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the airdrop commitment.
///
/// None of these are recoverable: the build aborts on the first one.
#[derive(Debug, Error)]
pub enum AirdropError {
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("value {value} for address {address} is outside 0..=u64::MAX")]
    ValueOutOfRange { address: String, value: i128 },

    #[error("duplicate leaf {leaf}")]
    DuplicateLeaf { leaf: String },

    #[error("missing or malformed input file {}: {reason}", path.display())]
    MissingOrMalformedInputFile { path: PathBuf, reason: String },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("category {found} ingested out of order, expected {expected}")]
    CategoryOrder {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{count} leaves do not fit the u32 leaf count header")]
    LeafCountOverflow { count: usize },

    #[error("malformed tree artifact: {0}")]
    MalformedTree(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirdropError>;
