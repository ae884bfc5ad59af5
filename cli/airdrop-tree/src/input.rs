use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AirdropError, Result};
use crate::registry::{CategorySpec, Record, ValueRule};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ValueEntry {
    address: String,
    value: i128,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SharesEntry {
    address: String,
    shares: u64,
}

/// Reads the category's JSON array from `dir`.
///
/// # Errors
/// `MissingOrMalformedInputFile` if the file cannot be read or its contents
/// do not match the category's record shape
pub fn load_category(dir: &Path, spec: &CategorySpec) -> Result<Vec<Record>> {
    let path = dir.join(spec.file_name);
    let malformed = |reason: String| AirdropError::MissingOrMalformedInputFile {
        path: path.clone(),
        reason,
    };

    let content = fs::read_to_string(&path).map_err(|e| malformed(e.to_string()))?;

    let records = match spec.rule {
        ValueRule::Direct => parse::<ValueEntry>(&content)
            .map_err(malformed)?
            .into_iter()
            .map(|e| Record::with_value(e.address, e.value))
            .collect(),
        ValueRule::Shares => parse::<SharesEntry>(&content)
            .map_err(malformed)?
            .into_iter()
            .map(|e| Record::with_shares(e.address, e.shares))
            .collect(),
    };
    Ok(records)
}

fn parse<T: DeserializeOwned>(content: &str) -> std::result::Result<Vec<T>, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}
