//! Proof artifact: the ingestion-ordered entries as pretty-printed JSON.

use crate::common::checksum;
use crate::error::Result;
use crate::output::Artifact;
use crate::registry::ProofEntry;

/// Serializes `entries` in the order given, newline-terminated.
pub fn encode_proof(entries: &[ProofEntry]) -> Result<Artifact> {
    let mut document = serde_json::to_string_pretty(entries)?;
    document.push('\n');

    let bytes = document.into_bytes();
    let checksum = checksum(&bytes);
    Ok(Artifact { bytes, checksum })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, value: u64, is_external: bool) -> ProofEntry {
        ProofEntry {
            address: address.to_string(),
            value,
            is_external,
        }
    }

    #[test]
    fn test_encode_proof_field_names() {
        let artifact = encode_proof(&[entry("0xaa", 10, true)]).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(
            doc,
            serde_json::json!([{ "address": "0xaa", "value": 10, "isExternal": true }])
        );
    }

    #[test]
    fn test_encode_proof_keeps_order() {
        let artifact =
            encode_proof(&[entry("0xbb", 1, true), entry("0xaa", 2, false)]).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(doc[0]["address"], "0xbb");
        assert_eq!(doc[1]["address"], "0xaa");
    }

    #[test]
    fn test_encode_proof_trailing_newline() {
        let artifact = encode_proof(&[]).unwrap();
        assert_eq!(artifact.bytes, b"[]\n");
    }

    #[test]
    fn test_encode_proof_checksum_covers_document() {
        let artifact = encode_proof(&[entry("0xaa", 10, true)]).unwrap();
        assert_eq!(artifact.checksum, checksum(&artifact.bytes));
    }
}
