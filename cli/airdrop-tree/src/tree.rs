//! Binary tree artifact: `u32` little-endian leaf count, then the sorted leaves.

use crate::common::{checksum, Leaf};
use crate::error::{AirdropError, Result};
use crate::output::Artifact;

const COUNT_LEN: usize = 4;
const LEAF_LEN: usize = 32;

/// Sorts a copy of `leaves` and serializes the tree artifact.
pub fn encode_tree(leaves: &[Leaf]) -> Result<Artifact> {
    let count = u32::try_from(leaves.len()).map_err(|_| AirdropError::LeafCountOverflow {
        count: leaves.len(),
    })?;

    let mut sorted = leaves.to_vec();
    sorted.sort_unstable();

    let mut bytes = Vec::with_capacity(COUNT_LEN + sorted.len() * LEAF_LEN);
    bytes.extend_from_slice(&count.to_le_bytes());
    for leaf in &sorted {
        bytes.extend_from_slice(leaf);
    }

    let checksum = checksum(&bytes);
    Ok(Artifact { bytes, checksum })
}

/// Parses a tree artifact, checking its length and strict leaf ordering.
pub fn decode_tree(bytes: &[u8]) -> Result<Vec<Leaf>> {
    if bytes.len() < COUNT_LEN {
        return Err(AirdropError::MalformedTree(format!(
            "{} bytes is shorter than the count header",
            bytes.len()
        )));
    }
    let (header, body) = bytes.split_at(COUNT_LEN);
    let mut count_bytes = [0u8; COUNT_LEN];
    count_bytes.copy_from_slice(header);
    let count = u32::from_le_bytes(count_bytes) as usize;

    let expected_len = count.checked_mul(LEAF_LEN).ok_or_else(|| {
        AirdropError::MalformedTree(format!("header declares {} leaves", count))
    })?;
    if body.len() != expected_len {
        return Err(AirdropError::MalformedTree(format!(
            "header declares {} leaves but body holds {} bytes",
            count,
            body.len()
        )));
    }

    let mut leaves = Vec::with_capacity(count);
    for chunk in body.chunks_exact(LEAF_LEN) {
        let mut leaf = [0u8; LEAF_LEN];
        leaf.copy_from_slice(chunk);
        if let Some(prev) = leaves.last() {
            if *prev >= leaf {
                return Err(AirdropError::MalformedTree(format!(
                    "leaf {} is not above its predecessor",
                    leaves.len()
                )));
            }
        }
        leaves.push(leaf);
    }
    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_tree_layout() {
        let artifact = encode_tree(&[[3u8; 32], [1u8; 32], [2u8; 32]]).unwrap();
        assert_eq!(artifact.bytes.len(), 4 + 3 * 32);
        assert_eq!(&artifact.bytes[..4], &[3, 0, 0, 0]);
        assert_eq!(&artifact.bytes[4..36], &[1u8; 32]);
        assert_eq!(&artifact.bytes[36..68], &[2u8; 32]);
        assert_eq!(&artifact.bytes[68..], &[3u8; 32]);
    }

    #[test]
    fn test_encode_tree_count_is_little_endian() {
        let leaves: Vec<Leaf> = (0..300u16)
            .map(|i| {
                let mut leaf = [0u8; 32];
                leaf[..2].copy_from_slice(&i.to_be_bytes());
                leaf
            })
            .collect();

        let artifact = encode_tree(&leaves).unwrap();
        assert_eq!(&artifact.bytes[..4], &[0x2c, 0x01, 0x00, 0x00]);
        assert_eq!(decode_tree(&artifact.bytes).unwrap().len(), 300);
    }

    #[test]
    fn test_encode_tree_empty() {
        let artifact = encode_tree(&[]).unwrap();
        assert_eq!(artifact.bytes, vec![0, 0, 0, 0]);
        assert_eq!(artifact.checksum, checksum(&[0, 0, 0, 0]));
    }

    #[test]
    fn test_encode_tree_checksum_covers_buffer() {
        let artifact = encode_tree(&[[5u8; 32]]).unwrap();
        assert_eq!(artifact.checksum, checksum(&artifact.bytes));
    }

    #[test]
    fn test_encode_tree_input_order_irrelevant() {
        let a = encode_tree(&[[1u8; 32], [2u8; 32]]).unwrap();
        let b = encode_tree(&[[2u8; 32], [1u8; 32]]).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_decode_tree_reads_sorted_leaves() {
        let artifact = encode_tree(&[[9u8; 32], [4u8; 32]]).unwrap();
        assert_eq!(decode_tree(&artifact.bytes).unwrap(), vec![[4u8; 32], [9u8; 32]]);
    }

    #[test]
    fn test_decode_tree_rejects_truncated() {
        let artifact = encode_tree(&[[9u8; 32]]).unwrap();
        let truncated = &artifact.bytes[..artifact.bytes.len() - 1];
        assert!(matches!(decode_tree(truncated), Err(AirdropError::MalformedTree(_))));
        assert!(decode_tree(&[1, 0]).is_err());
    }

    #[test]
    fn test_decode_tree_rejects_oversized_header() {
        let mut bytes = u32::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1u8; 32]);
        assert!(matches!(decode_tree(&bytes), Err(AirdropError::MalformedTree(_))));
    }

    #[test]
    fn test_decode_tree_rejects_unsorted() {
        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[2u8; 32]);
        bytes.extend_from_slice(&[1u8; 32]);
        assert!(matches!(decode_tree(&bytes), Err(AirdropError::MalformedTree(_))));
    }

    #[test]
    fn test_decode_tree_rejects_repeated_leaf() {
        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1u8; 32]);
        bytes.extend_from_slice(&[1u8; 32]);
        assert!(decode_tree(&bytes).is_err());
    }
}
