use sha3::{Digest, Keccak256, Sha3_256};

use crate::error::{AirdropError, Result};

/// A 32-byte commitment to one entitlement record.
pub type Leaf = [u8; 32];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Parses an Ethereum-style address from a hex string.
///
/// # Arguments
/// * `addr_str` - The address string, with or without "0x" prefix
///
/// # Returns
/// A 20-byte array representing the address
///
/// # Errors
/// Returns `InvalidAddress` if the address is not 40 hex characters, contains
/// invalid hex, or is the zero address
pub fn parse_address(addr_str: &str) -> Result<Address> {
    let invalid = |reason: String| AirdropError::InvalidAddress {
        address: addr_str.to_string(),
        reason,
    };

    let trimmed = addr_str.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if cleaned.len() != 40 {
        return Err(invalid(format!(
            "expected 40 hex chars, got {}",
            cleaned.len()
        )));
    }
    let mut address = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut address)
        .map_err(|e| invalid(format!("invalid hex encoding: {}", e)))?;
    if address == [0u8; 20] {
        return Err(invalid("zero address not allowed".to_string()));
    }
    Ok(address)
}

/// Formats bytes as a `0x`-prefixed lowercase hex string.
pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Computes a Keccak256 hash of two 32-byte values concatenated.
///
/// # Arguments
/// * `left` - First 32-byte value
/// * `right` - Second 32-byte value
///
/// # Returns
/// 32-byte hash result
pub fn keccak256_hash(left: [u8; 32], right: [u8; 32]) -> [u8; 32] {
    let hash = Keccak256::new()
        .chain_update(left)
        .chain_update(right)
        .finalize();
    hash.into()
}

/// SHA3-256 over a serialized artifact, used as its file checksum.
pub fn checksum(bytes: &[u8]) -> [u8; 32] {
    Sha3_256::digest(bytes).into()
}
