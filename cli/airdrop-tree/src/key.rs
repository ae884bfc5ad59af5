//! Leaf derivation for airdrop entitlements.

use sha3::{Digest, Keccak256};

use crate::common::{parse_address, Address, Leaf};
use crate::error::{AirdropError, Result};

/// Domain separator prefixed to every leaf preimage.
pub const LEAF_DOMAIN: [u8; 4] = [0x61, 0x64, 0x72, 0x70];

const MODE_INTERNAL: u8 = 0x00;
const MODE_EXTERNAL: u8 = 0x01;

/// Derives the leaf committing to one entitlement.
///
/// The preimage is `LEAF_DOMAIN || mode || address || value_be`, hashed with
/// Keccak256. `is_external` selects the mode byte, so the same address and
/// value produce different leaves for externally funded and internally
/// funded entitlements.
///
/// # Errors
/// `InvalidAddress` if the address does not parse, `ValueOutOfRange` if the
/// value is negative or wider than 64 bits
pub fn derive_leaf(address: &str, value: i128, is_external: bool) -> Result<Leaf> {
    let addr = parse_address(address)?;
    let value = field_value(address, value)?;
    Ok(hash_leaf(&addr, value, is_external))
}

/// Narrows a record value to the 64-bit commitment field.
pub fn field_value(address: &str, value: i128) -> Result<u64> {
    u64::try_from(value).map_err(|_| AirdropError::ValueOutOfRange {
        address: address.to_string(),
        value,
    })
}

/// Hashes an already validated address and value into a leaf.
pub fn hash_leaf(address: &Address, value: u64, is_external: bool) -> Leaf {
    let mode = if is_external {
        MODE_EXTERNAL
    } else {
        MODE_INTERNAL
    };

    Keccak256::new()
        .chain_update(LEAF_DOMAIN)
        .chain_update([mode])
        .chain_update(address)
        .chain_update(value.to_be_bytes())
        .finalize()
        .into()
}
