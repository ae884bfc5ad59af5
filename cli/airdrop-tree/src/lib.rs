#![forbid(unsafe_code)]

pub mod common;
pub mod error;
pub mod input;
pub mod key;
pub mod merkle;
pub mod output;
pub mod pipeline;
pub mod proof;
pub mod registry;
pub mod summary;
pub mod tree;

pub use common::{hex_encode, parse_address, Address, Leaf};
pub use error::{AirdropError, Result};
pub use key::derive_leaf;
pub use merkle::{merkle_root, tree_depth, MerkleTree};
pub use pipeline::{build_from_records, run_build, BuildConfig};
pub use proof::encode_proof;
pub use registry::{Category, CategorySpec, LeafRegistry, ProofEntry, Record, CATEGORIES};
pub use summary::Summary;
pub use tree::{decode_tree, encode_tree};
