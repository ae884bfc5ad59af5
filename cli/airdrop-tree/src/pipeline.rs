//! End-to-end build: load every category, commit, write the artifacts.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::common::hex_encode;
use crate::error::Result;
use crate::input::load_category;
use crate::merkle::{merkle_root, tree_depth};
use crate::output::OutputStage;
use crate::proof::encode_proof;
use crate::registry::{LeafRegistry, Record, CATEGORIES};
use crate::summary::Summary;
use crate::tree::encode_tree;

pub const TREE_FILE: &str = "tree.bin";
pub const PROOF_FILE: &str = "proof.json";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub unit_reward: u64,
}

/// Runs the build described by `config` and writes all three artifacts.
///
/// Artifacts are only moved into `output_dir` after every category has been
/// ingested and every artifact has been staged.
pub fn run_build(config: &BuildConfig) -> Result<Summary> {
    let mut records: [Vec<Record>; 5] = Default::default();
    for (spec, slot) in CATEGORIES.iter().zip(records.iter_mut()) {
        *slot = load_category(&config.input_dir, spec)?;
        debug!(file = spec.file_name, records = slot.len(), "loaded category file");
    }

    let (summary, artifacts) = build_from_records(config.unit_reward, &records)?;

    let mut stage = OutputStage::new();
    stage.stage(&config.output_dir.join(TREE_FILE), &artifacts.tree)?;
    stage.stage(&config.output_dir.join(PROOF_FILE), &artifacts.proof)?;
    stage.stage(
        &config.output_dir.join(SUMMARY_FILE),
        summary.to_json()?.as_bytes(),
    )?;
    stage.commit()?;

    info!(output = %config.output_dir.display(), "wrote artifacts");
    Ok(summary)
}

/// Serialized tree and proof documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub tree: Vec<u8>,
    pub proof: Vec<u8>,
}

/// Builds the summary and artifact bytes from in-memory category records,
/// given in [`CATEGORIES`] order.
pub fn build_from_records(
    unit_reward: u64,
    records: &[Vec<Record>; 5],
) -> Result<(Summary, Artifacts)> {
    let mut registry = LeafRegistry::new(unit_reward);
    for (spec, recs) in CATEGORIES.iter().zip(records.iter()) {
        registry.ingest(spec, recs)?;
        info!(
            category = spec.category.name(),
            records = recs.len(),
            "ingested category"
        );
    }
    commit(registry)
}

fn commit(registry: LeafRegistry) -> Result<(Summary, Artifacts)> {
    let (leaves, proofs, stats) = registry.into_parts();

    let tree = encode_tree(&leaves)?;
    debug!(bytes = tree.bytes.len(), checksum = %hex_encode(tree.checksum), "encoded tree");
    let proof = encode_proof(&proofs)?;
    debug!(bytes = proof.bytes.len(), checksum = %hex_encode(proof.checksum), "encoded proof");

    let root = merkle_root(&leaves);
    let leaf_count = leaves.len() as u64;
    let depth = tree_depth(leaf_count);
    info!(leaves = leaf_count, depth, root = %hex_encode(root), "computed merkle root");

    let summary = Summary::new(tree.checksum, proof.checksum, root, leaf_count, depth, &stats);
    Ok((
        summary,
        Artifacts {
            tree: tree.bytes,
            proof: proof.bytes,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AirdropError;

    const A: &str = "0x1111111111111111111111111111111111111111";
    const B: &str = "0x2222222222222222222222222222222222222222";

    #[test]
    fn test_build_from_records_is_deterministic() {
        let records = [
            vec![Record::with_value(A, 100)],
            vec![Record::with_value(B, 50)],
            vec![],
            vec![],
            vec![Record::with_shares(A, 3)],
        ];
        let first = build_from_records(5, &records).unwrap();
        let second = build_from_records(5, &records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.0.leaf_count, 3);
        assert_eq!(first.0.depth, 2);
    }

    #[test]
    fn test_build_from_records_empty() {
        let records: [Vec<Record>; 5] = Default::default();
        let (summary, artifacts) = build_from_records(1, &records).unwrap();
        assert_eq!(summary.leaf_count, 0);
        assert_eq!(summary.merkle_root, hex_encode([0u8; 32]));
        assert_eq!(artifacts.tree, vec![0, 0, 0, 0]);
        assert_eq!(artifacts.proof, b"[]\n");
    }

    #[test]
    fn test_build_from_records_duplicate() {
        let records = [
            vec![Record::with_value(A, 1)],
            vec![],
            vec![],
            vec![Record::with_value(A, 1)],
            vec![],
        ];
        let err = build_from_records(1, &records).unwrap_err();
        assert!(matches!(err, AirdropError::DuplicateLeaf { .. }));
    }
}
