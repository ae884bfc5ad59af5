use std::fmt;

use serde::Serialize;

use crate::common::hex_encode;
use crate::registry::{Stats, CATEGORIES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: &'static str,
    pub participants: u64,
    pub total: String,
}

/// Everything reported about a finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub tree_checksum: String,
    pub proof_checksum: String,
    pub merkle_root: String,
    pub leaf_count: u64,
    pub depth: u32,
    pub categories: Vec<CategorySummary>,
    pub external_total: String,
    pub faucet_total: String,
    pub faucet_shares: String,
}

impl Summary {
    pub fn new(
        tree_checksum: [u8; 32],
        proof_checksum: [u8; 32],
        merkle_root: [u8; 32],
        leaf_count: u64,
        depth: u32,
        stats: &Stats,
    ) -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|spec| {
                let cat = stats.category(spec.category);
                CategorySummary {
                    name: spec.category.name(),
                    participants: cat.participants,
                    total: cat.total.to_string(),
                }
            })
            .collect();

        Self {
            tree_checksum: hex_encode(tree_checksum),
            proof_checksum: hex_encode(proof_checksum),
            merkle_root: hex_encode(merkle_root),
            leaf_count,
            depth,
            categories,
            external_total: stats.external_total.to_string(),
            faucet_total: stats.faucet_total.to_string(),
            faucet_shares: stats.faucet_shares.to_string(),
        }
    }

    /// The summary document: pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut document = serde_json::to_string_pretty(self)?;
        document.push('\n');
        Ok(document)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree checksum:  {}", self.tree_checksum)?;
        writeln!(f, "Proof checksum: {}", self.proof_checksum)?;
        writeln!(f, "Merkle root:    {}", self.merkle_root)?;
        writeln!(f, "Leaves:         {}", self.leaf_count)?;
        writeln!(f, "Depth:          {}", self.depth)?;
        for cat in &self.categories {
            writeln!(
                f,
                "  {:<9} {:>10} participants, total {}",
                cat.name, cat.participants, cat.total
            )?;
        }
        writeln!(f, "External total: {}", self.external_total)?;
        writeln!(f, "Faucet total:   {}", self.faucet_total)?;
        write!(f, "Faucet shares:  {}", self.faucet_shares)
    }
}
