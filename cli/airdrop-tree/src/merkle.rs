use crate::common::{keccak256_hash, Leaf};

/// Binary Keccak256 Merkle tree over the sorted leaf set.
///
/// Level 0 holds the leaves in ascending byte order. A level with an odd
/// node count pairs its last node with itself.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<Leaf>>,
}

impl MerkleTree {
    /// Sorts a copy of `leaves` and builds every level up to the root.
    pub fn from_leaves(leaves: &[Leaf]) -> Self {
        let mut sorted = leaves.to_vec();
        sorted.sort_unstable();
        Self::from_sorted(sorted)
    }

    fn from_sorted(leaves: Vec<Leaf>) -> Self {
        let mut levels: Vec<Vec<Leaf>> = vec![leaves];

        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next_level: Vec<Leaf> = level
                .chunks(2)
                .map(|chunk| {
                    let left = chunk[0];
                    let right = if chunk.len() == 2 { chunk[1] } else { left };
                    keccak256_hash(left, right)
                })
                .collect();
            levels.push(next_level);
        }

        Self { levels }
    }

    /// The root; 32 zero bytes for an empty tree.
    pub fn root(&self) -> Leaf {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    pub fn levels(&self) -> &[Vec<Leaf>] {
        &self.levels
    }

    /// Number of hashing levels above the leaves.
    pub fn depth(&self) -> u32 {
        (self.levels.len() - 1) as u32
    }
}

/// Computes the Merkle root of `leaves` after sorting them.
pub fn merkle_root(leaves: &[Leaf]) -> Leaf {
    MerkleTree::from_leaves(leaves).root()
}

/// Tree depth for `leaf_count` leaves: `ceil(log2(n))`, with 0 and 1 both 0.
pub fn tree_depth(leaf_count: u64) -> u32 {
    let mut size = leaf_count;
    let mut depth = 0;
    while size > 1 {
        depth += 1;
        size = size.div_ceil(2);
    }
    depth
}
