use alloy::primitives::B256;
use rewards_merkle_verify::hash_pair;

/// Merkle tree over a set of leaf hashes.
///
/// Leaves are sorted ascending at the bottom level and sibling pairs are
/// hashed in sorted order, so proofs carry no left/right position data. An
/// odd trailing node at any level is promoted unchanged to the next level;
/// the verifier needs no special case for it, since a promoted node simply
/// contributes no sibling to the proof.
pub struct MerkleTree {
    levels: Vec<Vec<B256>>,
}

impl MerkleTree {
    pub fn new(leaves: &[B256]) -> Self {
        let mut bottom = leaves.to_vec();
        bottom.sort_unstable();

        let mut levels = vec![bottom];
        while levels.last().expect("at least one level").len() > 1 {
            let prev = levels.last().expect("at least one level");
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                match pair {
                    [left, right] => next.push(hash_pair(left, right)),
                    [odd] => next.push(*odd),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                }
            }
            levels.push(next);
        }

        Self { levels }
    }

    /// Root hash, or `None` for an empty tree.
    pub fn root(&self) -> Option<B256> {
        self.levels.last().and_then(|level| level.first()).copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Sibling hashes from `leaf` up to the root, or `None` if the leaf is
    /// not in the tree. Lookup is by value: the bottom level is sorted, so
    /// the caller's enumeration order need not match tree positions.
    pub fn proof(&self, leaf: &B256) -> Option<Vec<B256>> {
        let mut index = self.levels[0].binary_search(leaf).ok()?;
        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            index /= 2;
        }
        Some(proof)
    }
}
