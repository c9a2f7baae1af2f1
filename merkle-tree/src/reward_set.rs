use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Write},
    path::Path,
    result,
    str::FromStr,
};

use alloy::primitives::{Address, B256, U256};
use indexmap::IndexMap;
use rewards_merkle_verify::{hash_claim, verify};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::MerkleTreeError::{self, MerkleValidationError},
    merkle_tree::MerkleTree,
    reward_input::RewardSetInput,
};

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// A fully built reward set for one cycle: the Merkle root published to the
/// distributor, and per-account claim data with inclusion proofs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardMerkleTree {
    pub cycle: u64,
    /// The merkle root, which is published on-chain
    pub merkle_root: B256,
    pub user_rewards: IndexMap<Address, UserClaim>,
}

/// Everything one account needs to submit a claim for this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaim {
    /// Position of the account in this build's enumeration. Opaque data:
    /// it is part of the leaf and is carried with the proof, never
    /// re-derived.
    pub index: u64,
    pub tokens: Vec<Address>,
    pub cumulative_amounts: Vec<U256>,
    pub proof: Vec<B256>,
}

impl RewardMerkleTree {
    /// Builds the reward set for `input.cycle`.
    ///
    /// Account keys are parsed and normalized before use; leaf indexes
    /// follow the input's insertion order. The built set is self-validated:
    /// every emitted claim must verify against the root through the same
    /// code path the distributor uses.
    pub fn from_input(input: RewardSetInput) -> Result<Self> {
        let cycle = input.cycle;

        let mut rewards: IndexMap<Address, (Vec<Address>, Vec<U256>)> =
            IndexMap::with_capacity(input.user_rewards.len());
        for (raw_account, reward) in &input.user_rewards {
            let account = Address::from_str(raw_account.trim())
                .map_err(|_| MerkleTreeError::InvalidAddress(raw_account.clone()))?;
            if rewards.contains_key(&account) {
                return Err(MerkleTreeError::DuplicateAddress(account));
            }
            if reward.tokens.len() != reward.cumulative_amounts.len() {
                return Err(MerkleTreeError::LengthMismatch(account));
            }
            let amounts = reward
                .cumulative_amounts
                .iter()
                .map(|value| {
                    U256::from_str(value).map_err(|_| MerkleTreeError::InvalidAmount {
                        account,
                        value: value.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rewards.insert(account, (reward.tokens.clone(), amounts));
        }

        if rewards.is_empty() {
            return Err(MerkleTreeError::EmptyRewardSet);
        }

        let leaves: Vec<B256> = rewards
            .iter()
            .enumerate()
            .map(|(index, (account, (tokens, amounts)))| {
                hash_claim(cycle, index as u64, *account, tokens, amounts)
            })
            .collect();

        let tree = MerkleTree::new(&leaves);
        let merkle_root = tree.root().ok_or(MerkleTreeError::EmptyRewardSet)?;

        let mut user_rewards = IndexMap::with_capacity(rewards.len());
        for (index, (account, (tokens, amounts))) in rewards.into_iter().enumerate() {
            let proof = tree.proof(&leaves[index]).ok_or_else(|| {
                MerkleValidationError(format!("no proof for account {account}"))
            })?;
            user_rewards.insert(
                account,
                UserClaim {
                    index: index as u64,
                    tokens,
                    cumulative_amounts: amounts,
                    proof,
                },
            );
        }

        let set = RewardMerkleTree {
            cycle,
            merkle_root,
            user_rewards,
        };
        set.validate()?;

        info!(
            cycle,
            accounts = set.user_rewards.len(),
            root = %set.merkle_root,
            "built reward merkle tree"
        );
        Ok(set)
    }

    /// Load a serialized reward set from a file path
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let set: RewardMerkleTree = serde_json::from_reader(reader)?;
        Ok(set)
    }

    /// Write the reward set to a filepath
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn get_claim(&self, account: &Address) -> Option<&UserClaim> {
        self.user_rewards.get(account)
    }

    // Converts the reward set to a map for faster key access
    pub fn convert_to_hashmap(&self) -> HashMap<Address, UserClaim> {
        self.user_rewards
            .iter()
            .map(|(account, claim)| (*account, claim.clone()))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        // indexes must be exactly 0..n, each emitted once
        let mut seen = vec![false; self.user_rewards.len()];
        for claim in self.user_rewards.values() {
            let index = claim.index as usize;
            if index >= seen.len() || seen[index] {
                return Err(MerkleValidationError(format!(
                    "leaf index {index} out of range or repeated"
                )));
            }
            seen[index] = true;
        }

        self.verify_proofs()
    }

    /// Re-checks the whole set: the root must be reproducible from the
    /// claims, and every claim must verify against it through the same code
    /// path the distributor uses. A divergence between builder and verifier
    /// fails here instead of failing a claim later.
    pub fn verify_proofs(&self) -> Result<()> {
        let mut leaves = Vec::with_capacity(self.user_rewards.len());
        for (account, claim) in &self.user_rewards {
            if claim.tokens.len() != claim.cumulative_amounts.len() {
                return Err(MerkleTreeError::LengthMismatch(*account));
            }
            leaves.push(hash_claim(
                self.cycle,
                claim.index,
                *account,
                &claim.tokens,
                &claim.cumulative_amounts,
            ));
        }

        let tree = MerkleTree::new(&leaves);
        if tree.root() != Some(self.merkle_root) {
            return Err(MerkleValidationError(
                "merkle root does not match claims".to_string(),
            ));
        }

        for ((account, claim), leaf) in self.user_rewards.iter().zip(&leaves) {
            if !verify(&claim.proof, self.merkle_root, *leaf) {
                return Err(MerkleValidationError(format!(
                    "invalid proof for account {account}"
                )));
            }
        }
        Ok(())
    }
}
