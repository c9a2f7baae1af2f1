use std::collections::HashMap;

use alloy::primitives::{Address, B256, U256};

/// The currently active cycle's published data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerkleData {
    /// Reward cycle this root belongs to. Starts at 0 (no root); proposals
    /// must advance it by exactly one.
    pub cycle: u64,
    /// The 256-bit merkle root claims are verified against.
    pub root: B256,
    /// Pointer to the full reward-set content behind the root (typically a
    /// URI), published so claimants can locate their proof data.
    pub content_hash: String,
}

/// Cumulative amounts already paid out, keyed by (account, token).
///
/// Entries are non-decreasing and persist across cycles; a claim is payable
/// only for the positive difference against these records.
#[derive(Debug, Default)]
pub struct ClaimRecords {
    paid: HashMap<(Address, Address), U256>,
}

impl ClaimRecords {
    pub fn get(&self, account: Address, token: Address) -> U256 {
        self.paid
            .get(&(account, token))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn get_many(&self, account: Address, tokens: &[Address]) -> Vec<U256> {
        tokens.iter().map(|token| self.get(account, *token)).collect()
    }

    pub fn set(&mut self, account: Address, token: Address, amount: U256) {
        self.paid.insert((account, token), amount);
    }
}
