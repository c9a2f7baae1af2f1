use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard},
};

use alloy::primitives::{Address, B256, U256};
use rewards_merkle_verify::{hash_claim, verify};
use tracing::{info, warn};

use crate::{
    error::DistributorError,
    state::{ClaimRecords, MerkleData},
    vault::{Payout, TokenVault},
};

pub type Result<T> = std::result::Result<T, DistributorError>;

/// The reward ledger.
///
/// Holds the published `(cycle, root, content_hash)` tuple, the cumulative
/// amounts already paid per (account, token), the pause flag, and the role
/// sets. Every operation takes one internal lock, so claims are linearized
/// the same way sequential transaction execution linearizes them on-chain:
/// each claim fully settles or fully fails, with no lost updates.
///
/// Token movement goes through the [`TokenVault`] seam; the vault call is
/// all-or-nothing, and on failure the claimed-amount bookkeeping is rolled
/// back so nothing is recorded that was not paid.
pub struct RewardsDistributor<V> {
    state: Mutex<DistributorState>,
    vault: V,
}

#[derive(Debug)]
struct DistributorState {
    admin: Address,
    operators: HashSet<Address>,
    merkle_data: MerkleData,
    paused: bool,
    claimed: ClaimRecords,
}

impl<V: TokenVault> RewardsDistributor<V> {
    pub fn new(admin: Address, vault: V) -> Self {
        Self {
            state: Mutex::new(DistributorState {
                admin,
                operators: HashSet::new(),
                merkle_data: MerkleData::default(),
                paused: false,
                claimed: ClaimRecords::default(),
            }),
            vault,
        }
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn add_operator(&self, caller: Address, operator: Address) -> Result<()> {
        let mut state = self.lock();
        if caller != state.admin {
            return Err(DistributorError::OnlyAdmin);
        }
        state.operators.insert(operator);
        info!(%operator, "operator added");
        Ok(())
    }

    pub fn remove_operator(&self, caller: Address, operator: Address) -> Result<()> {
        let mut state = self.lock();
        if caller != state.admin {
            return Err(DistributorError::OnlyAdmin);
        }
        state.operators.remove(&operator);
        info!(%operator, "operator removed");
        Ok(())
    }

    /// Publishes the root for the next cycle.
    ///
    /// Admin only; `cycle` must be exactly one past the stored cycle (the
    /// ledger starts at cycle 0 with no root, so the first proposal is
    /// cycle 1). Allowed while paused: proposing is the administrative
    /// recovery path, claiming is not.
    pub fn propose_root(
        &self,
        caller: Address,
        cycle: u64,
        root: B256,
        content_hash: String,
    ) -> Result<()> {
        let mut state = self.lock();
        if caller != state.admin {
            return Err(DistributorError::OnlyAdmin);
        }
        let expected = state.merkle_data.cycle + 1;
        if cycle != expected {
            return Err(DistributorError::InvalidCycle {
                expected,
                got: cycle,
            });
        }
        state.merkle_data = MerkleData {
            cycle,
            root,
            content_hash,
        };
        info!(cycle, root = %root, "root updated");
        Ok(())
    }

    pub fn get_merkle_data(&self) -> MerkleData {
        self.lock().merkle_data.clone()
    }

    pub fn get_claimed_amounts(&self, account: Address, tokens: &[Address]) -> Vec<U256> {
        self.lock().claimed.get_many(account, tokens)
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Blocks claiming. Operator only; repeated calls are allowed.
    pub fn pause(&self, caller: Address) -> Result<()> {
        let mut state = self.lock();
        if !state.operators.contains(&caller) {
            return Err(DistributorError::OnlyOperator);
        }
        state.paused = true;
        info!(sender = %caller, "paused");
        Ok(())
    }

    /// Re-enables claiming. Admin only; repeated calls are allowed.
    pub fn unpause(&self, caller: Address) -> Result<()> {
        let mut state = self.lock();
        if caller != state.admin {
            return Err(DistributorError::OnlyAdmin);
        }
        state.paused = false;
        info!(sender = %caller, "unpaused");
        Ok(())
    }

    /// Read-only claim check: recomputes the leaf from the submitted fields
    /// and walks the proof against the stored root. Returns false (never
    /// errors) for a wrong cycle, mismatched token/amount lengths, or a
    /// proof that does not reduce to the root.
    pub fn is_valid_claim(
        &self,
        cycle: u64,
        index: u64,
        account: Address,
        tokens: &[Address],
        amounts: &[U256],
        proof: &[B256],
    ) -> bool {
        let state = self.lock();
        Self::check_claim(&state, cycle, index, account, tokens, amounts, proof)
    }

    /// Validates a claim and pays out the positive delta per token position.
    ///
    /// Deltas are computed sequentially against a working copy of the
    /// claimed amounts, so a token appearing at several positions is settled
    /// as that many independent positional updates. Any negative delta
    /// aborts the whole claim; a zero delta is skipped without affecting the
    /// other positions. Returns the per-position amounts paid.
    pub fn claim(
        &self,
        cycle: u64,
        index: u64,
        account: Address,
        tokens: &[Address],
        amounts: &[U256],
        proof: &[B256],
    ) -> Result<Vec<U256>> {
        let mut state = self.lock();
        if state.paused {
            return Err(DistributorError::SystemPaused);
        }
        if !Self::check_claim(&state, cycle, index, account, tokens, amounts, proof) {
            return Err(DistributorError::InvalidClaimData);
        }

        let mut working: HashMap<Address, U256> = HashMap::new();
        let mut deltas = Vec::with_capacity(tokens.len());
        for (position, (token, amount)) in tokens.iter().zip(amounts).enumerate() {
            let current = *working
                .entry(*token)
                .or_insert_with(|| state.claimed.get(account, *token));
            let delta =
                amount
                    .checked_sub(current)
                    .ok_or(DistributorError::ClaimUnderflow {
                        token: *token,
                        position,
                    })?;
            working.insert(*token, *amount);
            deltas.push(delta);
        }

        // Bookkeeping commits before funds move; the vault call is
        // all-or-nothing, and a failed transfer restores the records so a
        // reentering recipient cannot observe paid-but-unrecorded state.
        let previous: Vec<(Address, U256)> = working
            .keys()
            .map(|token| (*token, state.claimed.get(account, *token)))
            .collect();
        for (token, final_amount) in &working {
            state.claimed.set(account, *token, *final_amount);
        }

        let payouts: Vec<Payout> = tokens
            .iter()
            .zip(&deltas)
            .filter(|(_, delta)| !delta.is_zero())
            .map(|(token, delta)| Payout {
                token: *token,
                amount: *delta,
            })
            .collect();
        if let Err(e) = self.vault.transfer(account, &payouts) {
            for (token, amount) in previous {
                state.claimed.set(account, token, amount);
            }
            warn!(%account, cycle, error = %e, "claim payout failed, rolled back");
            return Err(DistributorError::TransferFailed(e));
        }

        info!(%account, cycle, paid = payouts.len(), "rewards claimed");
        Ok(deltas)
    }

    /// Emergency sweep of treasury funds to `recipient`. Admin only, and
    /// only while the system is paused.
    pub fn withdraw_funds(
        &self,
        caller: Address,
        tokens: &[Address],
        amounts: &[U256],
        recipient: Address,
    ) -> Result<()> {
        let state = self.lock();
        if caller != state.admin {
            return Err(DistributorError::OnlyAdmin);
        }
        if !state.paused {
            return Err(DistributorError::NotPaused);
        }
        if tokens.len() != amounts.len() {
            return Err(DistributorError::InvalidLengths);
        }

        let payouts: Vec<Payout> = tokens
            .iter()
            .zip(amounts)
            .map(|(token, amount)| Payout {
                token: *token,
                amount: *amount,
            })
            .collect();
        self.vault.transfer(recipient, &payouts)?;

        info!(sender = %caller, %recipient, tokens = tokens.len(), "funds withdrawn");
        Ok(())
    }

    fn check_claim(
        state: &DistributorState,
        cycle: u64,
        index: u64,
        account: Address,
        tokens: &[Address],
        amounts: &[U256],
        proof: &[B256],
    ) -> bool {
        if tokens.len() != amounts.len() {
            return false;
        }
        if cycle != state.merkle_data.cycle {
            return false;
        }
        let leaf = hash_claim(cycle, index, account, tokens, amounts);
        verify(proof, state.merkle_data.root, leaf)
    }

    fn lock(&self) -> MutexGuard<'_, DistributorState> {
        self.state.lock().expect("distributor lock poisoned")
    }
}
