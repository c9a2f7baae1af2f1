use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use alloy::primitives::{address, Address, U256};
use thiserror::Error;

/// Sentinel token address representing the chain's native asset.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// One token payout within a settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub token: Address,
    pub amount: U256,
}

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("insufficient funds for token {0}")]
    InsufficientFunds(Address),
    #[error("transfer to {0} failed")]
    TransferRejected(Address),
}

/// Treasury seam the distributor settles through.
///
/// A settlement is a single call and must be all-or-nothing: either every
/// payout lands or none do. The distributor relies on this to keep its
/// claimed-amount bookkeeping consistent with actual token movement.
pub trait TokenVault {
    fn transfer(&self, recipient: Address, payouts: &[Payout]) -> Result<(), VaultError>;
}

/// In-memory vault backing tests and local runs, standing in for the real
/// treasury. Tracks a treasury balance per token and credited balances per
/// recipient, and can simulate recipients that reject the native asset
/// (a contract without a payable receive path).
#[derive(Debug, Default)]
pub struct InMemoryVault {
    inner: Mutex<VaultInner>,
}

#[derive(Debug, Default)]
struct VaultInner {
    treasury: HashMap<Address, U256>,
    balances: HashMap<(Address, Address), U256>,
    non_payable: HashSet<Address>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposits `amount` of `token` into the treasury.
    pub fn fund(&self, token: Address, amount: U256) {
        let mut inner = self.lock();
        let balance = inner.treasury.entry(token).or_insert(U256::ZERO);
        *balance += amount;
    }

    pub fn treasury_balance(&self, token: Address) -> U256 {
        self.lock()
            .treasury
            .get(&token)
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn balance_of(&self, recipient: Address, token: Address) -> U256 {
        self.lock()
            .balances
            .get(&(recipient, token))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Marks `recipient` as unable to receive the native asset.
    pub fn set_non_payable(&self, recipient: Address) {
        self.lock().non_payable.insert(recipient);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VaultInner> {
        self.inner.lock().expect("vault lock poisoned")
    }
}

impl TokenVault for InMemoryVault {
    fn transfer(&self, recipient: Address, payouts: &[Payout]) -> Result<(), VaultError> {
        let mut inner = self.lock();

        // validate the whole batch before touching any balance
        let mut needed: HashMap<Address, U256> = HashMap::new();
        for payout in payouts {
            if payout.token == NATIVE_TOKEN && inner.non_payable.contains(&recipient) {
                return Err(VaultError::TransferRejected(recipient));
            }
            let total = needed.entry(payout.token).or_insert(U256::ZERO);
            *total += payout.amount;
        }
        for (token, total) in &needed {
            let available = inner.treasury.get(token).copied().unwrap_or(U256::ZERO);
            if available < *total {
                return Err(VaultError::InsufficientFunds(*token));
            }
        }

        for payout in payouts {
            let treasury = inner
                .treasury
                .entry(payout.token)
                .or_insert(U256::ZERO);
            *treasury -= payout.amount;
            let balance = inner
                .balances
                .entry((recipient, payout.token))
                .or_insert(U256::ZERO);
            *balance += payout.amount;
        }
        Ok(())
    }
}
