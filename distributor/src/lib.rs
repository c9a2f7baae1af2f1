//! The reward ledger: holds the active Merkle root per cycle, validates
//! submitted claims against it, and settles the positive delta between each
//! claim's cumulative amounts and what the account has already been paid.

pub mod distributor;
pub mod error;
pub mod state;
pub mod vault;

pub use distributor::RewardsDistributor;
