//! Off-chain construction of reward-cycle Merkle trees.
//!
//! Turns a reward-set input (account -> per-token cumulative amounts for one
//! cycle) into the Merkle root published to the distributor plus, for every
//! account, the claim data and inclusion proof needed to redeem rewards.

pub mod error;
pub mod merkle_tree;
pub mod reward_input;
pub mod reward_set;
