use alloy::primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleTreeError {
    #[error("found invalid address: {0}")]
    InvalidAddress(String),
    #[error("duplicate address: {0}")]
    DuplicateAddress(Address),
    #[error("invalid amount {value:?} for account {account}")]
    InvalidAmount { account: Address, value: String },
    #[error("tokens and amounts length mismatch for account {0}")]
    LengthMismatch(Address),
    #[error("reward set has no accounts")]
    EmptyRewardSet,
    #[error("merkle tree validation error: {0}")]
    MerkleValidationError(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
