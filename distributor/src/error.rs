use alloy::primitives::Address;
use thiserror::Error;

use crate::vault::VaultError;

#[derive(Error, Debug)]
pub enum DistributorError {
    #[error("only admin")]
    OnlyAdmin,
    #[error("only operator")]
    OnlyOperator,
    #[error("incorrect cycle: expected {expected}, got {got}")]
    InvalidCycle { expected: u64, got: u64 },
    #[error("invalid claim data")]
    InvalidClaimData,
    #[error("cumulative amount for token {token} at position {position} is below the amount already claimed")]
    ClaimUnderflow { token: Address, position: usize },
    #[error("only when not paused")]
    SystemPaused,
    #[error("only when paused")]
    NotPaused,
    #[error("invalid lengths")]
    InvalidLengths,
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] VaultError),
}
