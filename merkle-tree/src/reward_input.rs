use std::{fs::File, io::BufReader, path::Path, result};

use alloy::primitives::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::MerkleTreeError;

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// One reward cycle's input: every account's per-token cumulative amounts.
///
/// Account keys are kept as raw strings here so the builder can report
/// invalid or duplicate addresses against the input as written. Amounts are
/// decimal or 0x-hex strings; entry order in the file fixes leaf index
/// assignment for this build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSetInput {
    pub cycle: u64,
    pub user_rewards: IndexMap<String, UserRewardInput>,
}

/// Reward data for one account: tokens positionally paired with the total
/// lifetime amounts owed as of this cycle (not per-cycle deltas).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRewardInput {
    pub tokens: Vec<Address>,
    pub cumulative_amounts: Vec<String>,
}

impl RewardSetInput {
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let input: RewardSetInput = serde_json::from_reader(reader)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_json() {
        let raw = r#"{
            "cycle": 3,
            "userRewards": {
                "0x3f5CE5FBFe3E9af3971dD833D26bA9b5C936f0bE": {
                    "tokens": [
                        "0xdd974D5C2e2928deA5F71b9825b8b646686BD200",
                        "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"
                    ],
                    "cumulativeAmounts": ["1000", "0x20"]
                }
            }
        }"#;

        let input: RewardSetInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.cycle, 3);
        assert_eq!(input.user_rewards.len(), 1);

        let reward = &input.user_rewards["0x3f5CE5FBFe3E9af3971dD833D26bA9b5C936f0bE"];
        assert_eq!(reward.tokens.len(), 2);
        assert_eq!(reward.cumulative_amounts, vec!["1000", "0x20"]);
    }
}
