use anyhow::anyhow;

use crate::*;

pub fn process_get_proof(get_proof_args: &GetProofArgs) -> Result<()> {
    let reward_set = RewardMerkleTree::new_from_file(&get_proof_args.reward_set_path)?;
    let claim = reward_set.get_claim(&get_proof_args.account).ok_or_else(|| {
        anyhow!(
            "account {} not found in reward set",
            get_proof_args.account
        )
    })?;

    println!("{}", serde_json::to_string_pretty(claim)?);
    Ok(())
}
