use crate::*;

pub fn process_verify(verify_args: &VerifyArgs) -> Result<()> {
    let reward_set = RewardMerkleTree::new_from_file(&verify_args.reward_set_path)?;
    reward_set.verify_proofs()?;

    println!(
        "done verify reward set cycle {} root {} ({} accounts)",
        reward_set.cycle,
        reward_set.merkle_root,
        reward_set.user_rewards.len()
    );
    Ok(())
}
