use crate::*;

pub fn process_create_reward_set(create_args: &CreateRewardSetArgs) -> Result<()> {
    let input = RewardSetInput::new_from_file(&create_args.input_path)?;
    println!(
        "building reward set for cycle {} with {} accounts",
        input.cycle,
        input.user_rewards.len()
    );

    let reward_set = RewardMerkleTree::from_input(input)?;
    reward_set.write_to_file(&create_args.output_path)?;

    println!(
        "wrote cycle {} reward set with root {} to {}",
        reward_set.cycle,
        reward_set.merkle_root,
        create_args.output_path.display()
    );
    Ok(())
}
