mod instructions;

use std::path::PathBuf;

use alloy::primitives::Address;
use anyhow::Result;
use clap::{Parser, Subcommand};
use instructions::*;
use rewards_merkle_tree::{reward_input::RewardSetInput, reward_set::RewardMerkleTree};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a reward Merkle tree, given a reward-set input JSON
    CreateRewardSet(CreateRewardSetArgs),
    /// Re-verify a generated reward set before publishing its root
    Verify(VerifyArgs),
    /// Print one account's claim data from a generated reward set
    GetProof(GetProofArgs),
}

#[derive(Parser, Debug)]
pub struct CreateRewardSetArgs {
    /// Path of the reward-set input JSON
    #[clap(long, env)]
    pub input_path: PathBuf,

    /// Where to write the generated reward set
    #[clap(long, env)]
    pub output_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Generated reward set path
    #[clap(long, env)]
    pub reward_set_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct GetProofArgs {
    /// Generated reward set path
    #[clap(long, env)]
    pub reward_set_path: PathBuf,

    /// Account to extract the claim for
    #[clap(long, env)]
    pub account: Address,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    match &args.command {
        Commands::CreateRewardSet(create_args) => process_create_reward_set(create_args),
        Commands::Verify(verify_args) => process_verify(verify_args),
        Commands::GetProof(get_proof_args) => process_get_proof(get_proof_args),
    }
}
