mod error;
mod router;

use std::{fmt::Debug, net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

use clap::Parser;
use rewards_merkle_tree::reward_set::RewardMerkleTree;
use router::RouterState;
use tracing::{info, instrument};

use crate::error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for the server
    #[clap(long, env, default_value_t = SocketAddr::from_str("0.0.0.0:7001").unwrap())]
    bind_addr: SocketAddr,

    /// Path of the generated reward set to serve
    #[clap(long, env)]
    reward_set_path: PathBuf,
}

#[tokio::main]
#[instrument]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt().init();

    info!("args: {:?}", args);

    info!("starting server at {}", args.bind_addr);

    let reward_set = RewardMerkleTree::new_from_file(&args.reward_set_path)?;
    reward_set.verify_proofs()?;
    info!(
        "serving cycle {} with root {} ({} accounts)",
        reward_set.cycle,
        reward_set.merkle_root,
        reward_set.user_rewards.len()
    );

    let state = Arc::new(RouterState {
        cycle: reward_set.cycle,
        merkle_root: reward_set.merkle_root,
        tree: reward_set.convert_to_hashmap(),
    });

    let app = router::get_routes(state);

    axum::Server::bind(&args.bind_addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
