use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use alloy::primitives::{Address, B256};
use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http::Request;
use rewards_merkle_tree::reward_set::UserClaim;
use serde::Serialize;
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
    ServiceBuilder,
};
use tower_http::{
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, instrument, Span};

use crate::{error, error::ApiError, Result};

pub struct RouterState {
    pub cycle: u64,
    pub merkle_root: B256,
    pub tree: HashMap<Address, UserClaim>,
}

impl Debug for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterState")
            .field("cycle", &self.cycle)
            .field("merkle_root", &self.merkle_root)
            .field("tree", &self.tree.len())
            .finish()
    }
}

#[instrument]
pub fn get_routes(state: Arc<RouterState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(error::handle_error)) // handle middleware errors explicitly!
        .layer(BufferLayer::new(100)) // buffer up to 100 requests in queue
        .layer(RateLimitLayer::new(1000, Duration::from_secs(10)))
        .layer(TimeoutLayer::new(Duration::from_secs(20)))
        .layer(LoadShedLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path())
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    Router::new()
        .route("/", get(root))
        .route("/users", get(get_users))
        .route("/merkle-data", get(get_merkle_data))
        .route("/proof/:account", get(get_proof))
        .layer(middleware)
        .with_state(state)
}

/// Retrieve the claim data and proof for a given account
#[instrument(ret)]
async fn get_proof(
    State(state): State<Arc<RouterState>>,
    Path(account): Path<String>,
) -> Result<impl IntoResponse> {
    let account =
        Address::from_str(account.as_str()).map_err(|_| ApiError::InvalidAddress(account.clone()))?;
    let claim = state
        .tree
        .get(&account)
        .ok_or(ApiError::UserNotFound(account.to_string()))?;

    Ok(Json(claim.clone()))
}

#[instrument(ret)]
async fn get_users(State(state): State<Arc<RouterState>>) -> Result<impl IntoResponse> {
    let users: Vec<String> = state.tree.keys().map(|key| key.to_string()).collect();

    Ok(Json(users))
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MerkleData {
    cycle: u64,
    merkle_root: B256,
}

/// Gets the cycle and root this server is serving proofs for
#[instrument(ret)]
async fn get_merkle_data(State(state): State<Arc<RouterState>>) -> Result<impl IntoResponse> {
    Ok(Json(MerkleData {
        cycle: state.cycle,
        merkle_root: state.merkle_root,
    }))
}

async fn root() -> impl IntoResponse {
    "Rewards Distributor API"
}

#[cfg(test)]
mod tests {
    use super::*;

    // Assert that serializing merkle data to a json response works as expected
    #[test]
    fn test_serialize_merkle_data() {
        let data = MerkleData {
            cycle: 7,
            merkle_root: B256::repeat_byte(0xab),
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"cycle\":7"));
        assert!(json.contains("\"merkleRoot\""));
    }
}
