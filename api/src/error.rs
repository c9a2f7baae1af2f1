use std::convert::Infallible;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use rewards_merkle_tree::error::MerkleTreeError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("merkle tree error: {0}")]
    MerkleTreeError(#[from] MerkleTreeError),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MerkleTreeError(ref e) => {
                error!("merkle tree error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ApiError::UserNotFound(ref account) => {
                error!("user {account} not found");
                (StatusCode::NOT_FOUND, "User not found")
            }
            ApiError::InvalidAddress(ref raw) => {
                error!("invalid address: {raw}");
                (StatusCode::BAD_REQUEST, "Invalid address")
            }
        };
        (
            status,
            Json(Error {
                error: error_message.to_string(),
            }),
        )
            .into_response()
    }
}

pub async fn handle_error(error: BoxError) -> Result<impl IntoResponse, Infallible> {
    if error.is::<tower::timeout::error::Elapsed>() {
        return Ok((
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "code" : 408,
                "error" : "Request Timeout",
            })),
        ));
    };
    if error.is::<tower::load_shed::error::Overloaded>() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "code" : 503,
                "error" : "Service Unavailable",
            })),
        ));
    }

    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code" : 500,
            "error" : "Internal Server Error",
        })),
    ))
}
