//! HTTP handler implementations
//!
//! Each handler is a thin binding over a `Node` operation. Request bodies
//! are parsed leniently and checked for required fields here, so a missing
//! field always produces the same 400 message regardless of how the body
//! was malformed.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::consensus::Resolution;
use crate::error::NodeError;
use crate::node::Node;
use crate::validation::Transaction;

const MISSING_TRANSACTION_FIELDS: &str =
    "Missing values (sender, recipient, amount, fee, signature are required)";
const NEGATIVE_VALUES: &str = "Invalid values (amount and fee must not be negative)";
const MISSING_NODES: &str = "Error: Please supply a valid list of nodes";

/// Body of `POST /transactions/new`
#[derive(Debug, Default, Deserialize)]
pub struct TransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<f64>,
    pub fee: Option<f64>,
    pub signature: Option<String>,
}

impl TransactionRequest {
    /// The complete transaction, or `MalformedRequest` if any field is
    /// absent or the amount or fee is negative
    pub fn into_transaction(self) -> Result<Transaction, NodeError> {
        let (sender, recipient, amount, fee, signature) =
            match (self.sender, self.recipient, self.amount, self.fee, self.signature) {
                (Some(sender), Some(recipient), Some(amount), Some(fee), Some(signature)) => {
                    (sender, recipient, amount, fee, signature)
                }
                _ => {
                    return Err(NodeError::MalformedRequest(
                        MISSING_TRANSACTION_FIELDS.to_string(),
                    ))
                }
            };

        if !(amount >= 0.0 && fee >= 0.0) {
            return Err(NodeError::MalformedRequest(NEGATIVE_VALUES.to_string()));
        }

        Ok(Transaction::new(sender, recipient, amount, fee, signature))
    }
}

/// Body of `POST /nodes/register`
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub nodes: Option<Vec<String>>,
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = match &self {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            NodeError::MiningInterrupted => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, self.to_string()).into_response()
    }
}

/// Unwrap a JSON body, treating an unparseable one like an empty one
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable request body");
            T::default()
        }
    }
}

/// GET /chain
pub async fn full_chain(State(node): State<Node>) -> impl IntoResponse {
    (StatusCode::OK, Json(node.chain()))
}

/// GET /mine
pub async fn mine(State(node): State<Node>) -> Result<impl IntoResponse, NodeError> {
    let block = node.mine().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "New Block Forged",
            "index": block.index,
            "transactions": block.transactions,
            "proof": block.proof,
            "previous_hash": block.previous_hash,
        })),
    ))
}

/// POST /transactions/new
pub async fn new_transaction(
    State(node): State<Node>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, NodeError> {
    let tx = body_or_default(body).into_transaction()?;
    let index = node.submit_transaction(tx)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("Transaction will be added to Block {}", index) })),
    ))
}

/// GET /transactions/pending
pub async fn pending_transactions(State(node): State<Node>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "transactions": node.pending_transactions() })),
    )
}

/// POST /nodes/register
pub async fn register_nodes(
    State(node): State<Node>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, NodeError> {
    let nodes = body_or_default(body)
        .nodes
        .ok_or_else(|| NodeError::MalformedRequest(MISSING_NODES.to_string()))?;
    let total_nodes = node.register_peers(&nodes)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "New nodes have been added",
            "total_nodes": total_nodes,
        })),
    ))
}

/// GET /nodes/resolve
pub async fn consensus(State(node): State<Node>) -> impl IntoResponse {
    let body: Value = match node.resolve().await {
        (Resolution::Replaced, chain) => json!({
            "message": "Our chain was replaced",
            "new_chain": chain,
        }),
        (Resolution::Authoritative, chain) => json!({
            "message": "Our chain is authoritative",
            "chain": chain,
        }),
    };

    (StatusCode::OK, Json(body))
}
