//! HTTP API server
//!
//! Axum router over a shared `Node`. The same `/chain` route serves both
//! clients and peers polling during consensus.

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::node::Node;
use crate::p2p::CHAIN_PATH;
use crate::rpc::methods::{
    consensus, full_chain, mine, new_transaction, pending_transactions, register_nodes,
};

/// Build the API router for `node`
pub fn build_router(node: Node) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CHAIN_PATH, get(full_chain))
        .route("/mine", get(mine))
        .route("/transactions/new", post(new_transaction))
        .route("/transactions/pending", get(pending_transactions))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", get(consensus))
        .layer(cors)
        .with_state(node)
}

/// Serve the API on an already bound listener until `shutdown` completes
pub async fn start_rpc_server(
    node: Node,
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, identity = node.identity(), "API server listening");
    }

    axum::serve(listener, build_router(node))
        .with_graceful_shutdown(shutdown)
        .await
}
