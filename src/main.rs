//! Ledger node
//!
//! Main entry point: parses flags, builds the node, and serves the HTTP
//! API until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use ledger_node::config::NodeConfig;
use ledger_node::node::Node;
use ledger_node::rpc::start_rpc_server;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .init();

    let node = Node::from_config(&config).context("failed to initialize node")?;
    info!(
        identity = node.identity(),
        peers = node.peers().len(),
        "node initialized"
    );

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let shutdown_node = node.clone();
    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("shutdown signal received, stopping node");
        shutdown_node.shutdown();
    };

    start_rpc_server(node, listener, shutdown).await?;
    Ok(())
}
