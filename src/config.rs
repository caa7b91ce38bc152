//! Node configuration
//!
//! Everything operational comes from command-line flags. Protocol rules
//! live in `crate::constants` and cannot be changed here.

use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_API_PORT, DEFAULT_PEER_TIMEOUT};

#[derive(Debug, Clone, Parser)]
#[command(name = "ledger-node", version, about = "Proof-of-work ledger node")]
pub struct NodeConfig {
    /// Interface the HTTP API binds to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP API listens on
    #[arg(short, long, default_value_t = DEFAULT_API_PORT)]
    pub port: u16,

    /// Peer to register at startup (repeatable)
    #[arg(long = "peer", value_name = "ADDRESS")]
    pub peers: Vec<String>,

    /// Per-peer timeout while resolving, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PEER_TIMEOUT.as_millis() as u64)]
    pub peer_timeout_ms: u64,

    /// Coinbase recipient for forged blocks; random when omitted
    #[arg(long)]
    pub identity: Option<String>,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl NodeConfig {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }

    /// Address the API server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_API_PORT,
            peers: Vec::new(),
            peer_timeout_ms: DEFAULT_PEER_TIMEOUT.as_millis() as u64,
            identity: None,
            log_level: tracing::Level::INFO,
        }
    }
}
