//! Outbound peer polling
//!
//! Each request carries its own timeout so one slow peer cannot hold up
//! a resolution pass beyond that bound.

use std::time::Duration;

use crate::error::{NodeError, Result};
use crate::p2p::{ChainResponse, PeerAddress, CHAIN_PATH};

/// HTTP client used to fetch peers' chains
#[derive(Debug, Clone)]
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    /// Create a client whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch a peer's `{chain, length}`
    pub async fn fetch_chain(&self, peer: &PeerAddress) -> Result<ChainResponse> {
        let url = format!("http://{}{}", peer.authority(), CHAIN_PATH);
        let unreachable = |reason: String| NodeError::PeerUnreachable {
            peer: peer.authority(),
            reason,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unreachable(format!("status {}", response.status())));
        }

        response
            .json::<ChainResponse>()
            .await
            .map_err(|e| unreachable(e.to_string()))
    }
}
