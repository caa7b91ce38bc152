//! Consensus resolution
//!
//! Longest valid chain wins. Every registered peer is polled concurrently;
//! answers are then weighed in registration order, and a candidate only
//! displaces the running best when it is strictly longer and validates.
//! Ties therefore go to the first-registered peer (or to the local chain).

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::consensus::{check_chain, Block};
use crate::error::{NodeError, Result};
use crate::p2p::{ChainResponse, PeerAddress, PeerClient};

/// Outcome of a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The local chain was swapped for a longer valid peer chain
    Replaced,
    /// No peer offered a longer valid chain
    Authoritative,
}

/// One peer's answer to a chain request
#[derive(Debug)]
pub struct PolledChain {
    pub peer: PeerAddress,
    pub response: Result<ChainResponse>,
}

/// Polls peers and picks the chain to adopt
#[derive(Debug, Clone)]
pub struct ConsensusResolver {
    client: PeerClient,
}

impl ConsensusResolver {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }

    /// Fetch every peer's chain concurrently. Results keep the order of
    /// `peers`; a failing peer yields an error entry rather than aborting.
    pub async fn poll(&self, peers: &[PeerAddress]) -> Vec<PolledChain> {
        let requests = peers.iter().map(|peer| async move {
            PolledChain {
                peer: peer.clone(),
                response: self.client.fetch_chain(peer).await,
            }
        });
        join_all(requests).await
    }
}

/// Pick the longest valid chain strictly longer than `local_length`.
///
/// Unreachable peers and invalid candidates are skipped. Returns the
/// winning peer and its chain, or `None` if the local chain stands.
pub fn select_longest_chain(
    local_length: usize,
    polled: Vec<PolledChain>,
) -> Option<(PeerAddress, Vec<Block>)> {
    let mut max_length = local_length as u64;
    let mut best = None;

    for PolledChain { peer, response } in polled {
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(peer = %peer, error = %e, "skipping peer");
                continue;
            }
        };

        if response.length <= max_length {
            debug!(peer = %peer, length = response.length, "peer chain not longer");
            continue;
        }

        if let Err(e) = candidate_error(&peer, &response) {
            warn!(peer = %peer, error = %e, "discarding candidate chain");
            continue;
        }

        max_length = response.length;
        best = Some((peer, response.chain));
    }

    best
}

fn candidate_error(peer: &PeerAddress, response: &ChainResponse) -> Result<()> {
    let invalid = || NodeError::InvalidCandidateChain { peer: peer.authority() };

    if !response.is_consistent() {
        return Err(invalid());
    }
    check_chain(&response.chain).map_err(|e| {
        debug!(peer = %peer, reason = %e, "candidate failed validation");
        invalid()
    })
}
