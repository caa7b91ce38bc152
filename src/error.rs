//! Node error types

use thiserror::Error;

use crate::p2p::PeerAddressError;

/// Errors surfaced by node operations
#[derive(Debug, Error)]
pub enum NodeError {
    /// A required request field was absent
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Invalid transaction signature")]
    InvalidSignature,
    #[error("Invalid peer address: {0}")]
    InvalidPeerAddress(#[from] PeerAddressError),
    /// Peer could not be polled; skipped during resolution
    #[error("Peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },
    /// Peer offered a chain that failed validation; skipped during resolution
    #[error("Peer {peer} offered an invalid chain")]
    InvalidCandidateChain { peer: String },
    #[error("Mining interrupted")]
    MiningInterrupted,
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl NodeError {
    /// Whether the caller, rather than the node, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NodeError::MalformedRequest(_)
                | NodeError::InvalidSignature
                | NodeError::InvalidPeerAddress(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;
