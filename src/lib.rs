//! Ledger node core library
//!
//! A single proof-of-work ledger node: append-only chain, pending
//! transaction pool, signed transfers, and longest-valid-chain
//! reconciliation against registered peers.

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod mining;
pub mod node;
pub mod p2p;
pub mod rpc;
pub mod storage;
pub mod validation;
pub mod wallet;

pub use error::{NodeError, Result};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    use std::time::Duration;

    /// Required leading characters of a valid proof digest (hex)
    pub const DIFFICULTY_PREFIX: &str = "0000";

    /// Reward credited to the miner of every block, before fees
    pub const BASE_REWARD: f64 = 1.0;

    /// Sender value marking a coinbase transaction
    pub const COINBASE_SENDER: &str = "0";

    /// Signature placeholder carried by coinbase transactions
    pub const COINBASE_SIGNATURE: &str = "0";

    /// Proof stored in the genesis block
    pub const GENESIS_PROOF: u64 = 100;

    /// Previous-hash sentinel stored in the genesis block
    pub const GENESIS_PREVIOUS_HASH: &str = "1";

    /// How long a single peer may take to answer a chain request
    pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);

    /// HTTP port used when none is configured
    pub const DEFAULT_API_PORT: u16 = 5001;
}
