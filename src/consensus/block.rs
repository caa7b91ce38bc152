//! Block structure for the ledger
//!
//! Blocks are immutable once appended. A block's hash is SHA-256 over its
//! canonical JSON form, so it is independent of field construction order.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::GENESIS_PREVIOUS_HASH;
use crate::crypto::hash_value;
use crate::validation::Transaction;

/// A complete block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 1 for genesis
    pub index: u64,
    /// Seconds since Unix epoch, fractional
    pub timestamp: f64,
    /// Coinbase first, then the mempool snapshot in submission order
    pub transactions: Vec<Transaction>,
    /// Proof of work solved against the previous block
    pub proof: u64,
    /// Hex hash of the previous block
    pub previous_hash: String,
}

impl Block {
    /// Create a new block
    pub fn new(
        index: u64,
        timestamp: f64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: impl Into<String>,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash: previous_hash.into(),
        }
    }

    /// JSON value the block hash is computed over
    pub fn to_value(&self) -> Value {
        let transactions: Vec<Value> = self.transactions.iter().map(Transaction::to_value).collect();
        json!({
            "index": self.index,
            "timestamp": self.timestamp,
            "transactions": transactions,
            "proof": self.proof,
            "previous_hash": self.previous_hash,
        })
    }

    /// Get the block hash
    pub fn hash(&self) -> String {
        hash_value(&self.to_value())
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

/// Current wall-clock time as fractional Unix seconds
pub fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
