//! Block miner implementation
//!
//! Searches for proofs and assembles candidate blocks. The search is
//! CPU-bound and runs without touching shared state; only the caller's
//! final append needs exclusive access to the ledger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::consensus::{current_timestamp, search_proof, Block};
use crate::constants::BASE_REWARD;
use crate::storage::total_fees;
use crate::validation::Transaction;

/// Mining result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningResult {
    /// Found the smallest valid proof
    Success(u64),
    /// Mining was interrupted
    Interrupted,
}

/// Block miner
#[derive(Debug, Clone)]
pub struct Miner {
    /// Coinbase recipient for blocks this node forges
    node_identity: String,
    /// Stop signal
    stop_signal: Arc<AtomicBool>,
}

impl Miner {
    /// Create a new miner
    pub fn new(node_identity: impl Into<String>) -> Self {
        Self {
            node_identity: node_identity.into(),
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn node_identity(&self) -> &str {
        &self.node_identity
    }

    /// Stop mining. Any search in progress, and every later one, returns
    /// `Interrupted`.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }

    /// Find the smallest valid proof on top of `last_block`, giving up
    /// when the miner is stopped.
    pub fn mine_proof(&self, last_block: &Block) -> MiningResult {
        match search_proof(last_block, Some(self.stop_signal.as_ref())) {
            Some(proof) => MiningResult::Success(proof),
            None => MiningResult::Interrupted,
        }
    }

    /// Assemble block number `index` on top of `last_block`.
    ///
    /// The coinbase goes first and pays the base reward plus every fee in
    /// `pending`; the pending transactions follow in their original order.
    pub fn assemble_block(
        &self,
        last_block: &Block,
        index: u64,
        proof: u64,
        pending: Vec<Transaction>,
    ) -> Block {
        let reward = BASE_REWARD + total_fees(&pending);
        let coinbase = Transaction::coinbase(self.node_identity.clone(), reward);

        let mut transactions = Vec::with_capacity(pending.len() + 1);
        transactions.push(coinbase);
        transactions.extend(pending);

        Block::new(
            index,
            current_timestamp(),
            transactions,
            proof,
            last_block.hash(),
        )
    }
}
