//! Ledger state management
//!
//! Owns the chain and the mempool. State lives in memory only and is
//! lost on restart. All mutation goes through `&mut self`, so callers
//! serialize access by holding one lock around the whole value.

use crate::consensus::Block;
use crate::validation::Transaction;
use super::Mempool;

/// Complete ledger state
#[derive(Debug)]
pub struct LedgerState {
    /// Blocks in order; index 0 is genesis and the chain is never empty
    chain: Vec<Block>,
    /// Transactions awaiting inclusion
    mempool: Mempool,
}

impl LedgerState {
    /// Create a new ledger state from genesis
    pub fn new(genesis_block: Block) -> Self {
        Self {
            chain: vec![genesis_block],
            mempool: Mempool::new(),
        }
    }

    /// The full chain
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false; a ledger holds at least genesis
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The current tip
    pub fn last_block(&self) -> &Block {
        // `new` seeds genesis and `replace_chain` refuses empty chains
        &self.chain[self.chain.len() - 1]
    }

    /// Index the next forged block will carry
    pub fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    /// Queue an admitted transaction; returns the index of the block that
    /// will hold it
    pub fn add_transaction(&mut self, tx: Transaction) -> u64 {
        self.mempool.push(tx);
        self.next_index()
    }

    /// Snapshot of pending transactions
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.mempool.transactions().to_vec()
    }

    /// Snapshot and clear the mempool for a block being forged
    pub fn take_pending(&mut self) -> Vec<Transaction> {
        self.mempool.drain()
    }

    /// Append a forged block on top of the current tip
    pub fn append_block(&mut self, block: Block) {
        debug_assert_eq!(block.previous_hash, self.last_block().hash());
        self.chain.push(block);
    }

    /// Swap the whole chain for an adopted one. Empty chains are refused.
    /// The mempool is left untouched.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        self.chain = chain;
        true
    }
}
