//! Pending transaction pool
//!
//! Transactions wait here in submission order until a block is forged.
//! Forging drains the whole pool at once; anything submitted afterwards
//! belongs to the next generation.

use crate::validation::Transaction;

/// Transaction mempool
#[derive(Debug, Default, Clone)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    /// Create an empty mempool
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an admitted transaction
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Snapshot and clear in one step
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    /// Pending transactions in submission order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

}

/// Sum of the fees carried by a batch of transactions
pub fn total_fees(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|tx| tx.fee).sum()
}
