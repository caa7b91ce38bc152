//! Genesis block generation
//!
//! Genesis carries a fixed proof and previous-hash sentinel and holds no
//! transactions. Its timestamp is taken when the node starts.

use crate::consensus::{current_timestamp, Block};
use crate::constants::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

/// Create the genesis block
///
/// Called once when a node's ledger is initialized.
pub fn create_genesis_block() -> Block {
    Block::new(
        1,
        current_timestamp(),
        Vec::new(),
        GENESIS_PROOF,
        GENESIS_PREVIOUS_HASH,
    )
}
