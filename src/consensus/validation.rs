//! Chain validation
//!
//! Pure functions for validating a candidate chain end to end. Only hash
//! links and proofs are checked; transaction signatures inside historical
//! blocks are not re-verified.

use thiserror::Error;

use crate::consensus::{valid_proof, Block};

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainValidationError {
    #[error("Chain is empty")]
    Empty,
    #[error("Block {index} does not link to its predecessor")]
    BrokenLink { index: u64 },
    #[error("Block {index} carries an invalid proof of work")]
    InvalidProof { index: u64 },
}

/// Walk the chain from the second block on, checking each block against
/// its predecessor. Genesis itself is not re-verified.
pub fn check_chain(chain: &[Block]) -> Result<(), ChainValidationError> {
    if chain.is_empty() {
        return Err(ChainValidationError::Empty);
    }

    for pair in chain.windows(2) {
        let (last_block, block) = (&pair[0], &pair[1]);
        let last_hash = last_block.hash();

        if block.previous_hash != last_hash {
            return Err(ChainValidationError::BrokenLink { index: block.index });
        }

        if !valid_proof(last_block.proof, block.proof, &last_hash) {
            return Err(ChainValidationError::InvalidProof { index: block.index });
        }
    }

    Ok(())
}

/// True iff every block links to and proves work on top of its predecessor
pub fn validate_chain(chain: &[Block]) -> bool {
    check_chain(chain).is_ok()
}
