//! Proof of work
//!
//! A proof `p` is valid for a previous block when
//! `sha256(prev_proof ++ p ++ prev_hash)` starts with `DIFFICULTY_PREFIX`.
//! Binding the previous hash into the challenge keeps two forks that share
//! a prior proof from converging on the same solution.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::consensus::Block;
use crate::constants::DIFFICULTY_PREFIX;
use crate::crypto::sha256_hex;

/// Validate a candidate proof against the previous proof and block hash
pub fn valid_proof(last_proof: u64, proof: u64, last_hash: &str) -> bool {
    let guess = format!("{}{}{}", last_proof, proof, last_hash);
    sha256_hex(guess.as_bytes()).starts_with(DIFFICULTY_PREFIX)
}

/// Smallest non-negative proof that is valid on top of `last_block`.
///
/// Exhaustive and unbounded; at the fixed difficulty it terminates after
/// roughly 16^len(prefix) attempts on average.
pub fn find_proof(last_block: &Block) -> u64 {
    // Without a stop signal the search only returns on success
    search_proof(last_block, None).unwrap_or_default()
}

/// The search behind `find_proof`, checking `stop` between candidates.
///
/// Returns `None` once `stop` is set.
pub fn search_proof(last_block: &Block, stop: Option<&AtomicBool>) -> Option<u64> {
    let last_hash = last_block.hash();
    let mut proof = 0u64;

    loop {
        if stop.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            return None;
        }

        if valid_proof(last_block.proof, proof, &last_hash) {
            return Some(proof);
        }

        proof = proof.wrapping_add(1);
    }
}
