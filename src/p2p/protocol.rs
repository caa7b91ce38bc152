//! Peer wire shapes
//!
//! Peers exchange chains over the same JSON API clients use; a chain
//! request answers with `{chain, length}`.

use serde::{Deserialize, Serialize};

use crate::consensus::Block;

/// Path a peer serves its full chain on
pub const CHAIN_PATH: &str = "/chain";

/// Full chain as served by a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    /// Length the peer reports; must agree with `chain.len()` to be adopted
    pub length: u64,
}

impl ChainResponse {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len() as u64;
        Self { chain, length }
    }

    /// Whether the reported length matches the blocks actually sent
    pub fn is_consistent(&self) -> bool {
        self.length == self.chain.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

    #[test]
    fn test_wire_shape() {
        let genesis = Block::new(1, 0.0, vec![], GENESIS_PROOF, GENESIS_PREVIOUS_HASH);
        let response = ChainResponse::new(vec![genesis]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["length"], 1);
        assert_eq!(value["chain"][0]["index"], 1);
        assert_eq!(value["chain"][0]["proof"], 100);
        assert_eq!(value["chain"][0]["previous_hash"], "1");
        assert!(value["chain"][0]["transactions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_inconsistent_length_detected() {
        let mut response = ChainResponse::new(vec![]);
        assert!(response.is_consistent());
        response.length = 5;
        assert!(!response.is_consistent());
    }
}
