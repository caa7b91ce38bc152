//! Shared node handle
//!
//! `Node` owns the ledger, the peer set and the miner. It is cheap to
//! clone; every clone refers to the same state, so one handle is created
//! at startup and passed to each request handler.
//!
//! Locking: the ledger (chain + mempool) sits behind a single mutex, so
//! submission, snapshot-and-clear, append and replacement never
//! interleave. The proof search and peer polling run with no lock held.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::NodeConfig;
use crate::consensus::{select_longest_chain, Block, ConsensusResolver, Resolution};
use crate::crypto::{EcdsaVerifier, SignatureVerifier};
use crate::error::{NodeError, Result};
use crate::mining::{Miner, MiningResult};
use crate::node::create_genesis_block;
use crate::p2p::{ChainResponse, PeerAddress, PeerClient, PeerSet};
use crate::storage::LedgerState;
use crate::validation::{validate_transaction, Transaction};

/// Random node identity: a UUID v4 as 32 hex characters
pub fn generate_identity() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Handle to one running ledger node
#[derive(Clone)]
pub struct Node {
    ledger: Arc<Mutex<LedgerState>>,
    peers: Arc<Mutex<PeerSet>>,
    miner: Miner,
    verifier: Arc<dyn SignatureVerifier>,
    resolver: ConsensusResolver,
}

impl Node {
    /// Create a node with a fresh genesis block and ECDSA verification
    pub fn new(identity: impl Into<String>, peer_timeout: Duration) -> Result<Self> {
        Self::with_verifier(identity, peer_timeout, Arc::new(EcdsaVerifier))
    }

    pub fn with_verifier(
        identity: impl Into<String>,
        peer_timeout: Duration,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        let client = PeerClient::new(peer_timeout)?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(LedgerState::new(create_genesis_block()))),
            peers: Arc::new(Mutex::new(PeerSet::new())),
            miner: Miner::new(identity),
            verifier,
            resolver: ConsensusResolver::new(client),
        })
    }

    /// Build a node from command-line configuration, registering any
    /// bootstrap peers
    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let identity = config.identity.clone().unwrap_or_else(generate_identity);
        let node = Self::new(identity, config.peer_timeout())?;
        node.register_peers(&config.peers)?;
        Ok(node)
    }

    pub fn identity(&self) -> &str {
        self.miner.node_identity()
    }

    /// Stop the miner; in-flight and later mines fail with
    /// `MiningInterrupted`
    pub fn shutdown(&self) {
        self.miner.stop();
    }

    /// Snapshot of the full chain with its length
    pub fn chain(&self) -> ChainResponse {
        ChainResponse::new(self.ledger.lock().chain().to_vec())
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.ledger.lock().pending_transactions()
    }

    /// Verify and queue a transaction.
    ///
    /// Returns the index of the block that is expected to include it.
    pub fn submit_transaction(&self, tx: Transaction) -> Result<u64> {
        validate_transaction(&tx, self.verifier.as_ref())?;

        let index = self.ledger.lock().add_transaction(tx);
        info!(index, "transaction queued");
        Ok(index)
    }

    /// Forge one block: search for a proof on the current tip, then take
    /// the mempool and append.
    ///
    /// The search runs on the blocking pool with no lock held. If the tip
    /// moved while searching (another forge, or a resolution), the work is
    /// discarded and the search restarts from the new tip.
    pub async fn mine(&self) -> Result<Block> {
        loop {
            let last = self.ledger.lock().last_block().clone();
            let last_hash = last.hash();

            let miner = self.miner.clone();
            let tip = last.clone();
            let result = tokio::task::spawn_blocking(move || miner.mine_proof(&tip))
                .await
                .map_err(|_| NodeError::MiningInterrupted)?;

            let proof = match result {
                MiningResult::Success(proof) => proof,
                MiningResult::Interrupted => return Err(NodeError::MiningInterrupted),
            };

            match self.append_forged(&last, proof) {
                Some(block) => {
                    info!(
                        index = block.index,
                        proof = block.proof,
                        transactions = block.transactions.len(),
                        "block forged"
                    );
                    return Ok(block);
                }
                None => debug!(stale = %last_hash, "tip moved during search, restarting"),
            }
        }
    }

    /// Take the mempool and append a block solved on top of `last`.
    ///
    /// Returns `None`, leaving the ledger untouched, if `last` is no longer
    /// the tip. The new block is numbered from the chain length.
    fn append_forged(&self, last: &Block, proof: u64) -> Option<Block> {
        let mut ledger = self.ledger.lock();
        if ledger.last_block().hash() != last.hash() {
            return None;
        }

        let index = ledger.next_index();
        let pending = ledger.take_pending();
        let block = self.miner.assemble_block(last, index, proof, pending);
        ledger.append_block(block.clone());
        Some(block)
    }

    /// Register peers by URL or `host:port`.
    ///
    /// Every entry is parsed before any is added, so one bad address
    /// rejects the whole batch. Returns all known peers afterwards.
    pub fn register_peers(&self, nodes: &[String]) -> Result<Vec<String>> {
        let addrs = nodes
            .iter()
            .map(|node| PeerAddress::parse(node))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut peers = self.peers.lock();
        for addr in addrs {
            if peers.add(addr.clone()) {
                info!(peer = %addr, "peer registered");
            }
        }
        Ok(peers.authorities())
    }

    /// Registered peers in registration order
    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().authorities()
    }

    /// Poll every peer and adopt the longest valid chain if it beats ours.
    ///
    /// Candidates are validated with no lock held; the swap itself re-checks
    /// the length against the chain as it is at that moment.
    ///
    /// Returns the outcome and the chain held afterwards.
    pub async fn resolve(&self) -> (Resolution, Vec<Block>) {
        let peers: Vec<PeerAddress> = self.peers.lock().iter().cloned().collect();
        let polled = self.resolver.poll(&peers).await;

        let local_length = self.ledger.lock().len();
        let winner = select_longest_chain(local_length, polled);

        let mut ledger = self.ledger.lock();
        if let Some((peer, chain)) = winner {
            let length = chain.len();
            if adopt_longer_chain(&mut ledger, chain) {
                info!(peer = %peer, length, "chain replaced");
                return (Resolution::Replaced, ledger.chain().to_vec());
            }
            debug!(peer = %peer, length, "local chain grew past candidate");
        }

        info!(length = ledger.len(), "local chain is authoritative");
        (Resolution::Authoritative, ledger.chain().to_vec())
    }
}

/// Swap in `chain` only if it is still strictly longer than the ledger's
fn adopt_longer_chain(ledger: &mut LedgerState, chain: Vec<Block>) -> bool {
    chain.len() > ledger.len() && ledger.replace_chain(chain)
}
