//! Transaction structure and admission checks
//!
//! Account-style transfers signed with ECDSA. The sender field is the
//! signer's public key; the signature covers every field but itself.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::constants::{COINBASE_SENDER, COINBASE_SIGNATURE};
use crate::crypto::{canonical_string, SignatureVerifier};
use crate::error::{NodeError, Result};

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Hex public key of the sender, or the coinbase sentinel
    pub sender: String,
    /// Hex public key (or node identity) of the recipient
    pub recipient: String,
    pub amount: f64,
    /// Paid to the miner of the block that includes this transaction
    pub fee: f64,
    /// Hex signature over the signing payload, or the coinbase sentinel
    pub signature: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
        fee: f64,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            fee,
            signature: signature.into(),
        }
    }

    /// Create a coinbase transaction (mining reward)
    pub fn coinbase(recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: COINBASE_SENDER.to_string(),
            recipient: recipient.into(),
            amount,
            fee: 0.0,
            signature: COINBASE_SIGNATURE.to_string(),
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.sender == COINBASE_SENDER
    }

    /// Canonical JSON of the signed fields
    pub fn signing_payload(&self) -> String {
        signing_payload(&self.sender, &self.recipient, self.amount, self.fee)
    }

    /// JSON value used when this transaction is hashed as part of a block
    pub fn to_value(&self) -> Value {
        json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "amount": self.amount,
            "fee": self.fee,
            "signature": self.signature,
        })
    }

    /// Verify the sender's signature. Coinbase transactions are exempt.
    pub fn verify_signature(&self, verifier: &dyn SignatureVerifier) -> bool {
        if self.is_coinbase() {
            return true;
        }

        verifier.verify(
            &self.sender,
            &self.signature,
            self.signing_payload().as_bytes(),
        )
    }
}

/// Canonical JSON of `{sender, recipient, amount, fee}`; the exact bytes a
/// wallet signs and the node verifies.
pub fn signing_payload(sender: &str, recipient: &str, amount: f64, fee: f64) -> String {
    canonical_string(&json!({
        "sender": sender,
        "recipient": recipient,
        "amount": amount,
        "fee": fee,
    }))
}

/// Admission check run before a transaction may enter the mempool.
///
/// Only the signature is checked here; field presence is the caller's job.
pub fn validate_transaction(tx: &Transaction, verifier: &dyn SignatureVerifier) -> Result<()> {
    if !tx.verify_signature(verifier) {
        debug!(sender = %tx.sender, "rejecting transaction with bad signature");
        return Err(NodeError::InvalidSignature);
    }

    Ok(())
}
