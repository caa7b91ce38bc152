//! Wallet implementation
//!
//! Handles key generation and transaction signing on the client side.
//! The wallet does NOT affect consensus - the node only ever verifies.

use crate::crypto::{PrivateKey, PublicKey, SignatureError};
use crate::validation::{signing_payload, Transaction};

/// A wallet key pair
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Private key (for signing)
    private_key: PrivateKey,
    /// Public key
    pub public_key: PublicKey,
    /// Address (hex of the compressed public key)
    pub address: String,
}

impl KeyPair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey::generate())
    }

    /// Import from a hex-encoded private key
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, SignatureError> {
        Ok(Self::from_private_key(PrivateKey::from_hex(hex_str)?))
    }

    fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.to_hex();

        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// Export private key as hex
    pub fn private_key_hex(&self) -> String {
        self.private_key.to_hex()
    }

    /// Sign arbitrary data, returning a hex signature
    pub fn sign(&self, data: &str) -> String {
        self.private_key.sign(data.as_bytes())
    }

    /// Build a transfer from this wallet, signed and ready to submit
    pub fn sign_transaction(&self, recipient: &str, amount: f64, fee: f64) -> Transaction {
        let payload = signing_payload(&self.address, recipient, amount, fee);
        let signature = self.sign(&payload);
        Transaction::new(self.address.clone(), recipient, amount, fee, signature)
    }
}
