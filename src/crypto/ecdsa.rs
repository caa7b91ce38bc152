//! ECDSA signature implementation
//!
//! Uses the secp256k1 curve with SHA-256 message digests. Keys and
//! signatures travel as hex strings: a public key is the hex of its
//! compressed SEC1 encoding and doubles as the account address.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

/// Signature errors
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Checks a signature over a message on behalf of a public key.
///
/// Transaction admission only depends on this capability, never on a
/// concrete curve.
pub trait SignatureVerifier: Send + Sync {
    /// True iff `signature` is a valid signature of `message` by `public_key`.
    /// Malformed keys or signatures verify as false.
    fn verify(&self, public_key: &str, signature: &str, message: &[u8]) -> bool;
}

/// secp256k1 ECDSA verifier over hex-encoded keys and signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaVerifier;

impl SignatureVerifier for EcdsaVerifier {
    fn verify(&self, public_key: &str, signature: &str, message: &[u8]) -> bool {
        let public_key = match PublicKey::from_hex(public_key) {
            Ok(pk) => pk,
            Err(_) => return false,
        };
        public_key.verify(message, signature)
    }
}

/// 32-byte private key
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

/// Public key (compressed SEC1 point)
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PrivateKey {
    /// Generate a new random private key
    pub fn generate() -> Self {
        PrivateKey(SigningKey::random(&mut OsRng))
    }

    /// Create from raw scalar bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        SigningKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|_| SignatureError::InvalidPrivateKey)
    }

    /// Create from a hex-encoded scalar
    pub fn from_hex(hex_str: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.0.verifying_key())
    }

    /// Sign a message, returning the hex of the 64-byte signature
    pub fn sign(&self, message: &[u8]) -> String {
        let signature: Signature = self.0.sign(message);
        hex::encode(signature.to_bytes())
    }

    /// Export as hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }
}

impl PublicKey {
    /// Parse from hex-encoded SEC1 bytes (compressed or not)
    pub fn from_hex(hex_str: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(hex_str)?;
        VerifyingKey::from_sec1_bytes(&bytes)
            .map(PublicKey)
            .map_err(|_| SignatureError::InvalidPublicKey)
    }

    /// Verify a hex-encoded signature
    pub fn verify(&self, message: &[u8], signature_hex: &str) -> bool {
        let bytes = match hex::decode(signature_hex) {
            Ok(b) => b,
            Err(_) => return false,
        };
        let sig = match Signature::from_slice(&bytes) {
            Ok(s) => s,
            Err(_) => return false,
        };

        self.0.verify(message, &sig).is_ok()
    }

    /// Hex of the compressed SEC1 encoding; used as the address
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_encoded_point(true).as_bytes())
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}
