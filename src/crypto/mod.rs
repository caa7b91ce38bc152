//! Cryptography module - SHA-256 hashing, ECDSA signatures

mod ecdsa;
mod hash;

pub use ecdsa::*;
pub use hash::*;
