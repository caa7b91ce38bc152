//! P2P module - Peer addresses, chain wire shape, and peer polling

mod client;
mod peer;
mod protocol;

pub use client::*;
pub use peer::*;
pub use protocol::*;
