//! Storage module - in-memory chain and mempool state

mod mempool;
mod state;

pub use mempool::*;
pub use state::*;
