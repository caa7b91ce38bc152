//! HTTP API module
//!
//! Flat request/response endpoints for clients and peers.

mod methods;
mod server;

pub use methods::*;
pub use server::*;
