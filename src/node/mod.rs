//! Node module - genesis and the shared node handle

mod genesis;
mod service;

pub use genesis::*;
pub use service::*;
