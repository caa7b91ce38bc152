//! Consensus module - Block structure, proof of work, chain validation, and resolution

mod block;
mod pow;
mod resolver;
mod validation;

pub use block::*;
pub use pow::*;
pub use resolver::*;
pub use validation::*;
