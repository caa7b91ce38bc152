//! Transaction module - structure, signing payload, admission

mod transaction;

pub use transaction::*;
