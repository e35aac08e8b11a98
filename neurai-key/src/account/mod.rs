//! Address derivation for wallet accounts
//!
//! This module turns mnemonics, master keys and WIF strings into the
//! address objects handed to callers.

mod address;
mod wallet;

pub use address::*;
pub use wallet::*;
