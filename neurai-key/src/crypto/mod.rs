//! Cryptographic primitives and operations
//!
//! This module provides mnemonic handling, seed derivation, hashing and
//! Base58Check encoding, and hierarchical key derivation.

pub mod base58;
pub mod hash;
pub mod keys;
pub mod mnemonic;

pub use keys::*;
pub use mnemonic::*;
