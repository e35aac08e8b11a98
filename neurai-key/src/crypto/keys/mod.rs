//! Key derivation and encoding
//!
//! This module provides the BIP32 key tree, derivation paths, and the
//! address and WIF encodings of the keys it produces.

pub mod address;
pub mod extended;
pub mod wif;
mod derivation;

pub use derivation::*;
pub use extended::{public_key_from_private, ExtendedKey};
