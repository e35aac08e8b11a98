//! Neurai Key - HD wallet keys and addresses
//!
//! This library derives BIP32/BIP44 key pairs and Base58Check addresses for
//! the Neurai networks from BIP39 mnemonics, and converts between WIF private
//! keys, public keys and addresses.
//!
//! ```no_run
//! use neurai_key::{get_address_pair, Network};
//!
//! let mnemonic = "result pact model attract result puzzle final boss private educate luggage era";
//! let pair = get_address_pair(Network::Xna, mnemonic, 0, 1, "")?;
//! println!("{} {}", pair.external.address, pair.internal.address);
//! # Ok::<(), neurai_key::Error>(())
//! ```

pub mod error;
pub mod network;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use network::{Network, NetworkParameters};
pub use crypto::keys::{DerivationPath, ExtendedKey};
pub use crypto::mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, is_mnemonic_valid, MnemonicStrength,
};
pub use account::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
