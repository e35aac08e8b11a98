//! Error types for the neurai-key library

use thiserror::Error;

/// Custom error type for neurai-key operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown network \"{network}\", network must be of value {supported}")]
    UnknownNetwork {
        /// The identifier that was passed in
        network: String,
        /// Comma separated list of the supported identifiers
        supported: String,
    },

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid entropy: {0}")]
    InvalidEntropy(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Invalid child key at index {0}")]
    InvalidChildKey(u32),

    #[error("Hardened derivation at index {0} requires a private key")]
    HardenedFromPublicOnly(u32),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Public key must be 33 or 65 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid Base58Check checksum")]
    InvalidChecksum,

    #[error("Invalid WIF payload length: {0}")]
    InvalidWifLength(usize),

    #[error("Invalid Base58 string: {0}")]
    InvalidBase58(String),

    #[error("Invalid extended key: {0}")]
    InvalidExtendedKey(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHex(e.to_string())
    }
}

/// Result type for neurai-key operations
pub type Result<T> = std::result::Result<T, Error>;
