//! Hash primitives used by address and key encoding

use bitcoin::hashes::{hash160 as bitcoin_hash160, sha256d as bitcoin_sha256d, Hash};

/// Double SHA-256, the Base58Check checksum hash
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    bitcoin_sha256d::Hash::hash(data).to_byte_array()
}

/// RIPEMD-160(SHA-256(data))
///
/// Used for pay-to-pubkey-hash addresses and BIP32 key fingerprints.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    bitcoin_hash160::Hash::hash(data).to_byte_array()
}
