//! Pay-to-pubkey-hash addresses

use super::extended::{COMPRESSED_PUBLIC_KEY_LEN, UNCOMPRESSED_PUBLIC_KEY_LEN};
use crate::crypto::{base58, hash::hash160};
use crate::error::{Error, Result};

/// Length of a decoded address payload: version byte + hash160
const ADDRESS_PAYLOAD_LEN: usize = 21;

/// Encode a SEC1 public key (33 or 65 bytes) as a Base58Check address
pub fn encode_address(pub_key_hash_version: u8, public_key: &[u8]) -> Result<String> {
    if public_key.len() != COMPRESSED_PUBLIC_KEY_LEN
        && public_key.len() != UNCOMPRESSED_PUBLIC_KEY_LEN
    {
        return Err(Error::InvalidPublicKeyLength(public_key.len()));
    }

    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
    payload.push(pub_key_hash_version);
    payload.extend_from_slice(&hash160(public_key));

    Ok(base58::check_encode(&payload))
}

/// Split an address into its version byte and public key hash
pub fn decode_address(address: &str) -> Result<(u8, [u8; 20])> {
    let payload = base58::check_decode(address)?;
    if payload.len() != ADDRESS_PAYLOAD_LEN {
        return Err(Error::InvalidBase58(format!(
            "address payload must be {} bytes, got {}",
            ADDRESS_PAYLOAD_LEN,
            payload.len()
        )));
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], hash))
}

/// Whether `address` is a well-formed address with the given version byte
pub fn validate_address(pub_key_hash_version: u8, address: &str) -> bool {
    matches!(decode_address(address), Ok((version, _)) if version == pub_key_hash_version)
}
