//! Base58 and Base58Check encoding
//!
//! Base58Check appends the first four bytes of SHA-256d(payload) before the
//! Base58 encoding step. Addresses, WIF keys and serialized extended keys all
//! use it.

use crate::crypto::hash::sha256d;
use crate::error::{Error, Result};

const CHECKSUM_LEN: usize = 4;

/// Encode bytes with the Bitcoin Base58 alphabet
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string with the Bitcoin alphabet
pub fn decode(s: &str) -> Result<Vec<u8>> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| Error::InvalidBase58(e.to_string()))
}

/// Encode `payload || checksum(payload)` as Base58
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&data)
}

/// Decode a Base58Check string and return the payload without its checksum
pub fn check_decode(s: &str) -> Result<Vec<u8>> {
    let mut data = decode(s)?;
    if data.len() < CHECKSUM_LEN {
        return Err(Error::InvalidBase58(format!(
            "{} bytes is too short for a checksum",
            data.len()
        )));
    }

    let split = data.len() - CHECKSUM_LEN;
    let expected = sha256d(&data[..split]);
    if data[split..] != expected[..CHECKSUM_LEN] {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(split);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zeros_become_ones() {
        assert_eq!(encode(&[0, 0, 1]), "112");
        assert_eq!(decode("112").unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn test_check_encode_address_payload() {
        let payload = hex::decode("00010966776006953d5567439e5e39f86a0d273bee").unwrap();
        let encoded = check_encode(&payload);

        assert_eq!(encoded, "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_check_decode_rejects_bad_checksum() {
        // last character changed
        let result = check_decode("16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvN");
        assert_eq!(result.unwrap_err(), Error::InvalidChecksum);
    }

    #[test]
    fn test_check_decode_rejects_invalid_characters() {
        assert!(matches!(check_decode("0OIl"), Err(Error::InvalidBase58(_))));
    }

    #[test]
    fn test_check_decode_rejects_short_input() {
        assert!(matches!(check_decode("1"), Err(Error::InvalidBase58(_))));
    }
}
