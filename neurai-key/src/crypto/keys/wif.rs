//! Wallet Import Format private keys

use zeroize::Zeroizing;

use crate::crypto::base58;
use crate::error::{Error, Result};

/// Trailing byte marking a WIF key whose public key is compressed
const COMPRESSED_FLAG: u8 = 0x01;

/// A decoded WIF private key
pub struct DecodedWif {
    /// Version byte embedded in the WIF string
    pub version: u8,
    /// Raw 32-byte private key
    pub private_key: Zeroizing<[u8; 32]>,
    /// Whether the key is meant to be used with a compressed public key
    pub compressed: bool,
}

/// Encode a raw private key as WIF
pub fn encode_wif(wif_version: u8, private_key: &[u8; 32], compressed: bool) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(34));
    payload.push(wif_version);
    payload.extend_from_slice(private_key);
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }

    base58::check_encode(&payload)
}

/// Decode a WIF string
///
/// The version byte is returned as found and not checked against any network.
pub fn decode_wif(wif: &str) -> Result<DecodedWif> {
    let payload = Zeroizing::new(base58::check_decode(wif)?);
    let (version, key_data) = payload
        .split_first()
        .ok_or(Error::InvalidWifLength(0))?;

    let compressed = match key_data.len() {
        32 => false,
        33 if key_data[32] == COMPRESSED_FLAG => true,
        33 => {
            return Err(Error::InvalidPrivateKey(format!(
                "unexpected compression flag {:#04x}",
                key_data[32]
            )))
        }
        len => return Err(Error::InvalidWifLength(len)),
    };

    let mut private_key = Zeroizing::new([0u8; 32]);
    private_key.copy_from_slice(&key_data[..32]);

    Ok(DecodedWif {
        version: *version,
        private_key,
        compressed,
    })
}
