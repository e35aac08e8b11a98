//! Address result types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::Network;

/// One derived key with its address, as handed to callers
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressObject {
    /// Base58Check pay-to-pubkey-hash address
    pub address: String,
    /// Derivation path, e.g. `m/44'/0'/0'/0/0`
    pub path: String,
    /// Compressed public key, hex
    pub public_key: String,
    /// Raw private key, hex
    pub private_key: String,
    /// Private key in Wallet Import Format
    #[serde(rename = "WIF")]
    pub wif: String,
}

impl fmt::Debug for AddressObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressObject")
            .field("address", &self.address)
            .field("path", &self.path)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Receiving and change address at the same account and position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPair {
    /// Chain 0, receiving address
    pub external: AddressObject,
    /// Chain 1, change address
    pub internal: AddressObject,
    pub position: u32,
}

/// Address recomputed from a WIF private key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifAddress {
    pub address: String,
    /// Raw private key, hex
    pub private_key: String,
    /// The key re-encoded with the target network's WIF version
    #[serde(rename = "WIF")]
    pub wif: String,
}

impl fmt::Debug for WifAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifAddress")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// A freshly generated wallet: its first receiving address plus the mnemonic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAddress {
    #[serde(flatten)]
    pub address: AddressObject,
    pub mnemonic: String,
    pub network: Network,
}
