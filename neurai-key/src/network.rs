//! Network registry
//!
//! Every supported network is a variant of [`Network`] and resolves to one
//! complete [`NetworkParameters`] set. Adding a network means adding a variant;
//! the compiler then points at every match that has to learn about it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// BIP32 extended key version bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bip32Versions {
    /// Prefix of serialized extended private keys (xprv, tprv)
    pub private: u32,
    /// Prefix of serialized extended public keys (xpub, tpub)
    pub public: u32,
}

/// Cryptographic parameters of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParameters {
    /// BIP32 version bytes for extended key serialization
    pub bip32: Bip32Versions,
    /// SLIP-44 coin type used as the second BIP44 path level
    pub bip44_coin_type: u32,
    /// Base58Check version byte of pay-to-pubkey-hash addresses
    pub pub_key_hash_version: u8,
    /// Base58Check version byte of WIF private keys
    pub wif_version: u8,
}

/// Supported networks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Neurai mainnet
    #[default]
    #[serde(rename = "xna")]
    Xna,
    /// Neurai testnet
    #[serde(rename = "xna-test")]
    XnaTest,
}

impl Network {
    /// All supported networks, in registry order
    pub const ALL: &'static [Network] = &[Network::Xna, Network::XnaTest];

    /// Canonical identifier, e.g. `"xna"`
    pub fn id(&self) -> &'static str {
        match self {
            Network::Xna => "xna",
            Network::XnaTest => "xna-test",
        }
    }

    /// Parameters of this network
    pub fn params(&self) -> NetworkParameters {
        match self {
            Network::Xna => NetworkParameters {
                bip32: Bip32Versions {
                    private: 0x0488_ade4,
                    public: 0x0488_b21e,
                },
                bip44_coin_type: 0,
                pub_key_hash_version: 53,
                wif_version: 128,
            },
            Network::XnaTest => NetworkParameters {
                bip32: Bip32Versions {
                    private: 0x0435_8394,
                    public: 0x0435_87cf,
                },
                bip44_coin_type: 1,
                pub_key_hash_version: 127,
                wif_version: 239,
            },
        }
    }

    fn supported_ids() -> String {
        Self::ALL
            .iter()
            .map(Network::id)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|network| network.id() == wanted)
            .ok_or_else(|| Error::UnknownNetwork {
                network: s.to_string(),
                supported: Self::supported_ids(),
            })
    }
}

/// Look up the parameters of a network by identifier (case-insensitive)
pub fn lookup(network_id: &str) -> Result<NetworkParameters> {
    Ok(network_id.parse::<Network>()?.params())
}
