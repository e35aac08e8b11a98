//! Wallet implementation
//!
//! Composes seed derivation, the BIP32 key tree and the address codec into
//! the BIP44 address functions. Everything here is deterministic: the same
//! inputs always give the same addresses.

use tracing::{debug, instrument};

use super::address::{AddressObject, AddressPair, GeneratedAddress, WifAddress};
use crate::crypto::keys::address::encode_address;
use crate::crypto::keys::wif::{decode_wif, encode_wif};
use crate::crypto::keys::{public_key_from_private, Chain, DerivationPath, ExtendedKey};
use crate::crypto::mnemonic::{derive_seed, generate_mnemonic};
use crate::error::{Error, Result};
use crate::network::Network;

/// An HD wallet rooted at one master key on one network
#[derive(Debug, Clone)]
pub struct Wallet {
    network: Network,
    master: ExtendedKey,
}

impl Wallet {
    /// Create a wallet from a mnemonic and optional passphrase
    ///
    /// The phrase is not validated; use [`crate::is_mnemonic_valid`] first if
    /// it comes from user input.
    pub fn from_mnemonic(network: Network, mnemonic: &str, passphrase: &str) -> Result<Self> {
        let seed = derive_seed(mnemonic, passphrase);
        let master = ExtendedKey::master_from_seed(seed.as_bytes(), network.params().bip32)?;

        Ok(Self { network, master })
    }

    /// Create a wallet from an existing master key
    pub fn from_master_key(network: Network, master: ExtendedKey) -> Self {
        Self { network, master }
    }

    /// Get the wallet's network
    pub fn network(&self) -> Network {
        self.network
    }

    /// Get the wallet's master key
    pub fn master_key(&self) -> &ExtendedKey {
        &self.master
    }

    /// Derive the address object at a parsed path
    pub fn address_at(&self, path: &DerivationPath) -> Result<AddressObject> {
        let derived = self.master.derive_path(path)?;
        address_object(self.network, &derived, path)
    }

    /// Derive the address object at a textual path, e.g. `m/44'/0'/0'/0/0`
    pub fn address_by_path(&self, path: &str) -> Result<AddressObject> {
        self.address_at(&path.parse()?)
    }

    /// Derive the receiving and change addresses at `account` and `position`
    #[instrument(skip(self), fields(network = %self.network))]
    pub fn address_pair(&self, account: u32, position: u32) -> Result<AddressPair> {
        let coin_type = self.network.params().bip44_coin_type;

        let external_path = DerivationPath::bip44(coin_type, account, Chain::External, position)?;
        let internal_path = DerivationPath::bip44(coin_type, account, Chain::Internal, position)?;
        debug!(external = %external_path, internal = %internal_path, "deriving address pair");

        Ok(AddressPair {
            external: self.address_at(&external_path)?,
            internal: self.address_at(&internal_path)?,
            position,
        })
    }
}

/// A public key given either as raw bytes or as a hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyInput<'a> {
    Bytes(&'a [u8]),
    Hex(&'a str),
}

impl PublicKeyInput<'_> {
    fn to_bytes(self) -> Result<Vec<u8>> {
        match self {
            PublicKeyInput::Bytes(bytes) => Ok(bytes.to_vec()),
            PublicKeyInput::Hex(s) => Ok(hex::decode(s)?),
        }
    }
}

impl<'a> From<&'a [u8]> for PublicKeyInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PublicKeyInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for PublicKeyInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        PublicKeyInput::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for PublicKeyInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        PublicKeyInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for PublicKeyInput<'a> {
    fn from(s: &'a str) -> Self {
        PublicKeyInput::Hex(s)
    }
}

impl<'a> From<&'a String> for PublicKeyInput<'a> {
    fn from(s: &'a String) -> Self {
        PublicKeyInput::Hex(s)
    }
}

/// SLIP-44 coin type of a network, e.g. 0 for Neurai mainnet
pub fn get_coin_type(network: Network) -> u32 {
    network.params().bip44_coin_type
}

/// Derive the master key of a mnemonic and optional passphrase
pub fn get_hd_key(network: Network, mnemonic: &str, passphrase: &str) -> Result<ExtendedKey> {
    Ok(Wallet::from_mnemonic(network, mnemonic, passphrase)?.master)
}

/// Derive the address object at `path` below `hd_key`
///
/// The derived key must carry a private key, so `hd_key` has to be a private
/// extended key.
pub fn get_address_by_path(
    network: Network,
    hd_key: &ExtendedKey,
    path: &str,
) -> Result<AddressObject> {
    Wallet::from_master_key(network, hd_key.clone()).address_by_path(path)
}

/// Derive the external (`.../0/position`) and internal (`.../1/position`)
/// addresses of a BIP44 account
#[instrument(skip(mnemonic, passphrase))]
pub fn get_address_pair(
    network: Network,
    mnemonic: &str,
    account: u32,
    position: u32,
    passphrase: &str,
) -> Result<AddressPair> {
    Wallet::from_mnemonic(network, mnemonic, passphrase)?.address_pair(account, position)
}

/// Recompute the address of a WIF private key on `network`
///
/// The version byte inside the WIF is not compared with `network`: a key
/// exported on one network yields its address under the other network's
/// version byte. Check the WIF prefix yourself if that matters.
#[instrument(skip(wif))]
pub fn get_address_by_wif(network: Network, wif: &str) -> Result<WifAddress> {
    let params = network.params();
    let decoded = decode_wif(wif)?;
    if decoded.version != params.wif_version {
        debug!(
            wif_version = decoded.version,
            "WIF version differs from the target network"
        );
    }

    let public_key = public_key_from_private(&decoded.private_key, decoded.compressed)?;

    Ok(WifAddress {
        address: encode_address(params.pub_key_hash_version, &public_key)?,
        private_key: hex::encode(*decoded.private_key),
        wif: encode_wif(params.wif_version, &decoded.private_key, decoded.compressed),
    })
}

/// Compressed public key of a WIF private key, hex
///
/// The public key does not depend on the network: `network` is only recorded
/// in the tracing span, and the WIF version byte is not checked against it.
#[instrument(skip(wif))]
pub fn get_pubkey_by_wif(network: Network, wif: &str) -> Result<String> {
    let decoded = decode_wif(wif)?;
    let public_key = public_key_from_private(&decoded.private_key, true)?;
    Ok(hex::encode(public_key))
}

/// Address of a SEC1 public key (33 or 65 bytes, raw or hex)
pub fn public_key_to_address<'a>(
    network: Network,
    public_key: impl Into<PublicKeyInput<'a>>,
) -> Result<String> {
    let public_key = public_key.into().to_bytes()?;
    encode_address(network.params().pub_key_hash_version, &public_key)
}

/// Generate a fresh mnemonic and return its first receiving address
/// (account 0, position 0)
#[instrument(skip(passphrase))]
pub fn generate_address_object(network: Network, passphrase: &str) -> Result<GeneratedAddress> {
    let mnemonic = generate_mnemonic()?;
    let pair = get_address_pair(network, &mnemonic, 0, 0, passphrase)?;

    Ok(GeneratedAddress {
        address: pair.external,
        mnemonic,
        network,
    })
}

/// Generate a random address object
#[deprecated(note = "use generate_address_object")]
pub fn generate_address(network: Network) -> Result<GeneratedAddress> {
    generate_address_object(network, "")
}

fn address_object(
    network: Network,
    key: &ExtendedKey,
    path: &DerivationPath,
) -> Result<AddressObject> {
    let params = network.params();
    let private_key = key.private_key().ok_or_else(|| {
        Error::InvalidPrivateKey(format!("key at {} has no private part", path))
    })?;

    Ok(AddressObject {
        address: encode_address(params.pub_key_hash_version, key.public_key())?,
        path: path.to_string(),
        public_key: hex::encode(key.public_key()),
        private_key: hex::encode(private_key),
        wif: encode_wif(params.wif_version, private_key, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str =
        "result pact model attract result puzzle final boss private educate luggage era";

    #[test]
    fn test_mainnet_address_pair() {
        let pair = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();

        assert_eq!(pair.position, 1);
        assert_eq!(pair.external.address, "NLdcSXGQvCVf2RTKhx7GZom34f1JADhBTp");
        assert_eq!(pair.external.path, "m/44'/0'/0'/0/1");
        assert_eq!(
            pair.external.wif,
            "KwWavecys1Qskgzwsyv6CNeTospWkvMeLzx3dLqeV4xAJEMXF8Qq"
        );
        assert_eq!(pair.internal.address, "NQM5zP6jkwDgCZ2UQiUicW4e3YcWc4NY4S");
        assert_eq!(pair.internal.path, "m/44'/0'/0'/1/1");
    }

    #[test]
    fn test_testnet_address_pair() {
        let pair = get_address_pair(Network::XnaTest, MNEMONIC, 0, 1, "").unwrap();

        assert_eq!(pair.external.address, "tPXGaMRNwZuV1UKSrD9gABPscrJWUmedQ9");
        assert_eq!(
            pair.external.wif,
            "cSfwLzc9DNj4PdzyGK1sAZzxNwih2HaezMrT8w4MXyhf8qhaHJiE"
        );
        assert_eq!(pair.external.path, "m/44'/1'/0'/0/1");
    }

    #[test]
    fn test_wallet_reuses_master_key() {
        let wallet = Wallet::from_mnemonic(Network::Xna, MNEMONIC, "").unwrap();
        let from_wallet = wallet.address_pair(0, 1).unwrap();
        let from_mnemonic = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();

        assert_eq!(from_wallet, from_mnemonic);
        assert_eq!(wallet.network(), Network::Xna);
        assert_eq!(wallet.master_key().depth(), 0);
    }

    #[test]
    fn test_get_address_by_path_matches_pair() {
        let hd_key = get_hd_key(Network::Xna, MNEMONIC, "").unwrap();
        let object = get_address_by_path(Network::Xna, &hd_key, "m/44'/0'/0'/0/1").unwrap();

        assert_eq!(object.address, "NLdcSXGQvCVf2RTKhx7GZom34f1JADhBTp");
    }

    #[test]
    fn test_get_address_by_path_requires_private_key() {
        let hd_key = get_hd_key(Network::Xna, MNEMONIC, "").unwrap().neutered();

        assert!(matches!(
            get_address_by_path(Network::Xna, &hd_key, "m/0/1"),
            Err(Error::InvalidPrivateKey(_))
        ));
        assert_eq!(
            get_address_by_path(Network::Xna, &hd_key, "m/44'/0'").unwrap_err(),
            Error::HardenedFromPublicOnly(44)
        );
    }

    #[test]
    fn test_get_address_by_wif() {
        let result =
            get_address_by_wif(Network::Xna, "KwWavecys1Qskgzwsyv6CNeTospWkvMeLzx3dLqeV4xAJEMXF8Qq")
                .unwrap();

        assert_eq!(result.address, "NLdcSXGQvCVf2RTKhx7GZom34f1JADhBTp");
        assert_eq!(result.wif, "KwWavecys1Qskgzwsyv6CNeTospWkvMeLzx3dLqeV4xAJEMXF8Qq");
    }

    #[test]
    fn test_get_address_by_wif_uses_target_network() {
        let mainnet = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();
        let testnet = get_address_pair(Network::XnaTest, MNEMONIC, 0, 1, "").unwrap();

        // a testnet WIF recomputed under mainnet version bytes
        let result = get_address_by_wif(Network::Xna, &testnet.external.wif).unwrap();
        assert!(result.address.starts_with('N'));
        assert_eq!(result.private_key, testnet.external.private_key);
        assert_ne!(result.address, mainnet.external.address);
    }

    #[test]
    fn test_get_pubkey_by_wif() {
        let pair = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();
        let public_key = get_pubkey_by_wif(Network::Xna, &pair.external.wif).unwrap();

        assert_eq!(public_key, pair.external.public_key);
        assert_eq!(
            get_pubkey_by_wif(Network::XnaTest, &pair.external.wif).unwrap(),
            public_key
        );
    }

    #[test]
    fn test_mainnet_vectors_use_coin_type_zero() {
        let hd_key = get_hd_key(Network::Xna, MNEMONIC, "").unwrap();

        let external = get_address_by_path(Network::Xna, &hd_key, "m/44'/0'/0'/0/1").unwrap();
        assert_eq!(external.address, "NLdcSXGQvCVf2RTKhx7GZom34f1JADhBTp");
        assert_eq!(
            external.wif,
            "KwWavecys1Qskgzwsyv6CNeTospWkvMeLzx3dLqeV4xAJEMXF8Qq"
        );

        let internal = get_address_by_path(Network::Xna, &hd_key, "m/44'/0'/0'/1/1").unwrap();
        assert_eq!(internal.address, "NQM5zP6jkwDgCZ2UQiUicW4e3YcWc4NY4S");

        let pair = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();
        assert_eq!(pair.external, external);
        assert_eq!(pair.internal, internal);
    }

    #[test]
    fn test_public_key_to_address_accepts_hex_and_bytes() {
        let pair = get_address_pair(Network::Xna, MNEMONIC, 0, 1, "").unwrap();
        let bytes = hex::decode(&pair.external.public_key).unwrap();

        assert_eq!(
            public_key_to_address(Network::Xna, &pair.external.public_key).unwrap(),
            pair.external.address
        );
        assert_eq!(
            public_key_to_address(Network::Xna, &bytes).unwrap(),
            pair.external.address
        );
        assert_eq!(
            public_key_to_address(Network::Xna, "abcd").unwrap_err(),
            Error::InvalidPublicKeyLength(2)
        );
        assert!(matches!(
            public_key_to_address(Network::Xna, "zz"),
            Err(Error::InvalidHex(_))
        ));
    }

    #[test]
    fn test_generate_address_object() {
        let generated = generate_address_object(Network::XnaTest, "").unwrap();

        assert_eq!(generated.network, Network::XnaTest);
        assert_eq!(generated.mnemonic.split(' ').count(), 12);
        assert_eq!(generated.address.path, "m/44'/1'/0'/0/0");
        assert!(generated.address.address.starts_with('t'));
    }

    #[test]
    #[allow(deprecated)]
    fn test_generate_address_defaults_to_empty_passphrase() {
        let generated = generate_address(Network::Xna).unwrap();
        let pair = get_address_pair(Network::Xna, &generated.mnemonic, 0, 0, "").unwrap();

        assert_eq!(generated.address, pair.external);
    }
}
