//! BIP32 extended keys
//!
//! An [`ExtendedKey`] is an immutable node of the key tree. Deriving a child
//! returns a new value and leaves the parent untouched, so one master key can
//! be shared between threads and reused for any number of paths.

use std::fmt;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use zeroize::Zeroizing;

use super::derivation::{ChildIndex, DerivationPath};
use crate::crypto::{base58, hash::hash160};
use crate::error::{Error, Result};
use crate::network::Bip32Versions;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key of the master key computation
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Length of a serialized extended key, before Base58Check
const SERIALIZED_LEN: usize = 78;

/// Length of a compressed SEC1 public key
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Length of an uncompressed SEC1 public key
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// A node of a BIP32 key tree
#[derive(Clone)]
pub struct ExtendedKey {
    versions: Bip32Versions,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: ChildIndex,
    chain_code: [u8; 32],
    private_key: Option<Zeroizing<[u8; 32]>>,
    public_key: [u8; COMPRESSED_PUBLIC_KEY_LEN],
}

impl ExtendedKey {
    /// Derive the master key from a BIP39 seed
    pub fn master_from_seed(seed: &[u8], versions: Bip32Versions) -> Result<Self> {
        let (secret, chain_code) = split_hmac(MASTER_HMAC_KEY, &[seed])?;

        let secret_key = SecretKey::from_slice(&secret[..])
            .map_err(|_| Error::InvalidChildKey(0))?;

        Ok(Self::from_secret_key(
            versions,
            0,
            [0u8; 4],
            ChildIndex::from_raw(0),
            chain_code,
            &secret_key,
        ))
    }

    /// Derive a direct child
    ///
    /// Hardened children mix in the private key and cannot be derived from a
    /// public-only key. Indices whose derived scalar falls outside the curve
    /// order fail with [`Error::InvalidChildKey`]; callers may move on to the
    /// next index.
    pub fn derive_child(&self, child: ChildIndex) -> Result<Self> {
        let raw = child.raw();
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| Error::InvalidPath("maximum depth of 255 exceeded".to_string()))?;

        let index_bytes = raw.to_be_bytes();
        let (tweak, chain_code) = if child.is_hardened() {
            let private_key = self
                .private_key
                .as_ref()
                .ok_or(Error::HardenedFromPublicOnly(child.index()))?;
            split_hmac(&self.chain_code, &[&[0u8][..], &private_key[..], &index_bytes[..]])?
        } else {
            split_hmac(&self.chain_code, &[&self.public_key[..], &index_bytes[..]])?
        };

        let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| Error::InvalidChildKey(raw))?;
        let parent_fingerprint = self.fingerprint();

        match &self.private_key {
            Some(private_key) => {
                let parent = SecretKey::from_slice(&private_key[..])
                    .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
                let secret_key = parent
                    .add_tweak(&tweak)
                    .map_err(|_| Error::InvalidChildKey(raw))?;

                Ok(Self::from_secret_key(
                    self.versions,
                    depth,
                    parent_fingerprint,
                    child,
                    chain_code,
                    &secret_key,
                ))
            }
            None => {
                let secp = Secp256k1::verification_only();
                let parent = PublicKey::from_slice(&self.public_key)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let public_key = parent
                    .add_exp_tweak(&secp, &tweak)
                    .map_err(|_| Error::InvalidChildKey(raw))?;

                Ok(Self {
                    versions: self.versions,
                    depth,
                    parent_fingerprint,
                    child_index: child,
                    chain_code,
                    private_key: None,
                    public_key: public_key.serialize(),
                })
            }
        }
    }

    /// Walk a path from this key, left to right
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut key = self.clone();
        for child in path {
            key = key.derive_child(*child)?;
        }
        Ok(key)
    }

    /// The same node without its private key
    pub fn neutered(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    /// Raw 32-byte private key, if present
    pub fn private_key(&self) -> Option<&[u8; 32]> {
        self.private_key.as_deref()
    }

    /// Compressed SEC1 public key
    pub fn public_key(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Get the chain code
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth below the master key
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent key's fingerprint
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Get the index this key was derived at
    pub fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    /// Get the BIP32 version bytes
    pub fn versions(&self) -> Bip32Versions {
        self.versions
    }

    /// First four bytes of hash160 of the public key
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = hash160(&self.public_key);
        [id[0], id[1], id[2], id[3]]
    }

    /// Base58Check BIP32 serialization of the private key (xprv)
    pub fn to_extended_private_key(&self) -> Option<String> {
        let private_key = self.private_key.as_ref()?;

        let mut key_data = Zeroizing::new([0u8; COMPRESSED_PUBLIC_KEY_LEN]);
        key_data[1..].copy_from_slice(&private_key[..]);
        let data = self.serialize(self.versions.private, &key_data);

        Some(base58::check_encode(&data))
    }

    /// Base58Check BIP32 serialization of the public key (xpub)
    pub fn to_extended_public_key(&self) -> String {
        let data = self.serialize(self.versions.public, &self.public_key);
        base58::check_encode(&data)
    }

    /// Parse an xprv or xpub string produced with `versions`
    pub fn from_extended_key(s: &str, versions: Bip32Versions) -> Result<Self> {
        let data = Zeroizing::new(base58::check_decode(s)?);
        if data.len() != SERIALIZED_LEN {
            return Err(Error::InvalidExtendedKey(format!(
                "expected {} bytes, got {}",
                SERIALIZED_LEN,
                data.len()
            )));
        }

        let version = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let depth = data[4];
        let parent_fingerprint = [data[5], data[6], data[7], data[8]];
        let child_index =
            ChildIndex::from_raw(u32::from_be_bytes([data[9], data[10], data[11], data[12]]));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);
        let key_data = &data[45..];

        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_index.raw() != 0) {
            return Err(Error::InvalidExtendedKey(
                "master key with a parent fingerprint or child index".to_string(),
            ));
        }

        if version == versions.private {
            if key_data[0] != 0 {
                return Err(Error::InvalidExtendedKey(
                    "private key data must start with 0x00".to_string(),
                ));
            }
            let secret_key = SecretKey::from_slice(&key_data[1..])
                .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;

            Ok(Self::from_secret_key(
                versions,
                depth,
                parent_fingerprint,
                child_index,
                chain_code,
                &secret_key,
            ))
        } else if version == versions.public {
            let public_key = PublicKey::from_slice(key_data)
                .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;

            Ok(Self {
                versions,
                depth,
                parent_fingerprint,
                child_index,
                chain_code,
                private_key: None,
                public_key: public_key.serialize(),
            })
        } else {
            Err(Error::InvalidExtendedKey(format!(
                "unexpected version bytes {:#010x}",
                version
            )))
        }
    }

    fn from_secret_key(
        versions: Bip32Versions,
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_index: ChildIndex,
        chain_code: [u8; 32],
        secret_key: &SecretKey,
    ) -> Self {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, secret_key);

        Self {
            versions,
            depth,
            parent_fingerprint,
            child_index,
            chain_code,
            private_key: Some(Zeroizing::new(secret_key.secret_bytes())),
            public_key: public_key.serialize(),
        }
    }

    fn serialize(&self, version: u32, key_data: &[u8; COMPRESSED_PUBLIC_KEY_LEN]) -> Zeroizing<Vec<u8>> {
        let mut data = Zeroizing::new(Vec::with_capacity(SERIALIZED_LEN));
        data.extend_from_slice(&version.to_be_bytes());
        data.push(self.depth);
        data.extend_from_slice(&self.parent_fingerprint);
        data.extend_from_slice(&self.child_index.raw().to_be_bytes());
        data.extend_from_slice(&self.chain_code);
        data.extend_from_slice(key_data);
        data
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index)
            .field("public_key", &hex::encode(self.public_key))
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

/// Compute the SEC1 public key of a raw private key
pub fn public_key_from_private(private_key: &[u8; 32], compressed: bool) -> Result<Vec<u8>> {
    let secp = Secp256k1::signing_only();
    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);

    if compressed {
        Ok(public_key.serialize().to_vec())
    } else {
        Ok(public_key.serialize_uncompressed().to_vec())
    }
}

/// HMAC-SHA512 over the concatenation of `data`, split into (IL, IR)
fn split_hmac(key: &[u8], data: &[&[u8]]) -> Result<(Zeroizing<[u8; 32]>, [u8; 32])> {
    let mut hmac = <HmacSha512 as KeyInit>::new_from_slice(key)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;
    for part in data {
        hmac.update(part);
    }
    let result = hmac.finalize().into_bytes();

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[..32]);
    right.copy_from_slice(&result[32..]);

    Ok((left, right))
}
