//! Mnemonic phrase generation, validation and seed derivation

use std::borrow::Cow;

use bip39::{Language, Mnemonic};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// PBKDF2 rounds defined by BIP39
const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a BIP39 seed in bytes
pub const SEED_LEN: usize = 64;

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    Words12,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words24 => 32,
        }
    }
}

/// A 512-bit BIP39 seed, wiped from memory on drop
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    /// Get the raw seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Derive the BIP39 seed of a phrase and passphrase
///
/// The phrase is not checked against any word list: every input string
/// deterministically yields a seed. Both inputs are NFKD-normalized first, and
/// an empty passphrase is the same as no passphrase.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> Seed {
    let mut password = Cow::Borrowed(mnemonic);
    Mnemonic::normalize_utf8_cow(&mut password);

    let mut salt = Cow::Owned(format!("mnemonic{}", passphrase));
    Mnemonic::normalize_utf8_cow(&mut salt);

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        password.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed[..],
    );

    Seed(seed)
}

/// Generate a new random English mnemonic phrase with the specified strength
pub fn generate_mnemonic_with_strength(strength: MnemonicStrength) -> Result<String> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    OsRng.fill_bytes(entropy.as_mut_slice());

    entropy_to_mnemonic(&entropy)
}

/// Generate a new random 12-word English mnemonic phrase
pub fn generate_mnemonic() -> Result<String> {
    generate_mnemonic_with_strength(MnemonicStrength::Words12)
}

/// Encode raw entropy (16 to 32 bytes, multiple of 4) as an English phrase
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String> {
    let mnemonic =
        Mnemonic::from_entropy(entropy).map_err(|e| Error::InvalidEntropy(e.to_string()))?;

    Ok(mnemonic.to_string())
}

/// Parse a phrase in a specific language, checking words and checksum
pub fn validate_mnemonic_in(language: Language, phrase: &str) -> Result<()> {
    Mnemonic::parse_in(language, phrase)
        .map(|_| ())
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))
}

/// Check a phrase against every compiled-in BIP39 word list
///
/// Returns true as soon as one language accepts the phrase. Cost grows with
/// the number of word lists, and the check is not constant time.
pub fn is_mnemonic_valid(phrase: &str) -> bool {
    #[allow(deprecated)]
    let languages = Language::all();

    languages
        .iter()
        .any(|language| validate_mnemonic_in(*language, phrase).is_ok())
}
