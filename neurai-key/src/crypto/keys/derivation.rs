//! BIP32 derivation paths

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Offset of hardened child indices
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP44 purpose level
pub const BIP44_PURPOSE: u32 = 44;

/// One level of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    /// Create a child index; `index` must be below 2^31
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!(
                "child index {} is out of range",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    /// Non-hardened child index
    pub fn normal(index: u32) -> Result<Self> {
        Self::new(index, false)
    }

    /// Hardened child index
    pub fn hardened(index: u32) -> Result<Self> {
        Self::new(index, true)
    }

    /// Index without the hardened bit
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether this is a hardened index
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Index as serialized in BIP32, with the hardened bit applied
    pub fn raw(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }

    /// Inverse of [`ChildIndex::raw`]
    pub fn from_raw(raw: u32) -> Self {
        Self {
            index: raw & !HARDENED_OFFSET,
            hardened: raw & HARDENED_OFFSET != 0,
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(component: &str) -> Result<Self> {
        let (digits, hardened) = match component.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(digits) => (digits, true),
            None => (component, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPath(format!(
                "Invalid derivation path component: {}",
                component
            )));
        }

        let index = digits.parse::<u32>().map_err(|_| {
            Error::InvalidPath(format!("Invalid derivation path component: {}", component))
        })?;

        Self::new(index, hardened)
    }
}

/// BIP44 chain level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Receiving addresses
    External = 0,
    /// Change addresses
    Internal = 1,
}

/// A path from the master key to a descendant, e.g. `m/44'/0'/0'/0/1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// The master key itself (`m`)
    pub fn master() -> Self {
        Self(Vec::new())
    }

    /// `m/44'/coin_type'/account'/chain/position`
    pub fn bip44(coin_type: u32, account: u32, chain: Chain, position: u32) -> Result<Self> {
        Ok(Self(vec![
            ChildIndex::hardened(BIP44_PURPOSE)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::normal(chain as u32)?,
            ChildIndex::normal(position)?,
        ]))
    }

    /// Path extended by one more level
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut components = self.0.clone();
        components.push(index);
        Self(components)
    }

    /// Path levels from the master key down
    pub fn components(&self) -> &[ChildIndex] {
        &self.0
    }

    /// Number of levels below the master key
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the master path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(components: Vec<ChildIndex>) -> Self {
        Self(components)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parse a BIP32 path; `m` and `M` both denote the master key
    fn from_str(path: &str) -> Result<Self> {
        let rest = path
            .strip_prefix(&['m', 'M'][..])
            .ok_or_else(|| Error::InvalidPath(format!("Invalid derivation path: {}", path)))?;

        match rest {
            "" | "/" => Ok(Self::master()),
            _ => {
                let components = rest
                    .strip_prefix('/')
                    .ok_or_else(|| Error::InvalidPath(format!("Invalid derivation path: {}", path)))?;

                components
                    .split('/')
                    .map(str::parse::<ChildIndex>)
                    .collect::<Result<Vec<_>>>()
                    .map(Self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bip44_path() {
        let path: DerivationPath = "m/44'/0'/0'/0/1".parse().unwrap();
        let expected = DerivationPath::bip44(0, 0, Chain::External, 1).unwrap();

        assert_eq!(path, expected);
        assert_eq!(path.len(), 5);
        assert_eq!(path.components()[0].raw(), 0x8000_002c);
        assert_eq!(path.components()[4].raw(), 1);
        assert_eq!(path.to_string(), "m/44'/0'/0'/0/1");
    }

    #[test]
    fn test_parse_alternative_hardened_markers() {
        let a: DerivationPath = "m/44h/1H/0'".parse().unwrap();
        assert_eq!(a.to_string(), "m/44'/1'/0'");
    }

    #[test]
    fn test_parse_master() {
        assert!("m".parse::<DerivationPath>().unwrap().is_empty());
        assert!("M".parse::<DerivationPath>().unwrap().is_empty());
        assert!("m/".parse::<DerivationPath>().unwrap().is_empty());
        assert_eq!(DerivationPath::master().to_string(), "m");
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        for path in ["", "44'/0'", "m0", "m//0", "m/0/", "m/x", "m/0''", "m/-1", "m/+1", "m/2147483648"] {
            assert!(
                matches!(path.parse::<DerivationPath>(), Err(Error::InvalidPath(_))),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_internal_chain_differs_only_in_chain_level() {
        let external = DerivationPath::bip44(1, 3, Chain::External, 7).unwrap();
        let internal = DerivationPath::bip44(1, 3, Chain::Internal, 7).unwrap();

        assert_eq!(external.to_string(), "m/44'/1'/3'/0/7");
        assert_eq!(internal.to_string(), "m/44'/1'/3'/1/7");
    }

    #[test]
    fn test_raw_round_trip() {
        let hardened = ChildIndex::hardened(5).unwrap();
        assert_eq!(ChildIndex::from_raw(hardened.raw()), hardened);
        assert!(ChildIndex::from_raw(0x8000_0000).is_hardened());
        assert!(ChildIndex::normal(HARDENED_OFFSET).is_err());
    }

    #[test]
    fn test_child_appends_level() {
        let path = DerivationPath::master().child(ChildIndex::hardened(0).unwrap());
        assert_eq!(path.to_string(), "m/0'");
    }
}
