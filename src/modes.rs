//! Closed catalogs of hash algorithms and attack strategies understood by the
//! controller, each carrying the numeric code hashcat expects on its command
//! line.
//!
//! Callers may select a catalog entry directly or hand over a raw numeric code;
//! [`Catalog::resolve`] turns either shape into a validated entry:
//!
//! ```
//! use hashcat_controller::modes::{Catalog, HashAlgorithm, ModeValue};
//! assert_eq!(HashAlgorithm::resolve(100_i64).unwrap(), HashAlgorithm::Sha1);
//! assert_eq!(
//!     HashAlgorithm::resolve(ModeValue::Mode(HashAlgorithm::Md5)).unwrap(),
//!     HashAlgorithm::Md5
//! );
//! ```
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{HashcatError, Result};

/// A raw mode argument before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeValue<M> {
    /// Already a catalog entry.
    Mode(M),
    /// A numeric code still to be checked against the catalog.
    Code(i64),
    /// Anything else, e.g. unparsed user input.
    Other(String),
}

impl<M> From<i64> for ModeValue<M> {
    fn from(code: i64) -> Self {
        ModeValue::Code(code)
    }
}

impl<M> From<&str> for ModeValue<M> {
    fn from(value: &str) -> Self {
        ModeValue::Other(value.to_string())
    }
}

impl<M> From<String> for ModeValue<M> {
    fn from(value: String) -> Self {
        ModeValue::Other(value)
    }
}

/// Shared behaviour of the closed mode catalogs.
pub trait Catalog: Copy + Eq + IntoEnumIterator + std::fmt::Display {
    /// Human-readable catalog name used in error messages.
    const KIND: &'static str;

    /// Code passed to hashcat for this entry.
    fn code(self) -> u32;

    fn from_code(code: i64) -> Option<Self> {
        Self::iter().find(|m| i64::from(m.code()) == code)
    }

    /// Validate a symbolic or numeric mode argument.
    fn resolve(value: impl Into<ModeValue<Self>>) -> Result<Self> {
        match value.into() {
            ModeValue::Mode(m) => Ok(m),
            ModeValue::Code(code) => Self::from_code(code).ok_or(HashcatError::InvalidModeCode {
                kind: Self::KIND,
                code,
            }),
            ModeValue::Other(value) => Err(HashcatError::InvalidModeType {
                kind: Self::KIND,
                value,
            }),
        }
    }

    /// Parse command-line style input: a numeric code, a symbolic name, or
    /// (failing both) an untyped value the registry will reject.
    fn parse_value(input: &str) -> ModeValue<Self>
    where
        Self: std::str::FromStr,
    {
        let trimmed = input.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return ModeValue::Code(code);
        }
        match trimmed.parse::<Self>() {
            Ok(m) => ModeValue::Mode(m),
            Err(_) => ModeValue::Other(input.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display)]
pub enum HashAlgorithm {
    #[strum(serialize = "md5")]
    Md5,
    #[strum(serialize = "sha1")]
    Sha1,
    #[strum(serialize = "sha2-224")]
    Sha2_224,
    #[strum(serialize = "sha2-256")]
    Sha2_256,
    #[strum(serialize = "sha2-384")]
    Sha2_384,
    #[strum(serialize = "sha2-512")]
    Sha2_512,
    #[strum(serialize = "sha3-224")]
    Sha3_224,
    #[strum(serialize = "sha3-256")]
    Sha3_256,
    #[strum(serialize = "sha3-384")]
    Sha3_384,
    #[strum(serialize = "sha3-512")]
    Sha3_512,
}

impl From<HashAlgorithm> for ModeValue<HashAlgorithm> {
    fn from(mode: HashAlgorithm) -> Self {
        ModeValue::Mode(mode)
    }
}

impl Catalog for HashAlgorithm {
    const KIND: &'static str = "hash algorithm";

    fn code(self) -> u32 {
        match self {
            Self::Md5 => 0,
            Self::Sha1 => 100,
            Self::Sha2_224 => 1300,
            Self::Sha2_256 => 1400,
            Self::Sha2_384 => 10800,
            Self::Sha2_512 => 1700,
            Self::Sha3_224 => 17300,
            Self::Sha3_256 => 17400,
            Self::Sha3_384 => 17500,
            Self::Sha3_512 => 17600,
        }
    }
}

/// Which payload an attack strategy consumes as its trailing argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Wordlist,
    Mask,
}

impl PayloadKind {
    pub fn field(self) -> &'static str {
        match self {
            Self::Wordlist => "wordlist",
            Self::Mask => "mask",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display, IntoStaticStr,
)]
pub enum AttackStrategy {
    #[strum(serialize = "straight")]
    Straight,
    #[strum(serialize = "combination")]
    Combination,
    #[strum(serialize = "brute-force")]
    BruteForce,
    #[strum(serialize = "hybrid-wordlist-mask")]
    HybridWordlistMask,
    #[strum(serialize = "hybrid-mask-wordlist")]
    HybridMaskWordlist,
    #[strum(serialize = "association")]
    Association,
}

impl AttackStrategy {
    /// Payload the renderer knows how to append for this strategy. `None`
    /// means the strategy is catalogued but not supported yet.
    pub fn payload(self) -> Option<PayloadKind> {
        match self {
            Self::Straight => Some(PayloadKind::Wordlist),
            Self::BruteForce => Some(PayloadKind::Mask),
            Self::Combination
            | Self::HybridWordlistMask
            | Self::HybridMaskWordlist
            | Self::Association => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl From<AttackStrategy> for ModeValue<AttackStrategy> {
    fn from(mode: AttackStrategy) -> Self {
        ModeValue::Mode(mode)
    }
}

impl Catalog for AttackStrategy {
    const KIND: &'static str = "attack strategy";

    fn code(self) -> u32 {
        match self {
            Self::Straight => 0,
            Self::Combination => 1,
            Self::BruteForce => 3,
            Self::HybridWordlistMask => 6,
            Self::HybridMaskWordlist => 7,
            Self::Association => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_resolves_to_its_entry() {
        for h in HashAlgorithm::iter() {
            assert_eq!(HashAlgorithm::resolve(i64::from(h.code())).unwrap(), h);
            assert_eq!(HashAlgorithm::resolve(h).unwrap(), h);
        }
        for a in AttackStrategy::iter() {
            assert_eq!(AttackStrategy::resolve(i64::from(a.code())).unwrap(), a);
            assert_eq!(AttackStrategy::resolve(a).unwrap(), a);
        }
    }

    #[test]
    fn resolves_known_codes() {
        assert_eq!(AttackStrategy::resolve(3_i64).unwrap(), AttackStrategy::BruteForce);
        assert_eq!(HashAlgorithm::resolve(100_i64).unwrap(), HashAlgorithm::Sha1);
        assert_eq!(HashAlgorithm::resolve(1400_i64).unwrap(), HashAlgorithm::Sha2_256);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let err = HashAlgorithm::resolve(123_i64).unwrap_err();
        assert!(matches!(err, HashcatError::InvalidModeCode { code: 123, .. }));
        let err = AttackStrategy::resolve(99_i64).unwrap_err();
        assert!(matches!(err, HashcatError::InvalidModeCode { code: 99, .. }));
        assert!(AttackStrategy::resolve(-1_i64).is_err());
    }

    #[test]
    fn untyped_values_are_rejected() {
        let err = HashAlgorithm::resolve("sha1").unwrap_err();
        assert!(matches!(err, HashcatError::InvalidModeType { .. }));
        let err = AttackStrategy::resolve("straight").unwrap_err();
        assert!(matches!(err, HashcatError::InvalidModeType { .. }));
    }

    #[test]
    fn parse_value_accepts_codes_and_names() {
        assert_eq!(HashAlgorithm::parse_value("1700"), ModeValue::Code(1700));
        assert_eq!(
            HashAlgorithm::parse_value("sha3-512"),
            ModeValue::Mode(HashAlgorithm::Sha3_512)
        );
        assert_eq!(
            AttackStrategy::parse_value("brute-force"),
            ModeValue::Mode(AttackStrategy::BruteForce)
        );
        assert_eq!(
            AttackStrategy::parse_value("dictionary"),
            ModeValue::Other("dictionary".to_string())
        );
    }

    #[test]
    fn only_straight_and_brute_force_have_payloads() {
        let supported: Vec<_> = AttackStrategy::iter().filter(|a| a.payload().is_some()).collect();
        assert_eq!(supported, vec![AttackStrategy::Straight, AttackStrategy::BruteForce]);
        assert_eq!(AttackStrategy::BruteForce.to_string(), "brute-force");
        assert_eq!(HashAlgorithm::Sha2_384.to_string(), "sha2-384");
    }
}
