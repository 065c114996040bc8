// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Key algorithm families and their curve parameter sets.

use crate::error::KeyError;
use crate::scheme::SignatureScheme;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Numeric codes for the algorithm families (used in serialized key data).
pub const ECDSA_CODE: u8 = 0x12;
pub const SM2_CODE: u8 = 0x13;
pub const EDDSA_CODE: u8 = 0x14;

/// The algorithm used when a caller does not pick one.
pub const DEFAULT_ALGORITHM: KeyType = KeyType::Ecdsa;

/// Supported asymmetric key algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Ecdsa,
    Sm2,
    Eddsa,
}

impl KeyType {
    /// Get the numeric code for this family.
    pub fn code(&self) -> u8 {
        match self {
            KeyType::Ecdsa => ECDSA_CODE,
            KeyType::Sm2 => SM2_CODE,
            KeyType::Eddsa => EDDSA_CODE,
        }
    }

    /// Look up a family by numeric code.
    pub fn from_code(code: u8) -> Result<Self, KeyError> {
        match code {
            ECDSA_CODE => Ok(KeyType::Ecdsa),
            SM2_CODE => Ok(KeyType::Sm2),
            EDDSA_CODE => Ok(KeyType::Eddsa),
            _ => Err(KeyError::UnknownAlgorithm(format!("code {:#04x}", code))),
        }
    }

    /// Get the textual label for this family.
    pub fn label(&self) -> &'static str {
        match self {
            KeyType::Ecdsa => "ECDSA",
            KeyType::Sm2 => "SM2",
            KeyType::Eddsa => "EDDSA",
        }
    }

    /// Look up a family by label. Matching is exact.
    pub fn from_label(label: &str) -> Result<Self, KeyError> {
        match label {
            "ECDSA" => Ok(KeyType::Ecdsa),
            "SM2" => Ok(KeyType::Sm2),
            "EDDSA" => Ok(KeyType::Eddsa),
            _ => Err(KeyError::UnknownAlgorithm(label.to_string())),
        }
    }

    /// The signature scheme used when a caller does not pick one.
    pub fn default_scheme(&self) -> SignatureScheme {
        match self {
            KeyType::Ecdsa => SignatureScheme::EcdsaSha256,
            KeyType::Sm2 => SignatureScheme::Sm2Sm3,
            KeyType::Eddsa => SignatureScheme::EddsaSha512,
        }
    }

    /// The curve used when a caller does not supply parameters.
    pub fn default_parameters(&self) -> KeyParameters {
        let curve = match self {
            KeyType::Ecdsa => CurveLabel::P256,
            KeyType::Sm2 => CurveLabel::Sm2P256V1,
            KeyType::Eddsa => CurveLabel::Ed25519,
        };
        KeyParameters { curve }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::from_label(s)
    }
}

/// Named curves paired with the algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveLabel {
    P224,
    P256,
    P384,
    P521,
    Sm2P256V1,
    Ed25519,
}

impl CurveLabel {
    /// Get the numeric code for this curve.
    pub fn code(&self) -> u8 {
        match self {
            CurveLabel::P224 => 1,
            CurveLabel::P256 => 2,
            CurveLabel::P384 => 3,
            CurveLabel::P521 => 4,
            CurveLabel::Sm2P256V1 => 20,
            CurveLabel::Ed25519 => 25,
        }
    }

    /// Look up a curve by numeric code.
    pub fn from_code(code: u8) -> Result<Self, KeyError> {
        match code {
            1 => Ok(CurveLabel::P224),
            2 => Ok(CurveLabel::P256),
            3 => Ok(CurveLabel::P384),
            4 => Ok(CurveLabel::P521),
            20 => Ok(CurveLabel::Sm2P256V1),
            25 => Ok(CurveLabel::Ed25519),
            _ => Err(KeyError::UnknownAlgorithm(format!("curve code {}", code))),
        }
    }

    /// Get the textual label for this curve.
    pub fn label(&self) -> &'static str {
        match self {
            CurveLabel::P224 => "P-224",
            CurveLabel::P256 => "P-256",
            CurveLabel::P384 => "P-384",
            CurveLabel::P521 => "P-521",
            CurveLabel::Sm2P256V1 => "sm2p256v1",
            CurveLabel::Ed25519 => "ed25519",
        }
    }

    /// Look up a curve by label. Matching is exact.
    pub fn from_label(label: &str) -> Result<Self, KeyError> {
        match label {
            "P-224" => Ok(CurveLabel::P224),
            "P-256" => Ok(CurveLabel::P256),
            "P-384" => Ok(CurveLabel::P384),
            "P-521" => Ok(CurveLabel::P521),
            "sm2p256v1" => Ok(CurveLabel::Sm2P256V1),
            "ed25519" => Ok(CurveLabel::Ed25519),
            _ => Err(KeyError::UnknownAlgorithm(format!("curve {}", label))),
        }
    }

    /// Scalar field width in bytes for this curve.
    pub fn scalar_size(&self) -> usize {
        match self {
            CurveLabel::P224 => 28,
            CurveLabel::P256 => 32,
            CurveLabel::P384 => 48,
            CurveLabel::P521 => 66,
            CurveLabel::Sm2P256V1 => 32,
            CurveLabel::Ed25519 => 32,
        }
    }
}

impl Display for CurveLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CurveLabel {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveLabel::from_label(s)
    }
}

impl Serialize for CurveLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CurveLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurveLabel::from_label(&s).map_err(D::Error::custom)
    }
}

/// Curve parameter set attached to every key.
///
/// Serializes as the plain `{"curve": label}` record used in key files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyParameters {
    pub curve: CurveLabel,
}

impl KeyParameters {
    pub fn new(curve: CurveLabel) -> Self {
        Self { curve }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_lookups() {
        assert_eq!(KeyType::from_label("ECDSA").unwrap(), KeyType::Ecdsa);
        assert_eq!(KeyType::from_code(0x13).unwrap(), KeyType::Sm2);
        assert_eq!(KeyType::Eddsa.code(), 0x14);
        assert!(KeyType::from_label("RSA").is_err());
        assert!(KeyType::from_code(0xff).is_err());
    }

    #[test]
    fn test_curve_lookups() {
        for curve in [
            CurveLabel::P224,
            CurveLabel::P256,
            CurveLabel::P384,
            CurveLabel::P521,
            CurveLabel::Sm2P256V1,
            CurveLabel::Ed25519,
        ] {
            assert_eq!(CurveLabel::from_code(curve.code()).unwrap(), curve);
            assert_eq!(CurveLabel::from_label(curve.label()).unwrap(), curve);
        }
        assert!(CurveLabel::from_label("P-256 ").is_err());
        assert!(CurveLabel::from_code(0).is_err());
    }

    #[test]
    fn test_parameters_serde() {
        let params = KeyParameters::new(CurveLabel::P256);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"curve":"P-256"}"#);
        let back: KeyParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            KeyType::Ecdsa.default_scheme(),
            SignatureScheme::EcdsaSha256
        );
        assert_eq!(
            KeyType::Sm2.default_parameters().curve,
            CurveLabel::Sm2P256V1
        );
        assert_eq!(DEFAULT_ALGORITHM, KeyType::Ecdsa);
    }
}
