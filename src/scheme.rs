// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Signature scheme registry.
//!
//! A scheme is a fixed hash/curve-family combination. The table is closed:
//! eleven schemes with codes 0 through 10, each compatible with exactly one
//! [`KeyType`]. Lookups by code, label or JWS label scan the table and fail
//! with [`KeyError::SchemeNotFound`] on a miss.

use crate::algorithm::KeyType;
use crate::error::KeyError;
use ripemd::Ripemd160;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use sm3::Sm3;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Supported signature schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    EcdsaSha224,
    EcdsaSha256,
    EcdsaSha384,
    EcdsaSha512,
    EcdsaSha3_224,
    EcdsaSha3_256,
    EcdsaSha3_384,
    EcdsaSha3_512,
    EcdsaRipemd160,
    Sm2Sm3,
    EddsaSha512,
}

/// All schemes in registry order. Codes are positions in this table.
pub const ALL_SCHEMES: [SignatureScheme; 11] = [
    SignatureScheme::EcdsaSha224,
    SignatureScheme::EcdsaSha256,
    SignatureScheme::EcdsaSha384,
    SignatureScheme::EcdsaSha512,
    SignatureScheme::EcdsaSha3_224,
    SignatureScheme::EcdsaSha3_256,
    SignatureScheme::EcdsaSha3_384,
    SignatureScheme::EcdsaSha3_512,
    SignatureScheme::EcdsaRipemd160,
    SignatureScheme::Sm2Sm3,
    SignatureScheme::EddsaSha512,
];

impl SignatureScheme {
    /// Get the compact numeric code for this scheme.
    pub fn code(&self) -> u8 {
        match self {
            SignatureScheme::EcdsaSha224 => 0,
            SignatureScheme::EcdsaSha256 => 1,
            SignatureScheme::EcdsaSha384 => 2,
            SignatureScheme::EcdsaSha512 => 3,
            SignatureScheme::EcdsaSha3_224 => 4,
            SignatureScheme::EcdsaSha3_256 => 5,
            SignatureScheme::EcdsaSha3_384 => 6,
            SignatureScheme::EcdsaSha3_512 => 7,
            SignatureScheme::EcdsaRipemd160 => 8,
            SignatureScheme::Sm2Sm3 => 9,
            SignatureScheme::EddsaSha512 => 10,
        }
    }

    /// Get the textual label for this scheme.
    pub fn label(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha224 => "ECDSAwithSHA224",
            SignatureScheme::EcdsaSha256 => "ECDSAwithSHA256",
            SignatureScheme::EcdsaSha384 => "ECDSAwithSHA384",
            SignatureScheme::EcdsaSha512 => "ECDSAwithSHA512",
            SignatureScheme::EcdsaSha3_224 => "ECDSAwithSHA3-224",
            SignatureScheme::EcdsaSha3_256 => "ECDSAwithSHA3-256",
            SignatureScheme::EcdsaSha3_384 => "ECDSAwithSHA3-384",
            SignatureScheme::EcdsaSha3_512 => "ECDSAwithSHA3-512",
            SignatureScheme::EcdsaRipemd160 => "ECDSAwithRIPEMD160",
            SignatureScheme::Sm2Sm3 => "SM2withSM3",
            SignatureScheme::EddsaSha512 => "EDDSAwithSHA512",
        }
    }

    /// Get the JWS-style short label for this scheme.
    pub fn jws_label(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha224 => "ES224",
            SignatureScheme::EcdsaSha256 => "ES256",
            SignatureScheme::EcdsaSha384 => "ES384",
            SignatureScheme::EcdsaSha512 => "ES512",
            SignatureScheme::EcdsaSha3_224 => "ES3-224",
            SignatureScheme::EcdsaSha3_256 => "ES3-256",
            SignatureScheme::EcdsaSha3_384 => "ES3-384",
            SignatureScheme::EcdsaSha3_512 => "ES3-512",
            SignatureScheme::EcdsaRipemd160 => "ER160",
            SignatureScheme::Sm2Sm3 => "SM",
            SignatureScheme::EddsaSha512 => "EDS512",
        }
    }

    /// Look up a scheme by numeric code.
    pub fn from_code(code: u8) -> Result<Self, KeyError> {
        ALL_SCHEMES
            .iter()
            .find(|s| s.code() == code)
            .copied()
            .ok_or_else(|| KeyError::SchemeNotFound(format!("code {}", code)))
    }

    /// Look up a scheme by label. Matching is exact.
    pub fn from_label(label: &str) -> Result<Self, KeyError> {
        ALL_SCHEMES
            .iter()
            .find(|s| s.label() == label)
            .copied()
            .ok_or_else(|| KeyError::SchemeNotFound(label.to_string()))
    }

    /// Look up a scheme by JWS label. Matching is exact.
    pub fn from_jws_label(label: &str) -> Result<Self, KeyError> {
        ALL_SCHEMES
            .iter()
            .find(|s| s.jws_label() == label)
            .copied()
            .ok_or_else(|| KeyError::SchemeNotFound(label.to_string()))
    }

    /// The single key algorithm family this scheme is compatible with.
    pub fn key_type(&self) -> KeyType {
        match self {
            SignatureScheme::EcdsaSha224
            | SignatureScheme::EcdsaSha256
            | SignatureScheme::EcdsaSha384
            | SignatureScheme::EcdsaSha512
            | SignatureScheme::EcdsaSha3_224
            | SignatureScheme::EcdsaSha3_256
            | SignatureScheme::EcdsaSha3_384
            | SignatureScheme::EcdsaSha3_512
            | SignatureScheme::EcdsaRipemd160 => KeyType::Ecdsa,
            SignatureScheme::Sm2Sm3 => KeyType::Sm2,
            SignatureScheme::EddsaSha512 => KeyType::Eddsa,
        }
    }

    /// Hash a message with the scheme's digest.
    pub fn hash(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            SignatureScheme::EcdsaSha224 => Sha224::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha256 => Sha256::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha384 => Sha384::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha512 => Sha512::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha3_224 => Sha3_224::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha3_256 => Sha3_256::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha3_384 => Sha3_384::digest(msg).to_vec(),
            SignatureScheme::EcdsaSha3_512 => Sha3_512::digest(msg).to_vec(),
            SignatureScheme::EcdsaRipemd160 => Ripemd160::digest(msg).to_vec(),
            SignatureScheme::Sm2Sm3 => Sm3::digest(msg).to_vec(),
            SignatureScheme::EddsaSha512 => Sha512::digest(msg).to_vec(),
        }
    }
}

impl Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SignatureScheme {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignatureScheme::from_label(s)
    }
}

impl Serialize for SignatureScheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SignatureScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SignatureScheme::from_label(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_one_is_ecdsa_sha256() {
        let scheme = SignatureScheme::from_code(1).unwrap();
        assert_eq!(scheme.label(), "ECDSAwithSHA256");
        assert_eq!(scheme.jws_label(), "ES256");
        assert_eq!(scheme.key_type(), KeyType::Ecdsa);
    }

    #[test]
    fn test_sm2_label_lookup() {
        let scheme = SignatureScheme::from_label("SM2withSM3").unwrap();
        assert_eq!(scheme.code(), 9);
        assert_eq!(scheme.key_type(), KeyType::Sm2);
    }

    #[test]
    fn test_all_codes_round_trip() {
        for (i, scheme) in ALL_SCHEMES.iter().enumerate() {
            assert_eq!(scheme.code() as usize, i);
            assert_eq!(SignatureScheme::from_code(scheme.code()).unwrap(), *scheme);
            assert_eq!(
                SignatureScheme::from_label(scheme.label()).unwrap(),
                *scheme
            );
            assert_eq!(
                SignatureScheme::from_jws_label(scheme.jws_label()).unwrap(),
                *scheme
            );
        }
    }

    #[test]
    fn test_lookup_misses() {
        assert!(matches!(
            SignatureScheme::from_code(11),
            Err(KeyError::SchemeNotFound(_))
        ));
        assert!(matches!(
            SignatureScheme::from_label("ECDSAwithMD5"),
            Err(KeyError::SchemeNotFound(_))
        ));
        assert!(matches!(
            SignatureScheme::from_jws_label("RS256"),
            Err(KeyError::SchemeNotFound(_))
        ));
    }

    #[test]
    fn test_hash_widths() {
        let msg = b"meridian";
        assert_eq!(SignatureScheme::EcdsaSha224.hash(msg).len(), 28);
        assert_eq!(SignatureScheme::EcdsaSha256.hash(msg).len(), 32);
        assert_eq!(SignatureScheme::EcdsaSha3_384.hash(msg).len(), 48);
        assert_eq!(SignatureScheme::EcdsaRipemd160.hash(msg).len(), 20);
        assert_eq!(SignatureScheme::Sm2Sm3.hash(msg).len(), 32);
        assert_eq!(SignatureScheme::EddsaSha512.hash(msg).len(), 64);
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&SignatureScheme::EddsaSha512).unwrap();
        assert_eq!(json, r#""EDDSAwithSHA512""#);
        let back: SignatureScheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SignatureScheme::EddsaSha512);
    }
}
