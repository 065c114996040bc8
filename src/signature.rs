// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Signature value object.

use crate::error::KeyError;
use crate::scheme::SignatureScheme;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};

/// A computed signature: the scheme it was produced under, the signature
/// bytes, and an optional identifier for the signer's public key.
///
/// Immutable once constructed; transport layers consume [`Signature::value`]
/// as an opaque hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    scheme: SignatureScheme,
    bytes: Vec<u8>,
    public_key_id: Option<String>,
}

/// Wire form: `{scheme, value: hex, public_key_id?}`.
#[derive(Serialize, Deserialize)]
struct SignatureRecord {
    scheme: SignatureScheme,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_id: Option<String>,
}

impl Signature {
    /// Wrap raw signature bytes produced under `scheme`.
    pub fn new(scheme: SignatureScheme, bytes: Vec<u8>, public_key_id: Option<String>) -> Self {
        Self {
            scheme,
            bytes,
            public_key_id,
        }
    }

    /// Build from a hex-encoded signature value.
    pub fn from_hex(
        scheme: SignatureScheme,
        value: &str,
        public_key_id: Option<String>,
    ) -> Result<Self, KeyError> {
        let bytes = hex::decode(value).map_err(|e| KeyError::Decoding(e.to_string()))?;
        Ok(Self {
            scheme,
            bytes,
            public_key_id,
        })
    }

    /// The scheme this signature was produced under.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Hex-encoded signature value.
    pub fn value(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Identifier of the signer's public key, if one was attached.
    pub fn public_key_id(&self) -> Option<&str> {
        self.public_key_id.as_deref()
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SignatureRecord {
            scheme: self.scheme,
            value: self.value(),
            public_key_id: self.public_key_id.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let record = SignatureRecord::deserialize(deserializer)?;
        Signature::from_hex(record.scheme, &record.value, record.public_key_id)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let sig = Signature::new(
            SignatureScheme::EcdsaSha256,
            vec![0x00, 0x11, 0xff],
            Some("key-1".to_string()),
        );
        assert_eq!(sig.value(), "0011ff");
        assert_eq!(sig.as_bytes(), [0x00, 0x11, 0xff]);
        assert_eq!(sig.public_key_id(), Some("key-1"));

        let parsed = Signature::from_hex(SignatureScheme::EcdsaSha256, "0011ff", None).unwrap();
        assert_eq!(parsed.as_bytes(), sig.as_bytes());
    }

    #[test]
    fn test_rejects_bad_hex() {
        assert!(matches!(
            Signature::from_hex(SignatureScheme::EcdsaSha256, "zz", None),
            Err(KeyError::Decoding(_))
        ));
    }

    #[test]
    fn test_serde_shape() {
        let sig = Signature::new(SignatureScheme::Sm2Sm3, vec![0xab], None);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, r#"{"scheme":"SM2withSM3","value":"ab"}"#);
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_deserialize_rejects_bad_hex_value() {
        let result = serde_json::from_str::<Signature>(
            r#"{"scheme":"ECDSAwithSHA256","value":"zz-not-hex"}"#,
        );
        assert!(result.is_err());
    }
}
