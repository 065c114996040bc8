// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Common key material contract shared by private and public keys.

use crate::algorithm::{KeyParameters, KeyType};
use crate::error::KeyError;
use crate::scheme::SignatureScheme;
use serde::{Deserialize, Serialize};

/// Persisted/exchanged JSON form of a key.
///
/// `key` is the hex-encoded raw material (plaintext scalar for a decrypted
/// private key, ciphertext blob for an encrypted one, curve point for a
/// public key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    pub algorithm: String,
    pub parameters: KeyParameters,
}

/// Accessors every key exposes, plus the scheme compatibility check that
/// must run before any cryptographic operation.
pub trait KeyMaterial {
    /// Raw key bytes.
    fn as_bytes(&self) -> &[u8];

    /// Algorithm family of this key.
    fn algorithm(&self) -> KeyType;

    /// Curve parameters of this key.
    fn parameters(&self) -> KeyParameters;

    /// Hex encoding of the raw key bytes.
    fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Fail unless `scheme` is legal for this key's algorithm family.
    fn check_scheme(&self, scheme: SignatureScheme) -> Result<(), KeyError> {
        if scheme.key_type() == self.algorithm() {
            Ok(())
        } else {
            Err(KeyError::SchemeMismatch {
                scheme: scheme.label().to_string(),
                algorithm: self.algorithm().label().to_string(),
            })
        }
    }
}
