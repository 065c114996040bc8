// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Public key representation and signature verification.

use crate::algorithm::{CurveLabel, KeyParameters, KeyType};
use crate::error::KeyError;
use crate::key::{KeyMaterial, KeyRecord};
use crate::signature::Signature;
use signature::hazmat::PrehashVerifier;
use signature::Verifier;

/// A public key: compressed curve point bytes plus the algorithm identity of
/// the private key it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
    algorithm: KeyType,
    parameters: KeyParameters,
}

impl PublicKey {
    /// Construct from raw public key bytes.
    ///
    /// If `parameters` is omitted the algorithm's default curve is assumed.
    pub fn new(bytes: Vec<u8>, algorithm: KeyType, parameters: Option<KeyParameters>) -> Self {
        let parameters = parameters.unwrap_or_else(|| algorithm.default_parameters());
        Self {
            bytes,
            algorithm,
            parameters,
        }
    }

    /// Construct from a hex-encoded public key.
    pub fn from_hex(
        key: &str,
        algorithm: KeyType,
        parameters: Option<KeyParameters>,
    ) -> Result<Self, KeyError> {
        let bytes = hex::decode(key).map_err(|e| KeyError::Decoding(e.to_string()))?;
        Ok(Self::new(bytes, algorithm, parameters))
    }

    /// Reconstruct from a plain key record, resolving labels through the
    /// algorithm registries.
    pub fn from_record(record: &KeyRecord) -> Result<Self, KeyError> {
        let algorithm = KeyType::from_label(&record.algorithm)?;
        Self::from_hex(&record.key, algorithm, Some(record.parameters))
    }

    /// Serialize to the plain key record form.
    pub fn to_record(&self) -> KeyRecord {
        KeyRecord {
            key: self.to_hex(),
            algorithm: self.algorithm.label().to_string(),
            parameters: self.parameters,
        }
    }

    /// Verify `sig` over the hex-encoded `msg`.
    ///
    /// The signature's scheme must be legal for this key's algorithm family;
    /// a bad signature surfaces as [`KeyError::SignatureVerification`].
    pub fn verify(&self, msg: &str, sig: &Signature) -> Result<(), KeyError> {
        let scheme = sig.scheme();
        self.check_scheme(scheme)?;
        let msg = hex::decode(msg).map_err(|e| KeyError::Decoding(e.to_string()))?;
        let sig_bytes = sig.as_bytes();
        match scheme.key_type() {
            KeyType::Ecdsa => self.verify_ecdsa(&scheme.hash(&msg), sig_bytes),
            KeyType::Eddsa => self.verify_eddsa(&scheme.hash(&msg), sig_bytes),
            KeyType::Sm2 => self.verify_sm2(&msg, sig_bytes),
        }
    }

    fn verify_ecdsa(&self, prehash: &[u8], sig: &[u8]) -> Result<(), KeyError> {
        match self.parameters.curve {
            CurveLabel::P224 => {
                let vk = p224::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig = p224::ecdsa::Signature::from_slice(sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
                vk.verify_prehash(prehash, &sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))
            }
            CurveLabel::P256 => {
                let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig = p256::ecdsa::Signature::from_slice(sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
                vk.verify_prehash(prehash, &sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))
            }
            CurveLabel::P384 => {
                let vk = p384::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig = p384::ecdsa::Signature::from_slice(sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
                vk.verify_prehash(prehash, &sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))
            }
            CurveLabel::P521 => {
                let vk = p521::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig = p521::ecdsa::Signature::from_slice(sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
                vk.verify_prehash(prehash, &sig)
                    .map_err(|e| KeyError::SignatureVerification(e.to_string()))
            }
            curve => Err(KeyError::UnsupportedAlgorithm(format!(
                "no ECDSA verifier for curve {}",
                curve
            ))),
        }
    }

    fn verify_eddsa(&self, hash: &[u8], sig: &[u8]) -> Result<(), KeyError> {
        if self.parameters.curve != CurveLabel::Ed25519 {
            return Err(KeyError::UnsupportedAlgorithm(format!(
                "no EdDSA verifier for curve {}",
                self.parameters.curve
            )));
        }
        if self.bytes.len() != 32 {
            return Err(KeyError::InvalidKeyFormat(
                "Ed25519 public key must be 32 bytes".to_string(),
            ));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&self.bytes);
        let vk = ed25519_dalek::VerifyingKey::from_bytes(&arr)
            .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
        let sig = ed25519_dalek::Signature::from_slice(sig)
            .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
        vk.verify(hash, &sig)
            .map_err(|e| KeyError::SignatureVerification(e.to_string()))
    }

    fn verify_sm2(&self, msg: &[u8], sig: &[u8]) -> Result<(), KeyError> {
        if self.parameters.curve != CurveLabel::Sm2P256V1 {
            return Err(KeyError::UnsupportedAlgorithm(format!(
                "no SM2 verifier for curve {}",
                self.parameters.curve
            )));
        }
        // Wire form is `identity || NUL || r || s`.
        let nul = sig
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| {
                KeyError::SignatureVerification("missing SM2 identity terminator".to_string())
            })?;
        let identity = std::str::from_utf8(&sig[..nul])
            .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
        let vk = sm2::dsa::VerifyingKey::from_sec1_bytes(identity, &self.bytes)
            .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
        let sig = sm2::dsa::Signature::from_slice(&sig[nul + 1..])
            .map_err(|e| KeyError::SignatureVerification(e.to_string()))?;
        vk.verify(msg, &sig)
            .map_err(|e| KeyError::SignatureVerification(e.to_string()))
    }
}

impl KeyMaterial for PublicKey {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn algorithm(&self) -> KeyType {
        self.algorithm
    }

    fn parameters(&self) -> KeyParameters {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SignatureScheme;

    #[test]
    fn test_record_round_trip() {
        let pk = PublicKey::new(vec![0x02; 33], KeyType::Ecdsa, None);
        let record = pk.to_record();
        assert_eq!(record.algorithm, "ECDSA");
        assert_eq!(record.parameters.curve, CurveLabel::P256);
        let back = PublicKey::from_record(&record).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn test_verify_checks_scheme_family() {
        let pk = PublicKey::new(vec![0x02; 33], KeyType::Ecdsa, None);
        let sig = Signature::new(SignatureScheme::EddsaSha512, vec![0u8; 64], None);
        assert!(matches!(
            pk.verify("0011", &sig),
            Err(KeyError::SchemeMismatch { .. })
        ));
    }

    #[test]
    fn test_sm2_signature_needs_identity_terminator() {
        let pk = PublicKey::new(vec![0x02; 33], KeyType::Sm2, None);
        let sig = Signature::new(SignatureScheme::Sm2Sm3, vec![0x31; 80], None);
        assert!(matches!(
            pk.verify("0011", &sig),
            Err(KeyError::SignatureVerification(_))
        ));
    }
}
