// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Private key generation, public key derivation, signing, and
//! password-based encryption.

use crate::algorithm::{CurveLabel, KeyParameters, KeyType, DEFAULT_ALGORITHM};
use crate::error::KeyError;
use crate::kdf::{self, ScryptParams};
use crate::key::{KeyMaterial, KeyRecord};
use crate::public_key::PublicKey;
use crate::scheme::SignatureScheme;
use crate::signature::Signature;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use signature::hazmat::PrehashSigner;
use signature::Signer;
use sm2::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;
use zeroize::Zeroize;

/// Fixed user identity mixed into every SM2 signature.
pub const SM2_DEFAULT_ID: &str = "1234567812345678";

/// Width of the raw private key material drawn by [`PrivateKey::random`].
pub const PRIVATE_KEY_SIZE: usize = 32;

/// A private key: raw scalar bytes (or ciphertext, after [`PrivateKey::encrypt`])
/// plus the algorithm family and curve parameters.
///
/// Instances are immutable; derive/sign/encrypt/decrypt all return new values.
/// Key bytes are zeroized on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    algorithm: KeyType,
    #[zeroize(skip)]
    parameters: KeyParameters,
}

impl PrivateKey {
    /// Construct from externally supplied key bytes.
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

    /// Construct from a hex-encoded private key.
    pub fn from_hex(
        key: &str,
        algorithm: KeyType,
        parameters: Option<KeyParameters>,
    ) -> Result<Self, KeyError> {
        let bytes = hex::decode(key).map_err(|e| KeyError::Decoding(e.to_string()))?;
        Ok(Self::new(bytes, algorithm, parameters))
    }

    /// Generate a random key for the default algorithm.
    pub fn random() -> Self {
        Self::random_for(DEFAULT_ALGORITHM, None)
    }

    /// Generate a random key for the given algorithm family.
    ///
    /// Draws exactly 32 bytes from the OS CSPRNG. Scalars are not rejection
    /// sampled against the curve order.
    pub fn random_for(algorithm: KeyType, parameters: Option<KeyParameters>) -> Self {
        let mut bytes = vec![0u8; PRIVATE_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self::new(bytes, algorithm, parameters)
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

    /// Deserialize from a JSON record `{key, algorithm, parameters}`.
    ///
    /// Unrecognized algorithm or curve labels fail with
    /// [`KeyError::UnknownAlgorithm`] rather than a serde error.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        #[derive(Deserialize)]
        struct RawParameters {
            curve: String,
        }
        #[derive(Deserialize)]
        struct RawRecord {
            key: String,
            algorithm: String,
            parameters: RawParameters,
        }
        let raw: RawRecord =
            serde_json::from_str(json).map_err(|e| KeyError::Serialization(e.to_string()))?;
        let algorithm = KeyType::from_label(&raw.algorithm)?;
        let curve = CurveLabel::from_label(&raw.parameters.curve)?;
        Self::from_hex(&raw.key, algorithm, Some(KeyParameters::new(curve)))
    }

    /// Serialize to a JSON record.
    pub fn to_json(&self) -> Result<String, KeyError> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| KeyError::Serialization(e.to_string()))
    }

    /// Derive the corresponding public key.
    ///
    /// Pure function of the key material; repeated calls yield identical
    /// output. The result carries this key's algorithm and parameters.
    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        let bytes = match self.algorithm {
            KeyType::Ecdsa => self.derive_ecdsa_public()?,
            KeyType::Eddsa => {
                self.require_curve(CurveLabel::Ed25519)?;
                let sk = self.ed25519_signing_key()?;
                sk.verifying_key().to_bytes().to_vec()
            }
            KeyType::Sm2 => {
                self.require_curve(CurveLabel::Sm2P256V1)?;
                let sk = self.sm2_secret_key()?;
                sk.public_key().to_encoded_point(true).as_bytes().to_vec()
            }
        };
        Ok(PublicKey::new(bytes, self.algorithm, Some(self.parameters)))
    }

    /// Sign the hex-encoded `msg`.
    ///
    /// If `scheme` is omitted the algorithm family's default scheme is used.
    /// The scheme must be legal for this key's family.
    pub fn sign(
        &self,
        msg: &str,
        scheme: Option<SignatureScheme>,
        public_key_id: Option<String>,
    ) -> Result<Signature, KeyError> {
        let scheme = scheme.unwrap_or_else(|| self.algorithm.default_scheme());
        self.check_scheme(scheme)?;
        let msg = hex::decode(msg).map_err(|e| KeyError::Decoding(e.to_string()))?;
        let sig_bytes = match scheme.key_type() {
            KeyType::Ecdsa => self.sign_ecdsa(&scheme.hash(&msg))?,
            KeyType::Eddsa => self.sign_eddsa(&scheme.hash(&msg))?,
            // The SM2 primitive hashes internally, mixing in the signer identity.
            KeyType::Sm2 => self.sign_sm2(&msg)?,
        };
        Ok(Signature::new(scheme, sig_bytes, public_key_id))
    }

    /// Encrypt this key under `passphrase`, returning a new instance whose
    /// key field holds `anchor || ciphertext` instead of the plaintext scalar.
    ///
    /// The algorithm identity is carried through unchanged; it describes the
    /// plaintext key, not the ciphertext.
    pub fn encrypt(
        &self,
        passphrase: &str,
        params: Option<ScryptParams>,
    ) -> Result<PrivateKey, KeyError> {
        let params = params.unwrap_or_default();
        let anchor = self.public_key()?;
        let blob = kdf::encrypt_key(&self.bytes, anchor.as_bytes(), passphrase, &params)?;
        Ok(PrivateKey::new(blob, self.algorithm, Some(self.parameters)))
    }

    /// Decrypt a key produced by [`PrivateKey::encrypt`].
    ///
    /// The recovered scalar is only returned if its re-derived public key
    /// equals the anchor embedded at encryption time; a wrong passphrase or
    /// corrupted blob fails with [`KeyError::Decryption`].
    pub fn decrypt(
        &self,
        passphrase: &str,
        params: Option<ScryptParams>,
    ) -> Result<PrivateKey, KeyError> {
        let params = params.unwrap_or_default();
        // Compressed SEC1 point for the Weierstrass curves, raw 32 bytes for
        // Ed25519.
        let anchor_len = match self.algorithm {
            KeyType::Eddsa => 32,
            _ => self.parameters.curve.scalar_size() + 1,
        };
        let (candidate, anchor) = kdf::decrypt_key(&self.bytes, anchor_len, passphrase, &params)?;
        let candidate = PrivateKey::new(candidate, self.algorithm, Some(self.parameters));
        let derived = candidate
            .public_key()
            .map_err(|e| KeyError::Decryption(e.to_string()))?;
        if derived.as_bytes() != anchor.as_slice() {
            return Err(KeyError::Decryption(
                "recovered key does not match its public key anchor".to_string(),
            ));
        }
        Ok(candidate)
    }

    fn require_curve(&self, curve: CurveLabel) -> Result<(), KeyError> {
        if self.parameters.curve == curve {
            Ok(())
        } else {
            Err(KeyError::UnsupportedAlgorithm(format!(
                "{} keys require curve {}, got {}",
                self.algorithm, curve, self.parameters.curve
            )))
        }
    }

    fn ed25519_signing_key(&self) -> Result<ed25519_dalek::SigningKey, KeyError> {
        if self.bytes.len() != 32 {
            return Err(KeyError::InvalidKeyFormat(
                "Ed25519 private key must be 32 bytes".to_string(),
            ));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&self.bytes);
        Ok(ed25519_dalek::SigningKey::from_bytes(&arr))
    }

    fn sm2_secret_key(&self) -> Result<sm2::SecretKey, KeyError> {
        let scalar = scalar_bytes(&self.bytes, CurveLabel::Sm2P256V1.scalar_size())?;
        sm2::SecretKey::from_slice(&scalar).map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))
    }

    fn derive_ecdsa_public(&self) -> Result<Vec<u8>, KeyError> {
        match self.parameters.curve {
            CurveLabel::P224 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P224.scalar_size())?;
                let sk = p224::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                Ok(sk.verifying_key().to_encoded_point(true).as_bytes().to_vec())
            }
            CurveLabel::P256 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P256.scalar_size())?;
                let sk = p256::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                Ok(sk.verifying_key().to_encoded_point(true).as_bytes().to_vec())
            }
            CurveLabel::P384 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P384.scalar_size())?;
                let sk = p384::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                Ok(sk.verifying_key().to_encoded_point(true).as_bytes().to_vec())
            }
            CurveLabel::P521 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P521.scalar_size())?;
                let sk = p521::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let vk = p521::ecdsa::VerifyingKey::from(&sk);
                Ok(vk.to_encoded_point(true).as_bytes().to_vec())
            }
            curve => Err(KeyError::UnsupportedAlgorithm(format!(
                "no ECDSA derivation for curve {}",
                curve
            ))),
        }
    }

    fn sign_ecdsa(&self, prehash: &[u8]) -> Result<Vec<u8>, KeyError> {
        match self.parameters.curve {
            CurveLabel::P224 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P224.scalar_size())?;
                let sk = p224::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig: p224::ecdsa::Signature = sk
                    .sign_prehash(prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            CurveLabel::P256 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P256.scalar_size())?;
                let sk = p256::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig: p256::ecdsa::Signature = sk
                    .sign_prehash(prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            CurveLabel::P384 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P384.scalar_size())?;
                let sk = p384::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig: p384::ecdsa::Signature = sk
                    .sign_prehash(prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            CurveLabel::P521 => {
                let scalar = scalar_bytes(&self.bytes, CurveLabel::P521.scalar_size())?;
                let sk = p521::ecdsa::SigningKey::from_slice(&scalar)
                    .map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
                let sig: p521::ecdsa::Signature = sk
                    .sign_prehash(prehash)
                    .map_err(|e| KeyError::Signing(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            curve => Err(KeyError::UnsupportedAlgorithm(format!(
                "no ECDSA signer for curve {}",
                curve
            ))),
        }
    }

    fn sign_eddsa(&self, hash: &[u8]) -> Result<Vec<u8>, KeyError> {
        self.require_curve(CurveLabel::Ed25519)?;
        let sk = self.ed25519_signing_key()?;
        let sig = sk
            .try_sign(hash)
            .map_err(|e| KeyError::Signing(e.to_string()))?;
        Ok(sig.to_bytes().to_vec())
    }

    fn sign_sm2(&self, msg: &[u8]) -> Result<Vec<u8>, KeyError> {
        self.require_curve(CurveLabel::Sm2P256V1)?;
        let secret = self.sm2_secret_key()?;
        let sk = sm2::dsa::SigningKey::new(SM2_DEFAULT_ID, &secret)
            .map_err(|e| KeyError::Signing(e.to_string()))?;
        let sig: sm2::dsa::Signature = sk
            .try_sign(msg)
            .map_err(|e| KeyError::Signing(e.to_string()))?;
        let mut out = Vec::with_capacity(SM2_DEFAULT_ID.len() + 1 + 64);
        out.extend_from_slice(SM2_DEFAULT_ID.as_bytes());
        out.push(0);
        out.extend_from_slice(&sig.to_bytes());
        Ok(out)
    }
}

impl KeyMaterial for PrivateKey {
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

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            algorithm: self.algorithm,
            parameters: self.parameters,
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Left-pad key bytes to the curve's scalar width.
fn scalar_bytes(bytes: &[u8], width: usize) -> Result<Vec<u8>, KeyError> {
    if bytes.len() > width {
        return Err(KeyError::InvalidKeyFormat(format!(
            "scalar is {} bytes, curve takes at most {}",
            bytes.len(),
            width
        )));
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}
