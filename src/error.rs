// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Error types for Meridian key management.

use thiserror::Error;

/// Errors that can occur during key operations.
///
/// Every failure is synchronous and deterministic; nothing is retried or
/// recovered inside this crate.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("signature scheme not found: {0}")]
    SchemeNotFound(String),

    #[error("unknown key algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("scheme {scheme} cannot be used with {algorithm} keys")]
    SchemeMismatch { scheme: String, algorithm: String },

    #[error("no cryptographic rule for algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("no signing rule for scheme: {0}")]
    UnsupportedScheme(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("signature verification failed: {0}")]
    SignatureVerification(String),

    #[error("invalid KDF parameters: {0}")]
    KdfParams(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<KeyError> for signature::Error {
    fn from(e: KeyError) -> Self {
        signature::Error::from_source(e)
    }
}
