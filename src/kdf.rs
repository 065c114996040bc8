// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Password-based protection of private key material.
//!
//! A symmetric key is derived from the passphrase with scrypt, salted with the
//! compressed public key of the material being protected (the "anchor"). The
//! 32-byte private scalar is XORed with the first half of the derived key and
//! the result encrypted with AES-256-ECB under the second half; the stored
//! blob is `anchor || ciphertext`. Embedding the anchor lets decryption verify
//! the recovered scalar by re-deriving its public key, which is the only
//! reliable oracle for a wrong passphrase.

use crate::error::KeyError;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use serde::{Deserialize, Serialize};

/// Default scrypt cost: N = 2^14, r = 8, p = 8.
pub const DEFAULT_SCRYPT_LOG_N: u8 = 14;
pub const DEFAULT_SCRYPT_R: u32 = 8;
pub const DEFAULT_SCRYPT_P: u32 = 8;

const DERIVED_KEY_LEN: usize = 64;
const PLAIN_KEY_LEN: usize = 32;
const AES_BLOCK: usize = 16;

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self {
            log_n: DEFAULT_SCRYPT_LOG_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
        }
    }
}

fn derive(passphrase: &str, salt: &[u8], params: &ScryptParams) -> Result<[u8; DERIVED_KEY_LEN], KeyError> {
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, DERIVED_KEY_LEN)
        .map_err(|e| KeyError::KdfParams(e.to_string()))?;
    let mut derived = [0u8; DERIVED_KEY_LEN];
    scrypt::scrypt(passphrase.as_bytes(), salt, &scrypt_params, &mut derived)
        .map_err(|e| KeyError::KdfParams(e.to_string()))?;
    Ok(derived)
}

/// Encrypt a 32-byte private scalar, binding it to `anchor`.
///
/// Returns the storable blob `anchor || ciphertext`.
pub fn encrypt_key(
    plain: &[u8],
    anchor: &[u8],
    passphrase: &str,
    params: &ScryptParams,
) -> Result<Vec<u8>, KeyError> {
    if plain.len() != PLAIN_KEY_LEN {
        return Err(KeyError::InvalidKeyFormat(format!(
            "private key must be {} bytes to encrypt, got {}",
            PLAIN_KEY_LEN,
            plain.len()
        )));
    }
    let derived = derive(passphrase, anchor, params)?;

    let mut blocks = [0u8; PLAIN_KEY_LEN];
    for (i, b) in blocks.iter_mut().enumerate() {
        *b = plain[i] ^ derived[i];
    }

    let cipher = Aes256::new_from_slice(&derived[PLAIN_KEY_LEN..])
        .map_err(|e| KeyError::KdfParams(e.to_string()))?;
    for chunk in blocks.chunks_exact_mut(AES_BLOCK) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }

    let mut blob = Vec::with_capacity(anchor.len() + PLAIN_KEY_LEN);
    blob.extend_from_slice(anchor);
    blob.extend_from_slice(&blocks);
    Ok(blob)
}

/// Decrypt a blob produced by [`encrypt_key`].
///
/// `anchor_len` is fixed by the key's algorithm family (the compressed public
/// key width). Returns the candidate plaintext scalar and the embedded anchor;
/// the caller must verify the candidate against the anchor before trusting it.
pub fn decrypt_key(
    blob: &[u8],
    anchor_len: usize,
    passphrase: &str,
    params: &ScryptParams,
) -> Result<(Vec<u8>, Vec<u8>), KeyError> {
    if blob.len() != anchor_len + PLAIN_KEY_LEN {
        return Err(KeyError::Decryption(format!(
            "malformed encrypted key: expected {} bytes, got {}",
            anchor_len + PLAIN_KEY_LEN,
            blob.len()
        )));
    }
    let (anchor, ciphertext) = blob.split_at(anchor_len);
    let derived = derive(passphrase, anchor, params)?;

    let mut blocks = [0u8; PLAIN_KEY_LEN];
    blocks.copy_from_slice(ciphertext);
    let cipher = Aes256::new_from_slice(&derived[PLAIN_KEY_LEN..])
        .map_err(|e| KeyError::KdfParams(e.to_string()))?;
    for chunk in blocks.chunks_exact_mut(AES_BLOCK) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }
    for (i, b) in blocks.iter_mut().enumerate() {
        *b ^= derived[i];
    }

    Ok((blocks.to_vec(), anchor.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keep scrypt cheap in tests.
    fn fast_params() -> ScryptParams {
        ScryptParams {
            log_n: 4,
            r: 8,
            p: 1,
        }
    }

    #[test]
    fn test_round_trip() {
        let plain = [7u8; 32];
        let anchor = [2u8; 33];
        let blob = encrypt_key(&plain, &anchor, "passphrase", &fast_params()).unwrap();
        assert_eq!(blob.len(), 65);
        assert_eq!(&blob[..33], &anchor);
        assert_ne!(&blob[33..], &plain);

        let (candidate, embedded) = decrypt_key(&blob, 33, "passphrase", &fast_params()).unwrap();
        assert_eq!(candidate, plain);
        assert_eq!(embedded, anchor);
    }

    #[test]
    fn test_wrong_passphrase_yields_garbage() {
        let plain = [7u8; 32];
        let anchor = [2u8; 33];
        let blob = encrypt_key(&plain, &anchor, "right", &fast_params()).unwrap();
        let (candidate, _) = decrypt_key(&blob, 33, "wrong", &fast_params()).unwrap();
        // The block cipher decrypts regardless; only the bytes differ.
        assert_ne!(candidate, plain);
    }

    #[test]
    fn test_rejects_short_blob() {
        assert!(matches!(
            decrypt_key(&[0u8; 10], 33, "pw", &fast_params()),
            Err(KeyError::Decryption(_))
        ));
    }

    #[test]
    fn test_rejects_odd_key_length() {
        assert!(matches!(
            encrypt_key(&[1u8; 31], &[2u8; 33], "pw", &fast_params()),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }
}
