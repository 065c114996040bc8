// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Meridian cryptographic key management library.
//!
//! This crate provides:
//! - Private/public keys over multiple algorithm families (ECDSA, EdDSA, SM2)
//! - Signature computation and verification under selectable schemes
//! - Password-based private key encryption with scrypt and an anchor check
//! - JSON key record serialization and file storage

// Suppress warning from zeroize macro
#![allow(unused_assignments)]

pub mod algorithm;
pub mod error;
pub mod kdf;
pub mod key;
pub mod key_file;
pub mod private_key;
pub mod public_key;
pub mod scheme;
pub mod signature;

pub use crate::algorithm::{CurveLabel, KeyParameters, KeyType, DEFAULT_ALGORITHM};
pub use crate::error::KeyError;
pub use crate::kdf::ScryptParams;
pub use crate::key::{KeyMaterial, KeyRecord};
pub use crate::key_file::{read_private_key_from_file, write_private_key_to_file};
pub use crate::private_key::{PrivateKey, SM2_DEFAULT_ID};
pub use crate::public_key::PublicKey;
pub use crate::scheme::{SignatureScheme, ALL_SCHEMES};
pub use crate::signature::Signature;
