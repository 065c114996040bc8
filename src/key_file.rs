// Copyright (c) Meridian Project
// SPDX-License-Identifier: Apache-2.0

//! Utilities for reading and writing key records to files.

use crate::error::KeyError;
use crate::private_key::PrivateKey;
use std::path::Path;

/// Write a private key to a file as a pretty-printed JSON key record.
pub fn write_private_key_to_file<P: AsRef<Path>>(
    key: &PrivateKey,
    path: P,
) -> Result<(), KeyError> {
    let contents = serde_json::to_string_pretty(&key.to_record())
        .map_err(|e| KeyError::Serialization(e.to_string()))?;
    std::fs::write(&path, contents)?;

    // Set restrictive permissions on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let path = path.as_ref();
        if path.exists() {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
    }

    Ok(())
}

/// Read a private key from a JSON key record file.
pub fn read_private_key_from_file<P: AsRef<Path>>(path: P) -> Result<PrivateKey, KeyError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KeyError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Key file not found: {:?}", path),
        )));
    }
    let contents = std::fs::read_to_string(path)?;
    PrivateKey::from_json(contents.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::KeyType;
    use crate::key::KeyMaterial;
    use tempfile::tempdir;

    #[test]
    fn test_write_read_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signing.key");

        let sk = PrivateKey::random_for(KeyType::Eddsa, None);
        write_private_key_to_file(&sk, &path).unwrap();

        let loaded = read_private_key_from_file(&path).unwrap();
        assert_eq!(loaded.as_bytes(), sk.as_bytes());
        assert_eq!(loaded.algorithm(), sk.algorithm());
    }

    #[test]
    fn test_file_not_found() {
        let result = read_private_key_from_file("/nonexistent/path/key.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.key");
        std::fs::write(&path, "not a key record").unwrap();
        assert!(matches!(
            read_private_key_from_file(&path),
            Err(KeyError::Serialization(_))
        ));
    }
}
