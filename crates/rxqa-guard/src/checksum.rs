//! Checksummed data packages.
//!
//! A package stores data next to the SHA-256 of its JSON text plus a fixed
//! salt. Data is hashed through `serde_json::Value`, whose maps are sorted,
//! so sealing and verifying always see the same text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{GuardError, Result};

const CHECKSUM_SALT: &str = "rxqa_session_v1";

/// Compute the salted SHA-256 checksum of `data`.
pub fn compute_checksum(data: &Value) -> Result<String> {
    let text = serde_json::to_string(data).map_err(|source| GuardError::Serialization { source })?;
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(CHECKSUM_SALT.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Data plus the checksum it was sealed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecksumPackage {
    pub data: Value,
    pub checksum: String,
}

impl ChecksumPackage {
    pub fn seal<T: Serialize>(data: &T) -> Result<Self> {
        let data = serde_json::to_value(data).map_err(|source| GuardError::Serialization { source })?;
        let checksum = compute_checksum(&data)?;
        debug!(checksum = %checksum, "Sealed package");
        Ok(Self { data, checksum })
    }

    /// Verify the checksum without decoding the data.
    pub fn verify(&self) -> Result<()> {
        let actual = compute_checksum(&self.data)?;
        if actual != self.checksum.to_lowercase() {
            warn!(expected = %self.checksum, actual = %actual, "Checksum mismatch");
            return Err(GuardError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Verify and decode the data.
    pub fn open<T: DeserializeOwned>(self) -> Result<T> {
        self.verify()?;
        serde_json::from_value(self.data).map_err(|source| GuardError::Deserialization { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn sealed_data_opens() {
        let data = BTreeMap::from([("weight".to_string(), vec!["nominal_value".to_string()])]);
        let package = ChecksumPackage::seal(&data).expect("seal");
        assert_eq!(package.checksum.len(), 64);
        let opened: BTreeMap<String, Vec<String>> = package.open().expect("open");
        assert_eq!(opened, data);
    }

    #[test]
    fn edited_data_is_detected() {
        let mut package = ChecksumPackage::seal(&json!({ "weight": ["nominal_value"] })).expect("seal");
        package.data = json!({ "weight": ["nominal_value", "boundary_max"] });
        assert!(matches!(
            package.verify(),
            Err(GuardError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn checksum_survives_a_json_round_trip() {
        let package = ChecksumPackage::seal(&json!({ "b": 1, "a": [true, null] })).expect("seal");
        let text = serde_json::to_string(&package).expect("serialize");
        let restored: ChecksumPackage = serde_json::from_str(&text).expect("deserialize");
        assert!(restored.verify().is_ok());
    }

    #[test]
    fn salt_changes_the_digest() {
        let unsalted = hex::encode(Sha256::digest(b"{}"));
        assert_ne!(compute_checksum(&json!({})).expect("checksum"), unsalted);
    }
}
