//! Content checksums for the output manifest
//!
//! Documents are hashed exactly as written to disk, so a manifest entry can
//! be verified byte-for-byte against the file it describes.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA256 digest of a rendered schema document, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute the checksum of the exact bytes written to disk.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(data)))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that `data` hashes to this checksum.
    pub fn verify(&self, data: &[u8]) -> bool {
        self.0 == Self::from_bytes(data).0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Checksum {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let rendered = b"{\n  \"$schema\": \"http://json-schema.org/draft-07/schema#\"\n}\n";
        assert_eq!(
            Checksum::from_bytes(rendered),
            Checksum::from_bytes(rendered)
        );
    }

    #[test]
    fn test_checksum_tracks_content() {
        let first = Checksum::from_bytes(b"{\"title\": \"Slack\"}");
        let second = Checksum::from_bytes(b"{\"title\": \"Jira\"}");
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_round_trip() {
        let data = b"generated document bytes";
        let checksum = Checksum::from_bytes(data);
        assert!(checksum.verify(data));
        assert!(!checksum.verify(b"tampered"));
    }

    #[test]
    fn test_known_digest() {
        // sha256 of the empty input.
        assert_eq!(
            Checksum::from_bytes(b"").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
