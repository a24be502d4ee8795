use crate::core::constants::{DEFAULT_TARGET, DIGEST_LEN};
use crate::util::error::SeekError;
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Raw SHA-256 digest the search is trying to reproduce.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDigest([u8; DIGEST_LEN]);

impl TargetDigest {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses 64 hex characters, either case, surrounding whitespace ignored.
    pub fn from_hex(s: &str) -> Result<Self, SeekError> {
        let bytes = hex::decode(s.trim()).map_err(|e| SeekError::InvalidTarget(e.to_string()))?;
        let arr = <[u8; DIGEST_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
            SeekError::InvalidTarget(format!(
                "expected {} bytes, got {}",
                DIGEST_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Digest of `data`, mostly useful for building test targets.
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for TargetDigest {
    fn default() -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        if hex::decode_to_slice(DEFAULT_TARGET, &mut bytes).is_err() {
            bytes = [0u8; DIGEST_LEN];
        }
        Self(bytes)
    }
}

impl FromStr for TargetDigest {
    type Err = SeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetDigest({})", self.to_hex())
    }
}

impl fmt::Display for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TargetDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hashes candidates and compares the raw digest bytes against the target.
#[derive(Debug, Clone, Copy)]
pub struct DigestMatcher {
    target: TargetDigest,
}

impl DigestMatcher {
    pub fn new(target: TargetDigest) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &TargetDigest {
        &self.target
    }

    #[inline]
    pub fn matches(&self, candidate: &[u8]) -> bool {
        Sha256::digest(candidate).as_slice() == self.target.0.as_slice()
    }
}
