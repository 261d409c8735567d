use crate::error::{CodecError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

/// URI scheme marker that identifies a magnet link
pub const MAGNET_SCHEME: &str = "magnet:";

/// Envelope placed in front of the hash when a magnet link is rebuilt
pub const MAGNET_PREFIX: &str = "magnet:?xt=urn:btih:";

/// Number of hex characters in a BitTorrent v1 info hash
pub const INFO_HASH_LEN: usize = 40;

lazy_static! {
    // Exactly 40 hex digits, ended by a parameter separator or the end of the link
    static ref BTIH: Regex = Regex::new(r"urn:btih:([0-9A-Fa-f]{40})(?:[^0-9A-Fa-f]|$)").unwrap();
}

/// Canonical 40 character info hash, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfoHash(String);

impl InfoHash {
    /// Pull the hash out of a magnet link, ignoring any other parameters
    pub fn from_magnet(magnet: &str) -> Result<Self> {
        let captures = BTIH.captures(magnet).ok_or(CodecError::MissingHash)?;
        Self::from_str(&captures[1])
    }

    /// Get the hash as uppercase hex
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap the hash in a bare magnet link
    pub fn to_magnet(&self) -> String {
        format!("{}{}", MAGNET_PREFIX, self.0)
    }
}

impl FromStr for InfoHash {
    type Err = CodecError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        if value.len() != INFO_HASH_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidHash(value.to_string()));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for InfoHash {
    type Error = CodecError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<InfoHash> for String {
    fn from(hash: InfoHash) -> Self {
        hash.0
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether `text` is shaped like a magnet link
pub fn is_magnet(text: &str) -> bool {
    text.starts_with(MAGNET_SCHEME)
}
