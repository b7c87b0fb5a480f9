//! Representation of the shared key `K`, an opaque sequence of bytes
//!
//! Strings are taken as their UTF-8 bytes as-is. Encoded secrets (base32 and the like) must be decoded by the caller.
//!
//! # Examples
//!
//! ```
//! use totp_gen::Secret;
//!
//! let from_str = Secret::from("ninja@example.comHENNGECHALLENGE003");
//! let from_bytes = Secret::from(b"ninja@example.comHENNGECHALLENGE003".to_vec());
//! assert_eq!(from_str, from_bytes);
//!
//! // the bytes never end up in logs
//! assert_eq!(format!("{:?}", from_str), "Secret(35 bytes)");
//! ```

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Shared secret between client and server to generate tokens from.
#[derive(Clone, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Borrow the raw bytes of the secret
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the secret
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret holds no bytes at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret(bytes)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Secret(bytes.to_vec())
    }
}

impl From<String> for Secret {
    fn from(text: String) -> Self {
        Secret(text.into_bytes())
    }
}

impl From<&str> for Secret {
    fn from(text: &str) -> Self {
        Secret(text.as_bytes().to_vec())
    }
}
