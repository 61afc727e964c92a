//! Account identities and asset handles.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bincode::{Decode, Encode};
#[cfg(feature = "json")]
use hex::serde as hex_serde;
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Ledger handle of the single tradable asset.
pub type AssetId = u64;

/// A 32-byte account identity (public key or program address).
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(transparent))]
#[derive(Debug, Clone, Copy, Encode, Decode, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(#[cfg_attr(feature = "json", serde(with = "hex_serde"))] pub [u8; 32]);

impl Address {
    /// Length in bytes of every identity.
    pub const LEN: usize = 32;

    /// Placeholder for slots that have not been assigned yet.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Builds an identity from a raw byte slice of exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdentityError> {
        <[u8; 32]>::try_from(bytes)
            .map(Self)
            .map_err(|_| IdentityError::InvalidLength(bytes.len()))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for Address {
    type Err = IdentityError;

    /// Parses an identity from one of:
    /// - `0x`-prefixed or bare 64-character hex
    /// - base58 (Solana-style)
    /// - standard base64
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdentityError::EmptyIdentity);
        }

        let bytes = if let Some(stripped) = s.strip_prefix("0x") {
            hex::decode(stripped)?
        } else if s.len() == 2 * Self::LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            hex::decode(s)?
        } else {
            match bs58::decode(s).into_vec() {
                Ok(bytes) => bytes,
                Err(_) => BASE64.decode(s)?,
            }
        };
        Self::from_slice(&bytes)
    }
}
