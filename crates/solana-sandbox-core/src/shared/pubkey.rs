//! Base58 public key parsing.
//!
//! Tool handlers receive account keys as plain strings. This module turns them
//! into [`Pubkey`] values and reports bad input as a [`ParseFailure`] whose
//! message echoes the offending string, so the handler can hand it straight
//! back to the client.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::response::ToolResult;

/// Number of raw bytes in a public key.
pub const PUBKEY_BYTES: usize = 32;

/// Longest base58 string that can still decode to [`PUBKEY_BYTES`] bytes.
pub const MAX_BASE58_LEN: usize = 44;

/// A 32-byte public key, displayed in base58.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub const fn new(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// Lowercase hex of the raw bytes, without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// True for the all-zero key (the system program id).
    pub fn is_default(&self) -> bool {
        self.0 == [0u8; PUBKEY_BYTES]
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Pubkey {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; PUBKEY_BYTES]>::try_from(bytes).map(Self)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pubkey(s)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_pubkey(&s).map_err(serde::de::Error::custom)
    }
}

/// Why a string was rejected. Never changes the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureReason {
    /// More characters than any 32-byte base58 value needs.
    TooLong { len: usize },
    /// A character outside the base58 alphabet.
    InvalidEncoding,
    /// Valid base58 that decodes to the wrong number of bytes.
    WrongLength { decoded: usize },
}

/// A string that is not a valid public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid public key: {input}")]
pub struct ParseFailure {
    input: String,
    reason: ParseFailureReason,
}

impl ParseFailure {
    fn new(input: &str, reason: ParseFailureReason) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input, verbatim.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> ParseFailureReason {
        self.reason
    }
}

/// Parse a base58 string into a [`Pubkey`].
///
/// # Example
/// ```
/// use solana_sandbox_core::shared::pubkey::parse_pubkey;
///
/// let key = parse_pubkey("11111111111111111111111111111111").unwrap();
/// assert!(key.is_default());
///
/// let err = parse_pubkey("not-a-valid-key!!").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid public key: not-a-valid-key!!");
/// ```
pub fn parse_pubkey(input: &str) -> Result<Pubkey, ParseFailure> {
    if input.len() > MAX_BASE58_LEN {
        return Err(ParseFailure::new(
            input,
            ParseFailureReason::TooLong { len: input.len() },
        ));
    }

    let decoded = bs58::decode(input)
        .into_vec()
        .map_err(|_| ParseFailure::new(input, ParseFailureReason::InvalidEncoding))?;

    Pubkey::try_from(decoded.as_slice()).map_err(|_| {
        ParseFailure::new(
            input,
            ParseFailureReason::WrongLength {
                decoded: decoded.len(),
            },
        )
    })
}

/// Try to parse a public key, returning None on failure.
pub fn try_parse_pubkey(input: &str) -> Option<Pubkey> {
    parse_pubkey(input).ok()
}

/// Parse multiple public keys. Stops at the first invalid one.
pub fn parse_pubkeys<'a, I>(inputs: I) -> Result<Vec<Pubkey>, ParseFailure>
where
    I: IntoIterator<Item = &'a str>,
{
    inputs.into_iter().map(parse_pubkey).collect()
}

/// Parse a public key, or build the error envelope a tool handler should return.
///
/// ```ignore
/// let owner = match validate_pubkey::<Value>(&input.owner) {
///     Ok(key) => key,
///     Err(resp) => return resp,
/// };
/// ```
pub fn validate_pubkey<T>(input: &str) -> Result<Pubkey, ToolResult<T>> {
    parse_pubkey(input).map_err(ToolResult::from)
}
