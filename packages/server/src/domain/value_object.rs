//! Value objects for the presence domain.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::error::IdentityError;

/// Application-level user identifier claimed by a connection.
///
/// Clients send either an integer user id or an opaque string token. Tokens
/// that spell an integer are normalized to [`Identity::Numeric`], so `7` and
/// `"7"` name the same user. Numeric identities order before tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "RawIdentity")]
pub enum Identity {
    Numeric(i64),
    Token(String),
}

impl Identity {
    /// Maximum token length in characters
    pub const MAX_TOKEN_LENGTH: usize = 64;

    /// Parse an identity from its textual form (e.g. a URL path segment).
    pub fn parse(value: &str) -> Result<Self, IdentityError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Ok(Self::Numeric(number));
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_TOKEN_LENGTH {
            return Err(IdentityError::TooLong {
                length,
                max: Self::MAX_TOKEN_LENGTH,
            });
        }
        Ok(Self::Token(trimmed.to_string()))
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = IdentityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(number) => write!(f, "{}", number),
            Self::Token(token) => f.write_str(token),
        }
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(number) => serializer.serialize_i64(*number),
            Self::Token(token) => serializer.serialize_str(token),
        }
    }
}

/// Wire shape accepted for an identity before validation
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentity {
    Numeric(i64),
    Token(String),
}

impl TryFrom<RawIdentity> for Identity {
    type Error = IdentityError;

    fn try_from(raw: RawIdentity) -> Result<Self, Self::Error> {
        match raw {
            RawIdentity::Numeric(number) => Ok(Self::Numeric(number)),
            RawIdentity::Token(token) => Self::parse(&token),
        }
    }
}

/// Opaque identifier of one real-time transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
