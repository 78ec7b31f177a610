use crate::error::ValidationError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is a valid regex")
});

/// A `0x`-prefixed, 40 hex digit account address exactly as the user typed
/// it. No checksum verification and no case normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if is_valid_address(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidAddress)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against an address coming from another
    /// source, e.g. the `from` field of an endpoint record.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    pub fn short(&self) -> String {
        shorten_address(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_address(input: &str) -> bool {
    ADDRESS_PATTERN.is_match(input)
}

/// Display form: first 6 and last 4 characters around an ellipsis. Presentation
/// only, never use the result as a lookup key.
pub fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() < 10 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
