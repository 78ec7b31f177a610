use std::fmt;
use thiserror::Error;

pub const INVALID_ADDRESS_MESSAGE: &str = "Please enter a valid Ethereum address";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch transactions";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Rejected user input. Raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid Ethereum address")]
    InvalidAddress,
}

/// Where a fetch went wrong. Only used for diagnostics, the user always sees
/// [`FetchError::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Transport,
    HttpStatus(u16),
    Endpoint,
    Malformed,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport => write!(f, "transport"),
            FetchFailure::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailure::Endpoint => write!(f, "endpoint"),
            FetchFailure::Malformed => write!(f, "malformed body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchFailure,
    pub message: String,
}

impl FetchError {
    pub fn transport() -> Self {
        Self {
            kind: FetchFailure::Transport,
            message: FETCH_FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn http_status(code: u16) -> Self {
        Self {
            kind: FetchFailure::HttpStatus(code),
            message: FETCH_FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn malformed() -> Self {
        Self {
            kind: FetchFailure::Malformed,
            message: FETCH_FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Endpoint-reported failure. An absent or blank message falls back to
    /// "Unknown error".
    pub fn endpoint(message: Option<&str>) -> Self {
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        };
        Self {
            kind: FetchFailure::Endpoint,
            message,
        }
    }
}
