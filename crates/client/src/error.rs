//! Error taxonomy for sync operations.
//!
//! Every operation fails with a tagged variant callers can match on
//! programmatically; the `Display` projection exists only for the UI
//! edge. Variants are `Clone` so the published state can carry the last
//! error as part of its snapshot.

use thiserror::Error;

use shopsync_core::DecodeError;

/// A sync operation failure.
///
/// All failures are terminal to their operation - there is no automatic
/// retry anywhere - and none is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Transport-level failure (DNS, TLS, connection refused, timeout).
    /// Distinct from any HTTP-status error; forces disconnected state.
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP 401 - the access token was rejected.
    #[error("Authentication failed. Please check your access token.")]
    Auth,

    /// HTTP 402 - the shop's plan does not cover the API.
    #[error("Payment required. Please check your plan.")]
    Billing,

    /// HTTP 403 - the token lacks the required scope.
    #[error("Access forbidden. Please check your API permissions.")]
    Permission,

    /// HTTP 404 - the shop domain does not resolve to a store.
    #[error("Shop not found. Please check your shop domain.")]
    NotFound,

    /// Any other non-2xx status, with the numeric code retained.
    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),

    /// Malformed or unexpected JSON shape, with the decode diagnostic
    /// retained. Previously loaded lists stay untouched.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Operation invoked while not connected; no network call issued.
    #[error("Not connected. Connect to the shop first.")]
    NotConnected,

    /// Credential save failure. The in-memory credentials remain usable
    /// for the current session.
    #[error("Failed to save credentials: {0}")]
    Persistence(String),
}

impl SyncError {
    /// Map an HTTP status code to its error kind.
    ///
    /// Returns `None` for 2xx statuses.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Auth),
            402 => Some(Self::Billing),
            403 => Some(Self::Permission),
            404 => Some(Self::NotFound),
            other => Some(Self::UnexpectedStatus(other)),
        }
    }

    /// Whether this failure forces the connection state to false.
    ///
    /// Transport failures and the four specific auth-adjacent statuses
    /// sever the connection; an unexpected status, a decode failure, or
    /// a local failure leaves it as it was.
    #[must_use]
    pub const fn severs_connection(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Auth | Self::Billing | Self::Permission | Self::NotFound
        )
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        Self::Connection(e.to_string())
    }
}

impl From<DecodeError> for SyncError {
    fn from(e: DecodeError) -> Self {
        Self::Parse(e.to_string())
    }
}
