//! Error types for the dashboard core.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the dashboard core.
///
/// `UnknownSymbol` and `UnknownInterval` indicate an inconsistency between
/// the choices the UI offers and the static tables in this crate; they abort
/// the whole render cycle. The provider errors are isolated per symbol and
/// surfaced as failure slots in the [`ViewModel`](crate::engine::ViewModel).
#[derive(Debug, Error)]
pub enum Error {
    /// Symbol label is not registered in the catalog.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Interval label is not registered in the policy table.
    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    /// Transport-level failure: connect error, timeout, dropped connection.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered but signalled failure (error status line or a
    /// non-success `Response` field, e.g. rate limiting).
    #[error("provider error: {0}")]
    ProviderError(String),

    /// The response body did not contain a parseable candle array.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Whether this error aborts the render cycle instead of being isolated
    /// to a single symbol slot.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnknownSymbol(_) | Error::UnknownInterval(_))
    }
}
