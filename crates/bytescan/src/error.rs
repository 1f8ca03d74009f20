use thiserror::Error;

use crate::service::SessionId;

/// Errors reported by session and service operations.
///
/// Reaching the end of the scan buffer is not an error; it is reported as
/// [`ReadOutcome::NoMoreData`](crate::ReadOutcome::NoMoreData).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Storage for a buffer, separator set or session could not be obtained,
    /// or a configured limit was reached.
    #[error("resource exhausted: {requested} requested")]
    ResourceExhausted {
        /// Bytes requested by a write, or the session count `open` would
        /// have reached.
        requested: usize,
    },
    /// The control request code is not supported.
    #[error("invalid control request {0}")]
    InvalidRequest(u32),
    /// The handle does not name a live session.
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
    /// Moving a chunk to the caller failed; no cursor state was advanced.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// An opaque failure raised by a [`ChunkSink`](crate::ChunkSink).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("transport failed: {reason}")]
pub struct TransportError {
    reason: &'static str,
}

impl TransportError {
    /// Creates a transport error with a static description.
    #[must_use]
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// The description supplied by the sink.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn resource_exhausted_message_names_no_unit() {
        let err = ScanError::ResourceExhausted { requested: 3 };
        assert_eq!(err.to_string(), "resource exhausted: 3 requested");
    }
}
