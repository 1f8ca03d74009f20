//! A session-based byte tokenizer with chunked, resumable reads.
//!
//! A [`ScanService`] hands out sessions. Each session holds one scan buffer
//! and one separator set; writing replaces the buffer (writes never
//! accumulate), and reading walks the buffer one token at a time. A read is
//! bounded by the caller's capacity, so long tokens arrive over several
//! [`ReadOutcome::Chunk`]s, followed by [`ReadOutcome::TokenBoundary`]. Once
//! the buffer is spent every read returns [`ReadOutcome::NoMoreData`].
//!
//! Separators are matched byte for byte. NUL is ordinary data unless it is in
//! the separator set, and an empty set makes the whole buffer one token.
//!
//! ```rust
//! use bytescan::{ReadOutcome, ScanService};
//!
//! let mut service = ScanService::default();
//! let id = service.open()?;
//! service.write(id, b"verylongtoken:short")?;
//!
//! let mut seen = Vec::new();
//! loop {
//!     match service.read(id, 4)? {
//!         ReadOutcome::Chunk(bytes) => seen.push(String::from_utf8_lossy(bytes).into_owned()),
//!         ReadOutcome::TokenBoundary => seen.push("|".into()),
//!         ReadOutcome::NoMoreData => break,
//!         ReadOutcome::NoProgress => unreachable!("capacity is positive"),
//!     }
//! }
//! assert_eq!(seen, ["very", "long", "toke", "n", "|", "shor", "t", "|"]);
//! # Ok::<(), bytescan::ScanError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod cursor;
mod engine;
mod error;
mod options;
mod outcome;
mod separators;
mod service;
mod session;

#[cfg(test)]
mod tests;

pub use buffer::ScanBuffer;
pub use cursor::Cursor;
pub use engine::{ChunkSink, ScanEngine};
pub use error::{ScanError, TransportError};
pub use options::{ServiceDefaults, ServiceOptions};
pub use outcome::{ReadOutcome, ReadStatus};
pub use separators::{DEFAULT_SEPARATORS, SeparatorSet};
pub use service::{ScanService, SessionId};
pub use session::{ControlRequest, Session, Tokens};
