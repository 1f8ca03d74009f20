//! Engine: per-read driver over a scan buffer and its cursor.
//!
//! Each read runs in two phases keyed off the cursor:
//! - a token is located (`token_start < token_end`): hand out up to
//!   `capacity` more bytes of it, or report the boundary once it is spent;
//! - no token is located: skip separators from `pos`, then extend a new token
//!   over the following run of non-separators.
//!
//! Locating a token moves `pos` and the token bounds, but the delivered count
//! (`token_read_offset`) only moves once the chunk has reached the caller. A
//! failed [`ChunkSink`] therefore leaves the next read to hand out the same
//! bytes again.
//!
//! Bytes are compared by membership in the [`SeparatorSet`] only; NUL is
//! ordinary data unless it is in the set.

use alloc::vec::Vec;
use core::ops::Range;

use log::trace;

use crate::{
    cursor::Cursor,
    error::{ScanError, TransportError},
    outcome::{ReadOutcome, ReadStatus},
    separators::SeparatorSet,
};


/// Destination for token chunks.
///
/// A sink either takes the whole chunk or fails; the engine advances its
/// cursor only after `deliver` returns `Ok`.
pub trait ChunkSink {
    /// Moves `chunk` to the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the chunk could not be delivered.
    fn deliver(&mut self, chunk: &[u8]) -> Result<(), TransportError>;
}

impl ChunkSink for Vec<u8> {
    fn deliver(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

enum Step {
    Deliver(Range<usize>),
    Boundary,
    Exhausted,
}

/// A read-only view of a scan buffer and its separators.
///
/// The engine owns no state between calls; everything it learns is written
/// back to the [`Cursor`] it is handed. A cursor whose offsets lie past the
/// end of this buffer reads as [`ReadOutcome::NoMoreData`].
#[derive(Debug, Clone, Copy)]
pub struct ScanEngine<'a> {
    buffer: &'a [u8],
    separators: &'a SeparatorSet,
}

impl<'a> ScanEngine<'a> {
    /// Creates an engine over `buffer`. An absent buffer is scanned as empty.
    #[must_use]
    pub fn new(buffer: &'a [u8], separators: &'a SeparatorSet) -> Self {
        Self { buffer, separators }
    }

    /// Produces the next outcome, borrowing the chunk from the buffer.
    pub fn read(&self, cursor: &mut Cursor, capacity: usize) -> ReadOutcome<'a> {
        match self.step(cursor, capacity) {
            Step::Deliver(range) if range.is_empty() => ReadOutcome::NoProgress,
            Step::Deliver(range) => {
                cursor.consume(range.len());
                ReadOutcome::Chunk(&self.buffer[range])
            }
            Step::Boundary => ReadOutcome::TokenBoundary,
            Step::Exhausted => ReadOutcome::NoMoreData,
        }
    }

    /// Produces the next outcome, moving any chunk through `sink` before the
    /// cursor records it as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Transport`] if the sink fails. The delivered count
    /// is left untouched, so the next read offers the same bytes.
    pub fn read_with<S>(
        &self,
        cursor: &mut Cursor,
        capacity: usize,
        sink: &mut S,
    ) -> Result<ReadStatus, ScanError>
    where
        S: ChunkSink + ?Sized,
    {
        match self.step(cursor, capacity) {
            Step::Deliver(range) if range.is_empty() => Ok(ReadStatus::NoProgress),
            Step::Deliver(range) => {
                let n = range.len();
                sink.deliver(&self.buffer[range])?;
                cursor.consume(n);
                Ok(ReadStatus::Chunk(n))
            }
            Step::Boundary => Ok(ReadStatus::TokenBoundary),
            Step::Exhausted => Ok(ReadStatus::NoMoreData),
        }
    }

    /// Copies the next chunk into `dst`, using its length as the capacity.
    pub fn read_into(&self, cursor: &mut Cursor, dst: &mut [u8]) -> ReadStatus {
        match self.step(cursor, dst.len()) {
            Step::Deliver(range) if range.is_empty() => ReadStatus::NoProgress,
            Step::Deliver(range) => {
                let n = range.len();
                dst[..n].copy_from_slice(&self.buffer[range]);
                cursor.consume(n);
                ReadStatus::Chunk(n)
            }
            Step::Boundary => ReadStatus::TokenBoundary,
            Step::Exhausted => ReadStatus::NoMoreData,
        }
    }

    fn step(&self, cursor: &mut Cursor, capacity: usize) -> Step {
        let len = self.buffer.len();
        if len == 0 {
            return Step::Exhausted;
        }

        // A cursor carried over from a longer buffer has nothing left here.
        if cursor.pos > len || cursor.token_end > len {
            cursor.park(len);
            return Step::Exhausted;
        }

        if cursor.in_token() {
            let remaining = cursor.token_remaining();
            if remaining == 0 {
                cursor.finish_token();
                return Step::Boundary;
            }
            let start = cursor.token_start + cursor.token_read_offset;
            return Step::Deliver(start..start + remaining.min(capacity));
        }

        let start = cursor.pos + self.run_len(cursor.pos, true);
        if start >= len {
            cursor.pos = len;
            return Step::Exhausted;
        }
        let end = start + self.run_len(start, false);
        trace!("token located at {start}..{end} of {len}");
        cursor.begin_token(start, end);
        Step::Deliver(start..start + (end - start).min(capacity))
    }

    /// Length of the run starting at `from` whose bytes are (or are not)
    /// separators.
    fn run_len(&self, from: usize, separators: bool) -> usize {
        self.buffer
            .get(from..)
            .unwrap_or_default()
            .iter()
            .take_while(|&&b| self.separators.contains(b) == separators)
            .count()
    }
}
