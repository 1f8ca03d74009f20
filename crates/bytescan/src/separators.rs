//! Separator alphabet for a session.
//!
//! The byte list is kept in the order it was written (so it can be shown
//! back to the caller verbatim) alongside a 256-bit membership table that the
//! scan loops consult. The two are only ever replaced together.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::{buffer::try_copy, error::ScanError};

/// Default separators: space, horizontal tab, line feed, colon.
pub const DEFAULT_SEPARATORS: &[u8] = b" \t\n:";

#[derive(Clone, Copy, Default, PartialEq, Eq)]
struct ByteTable([u64; 4]);

impl ByteTable {
    fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        for &b in bytes {
            table.0[usize::from(b >> 6)] |= 1 << (b & 63);
        }
        table
    }

    #[inline]
    fn contains(self, b: u8) -> bool {
        self.0[usize::from(b >> 6)] & (1 << (b & 63)) != 0
    }
}

/// An owned set of separator bytes.
///
/// Order and duplicates are preserved in [`as_bytes`](Self::as_bytes) but
/// have no effect on matching. An empty set matches nothing, so a buffer
/// scanned with it is a single token.
#[derive(Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    bytes: Vec<u8>,
    table: ByteTable,
}

impl SeparatorSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            table: ByteTable([0; 4]),
        }
    }

    /// Copies `bytes` into a new set.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceExhausted`] if storage for the copy cannot
    /// be reserved.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, ScanError> {
        let owned = try_copy(bytes)?;
        Ok(Self {
            table: ByteTable::from_bytes(&owned),
            bytes: owned,
        })
    }

    /// Whether `b` terminates a token.
    #[inline]
    #[must_use]
    pub fn contains(&self, b: u8) -> bool {
        self.table.contains(b)
    }

    /// The separator bytes in the order they were supplied.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes supplied, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no byte is a separator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drops every separator, releasing the storage.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self {
            bytes: DEFAULT_SEPARATORS.to_vec(),
            table: ByteTable::from_bytes(DEFAULT_SEPARATORS),
        }
    }
}

impl fmt::Debug for SeparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SeparatorSet")
            .field(&BStr::new(&self.bytes))
            .finish()
    }
}
