use core::fmt;

use bstr::BStr;

/// The result of one read against a session.
///
/// Borrowed chunks point into the session's scan buffer and stay valid until
/// the session is next mutated.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome<'a> {
    /// More bytes of the current token; never empty.
    Chunk(&'a [u8]),
    /// The current token has been fully delivered.
    TokenBoundary,
    /// No further token in the buffer (or no buffer at all).
    NoMoreData,
    /// The read had zero capacity while token bytes were pending. Nothing was
    /// delivered; retry with a positive capacity.
    NoProgress,
}

impl<'a> ReadOutcome<'a> {
    /// The chunk bytes, if any were delivered.
    #[must_use]
    pub fn chunk(self) -> Option<&'a [u8]> {
        match self {
            ReadOutcome::Chunk(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The length-only form of this outcome.
    #[must_use]
    pub fn status(self) -> ReadStatus {
        match self {
            ReadOutcome::Chunk(bytes) => ReadStatus::Chunk(bytes.len()),
            ReadOutcome::TokenBoundary => ReadStatus::TokenBoundary,
            ReadOutcome::NoMoreData => ReadStatus::NoMoreData,
            ReadOutcome::NoProgress => ReadStatus::NoProgress,
        }
    }

    /// Signed length in the legacy device encoding; see
    /// [`ReadStatus::wire_len`].
    #[must_use]
    pub fn wire_len(self) -> isize {
        self.status().wire_len()
    }
}

impl fmt::Debug for ReadOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadOutcome::Chunk(bytes) => f.debug_tuple("Chunk").field(&BStr::new(bytes)).finish(),
            ReadOutcome::TokenBoundary => f.write_str("TokenBoundary"),
            ReadOutcome::NoMoreData => f.write_str("NoMoreData"),
            ReadOutcome::NoProgress => f.write_str("NoProgress"),
        }
    }
}

/// A read outcome once the bytes have been moved to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// This many token bytes were delivered.
    Chunk(usize),
    /// The current token has been fully delivered.
    TokenBoundary,
    /// No further token in the buffer.
    NoMoreData,
    /// Zero capacity; nothing delivered.
    NoProgress,
}

impl ReadStatus {
    /// Encodes the status as a character-device style signed length: the
    /// positive chunk length, `0` at a token boundary, `-1` when out of data.
    ///
    /// `NoProgress` also encodes as `0` since no bytes moved; callers that need
    /// to tell it apart from a boundary must use the tagged form.
    #[must_use]
    pub fn wire_len(self) -> isize {
        match self {
            ReadStatus::Chunk(n) => isize::try_from(n).unwrap_or(isize::MAX),
            ReadStatus::TokenBoundary | ReadStatus::NoProgress => 0,
            ReadStatus::NoMoreData => -1,
        }
    }

    /// Decodes a signed device length.
    #[must_use]
    pub fn from_wire_len(len: isize) -> Self {
        match len {
            0 => ReadStatus::TokenBoundary,
            n if n > 0 => ReadStatus::Chunk(n.unsigned_abs()),
            _ => ReadStatus::NoMoreData,
        }
    }

    /// Number of bytes delivered.
    #[must_use]
    pub fn len(self) -> usize {
        match self {
            ReadStatus::Chunk(n) => n,
            _ => 0,
        }
    }

    /// Whether no bytes were delivered.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ReadStatus::Chunk(4), 4)]
    #[case(ReadStatus::TokenBoundary, 0)]
    #[case(ReadStatus::NoProgress, 0)]
    #[case(ReadStatus::NoMoreData, -1)]
    fn wire_encoding(#[case] status: ReadStatus, #[case] expected: isize) {
        assert_eq!(status.wire_len(), expected);
    }

    #[rstest]
    #[case(12, ReadStatus::Chunk(12))]
    #[case(0, ReadStatus::TokenBoundary)]
    #[case(-1, ReadStatus::NoMoreData)]
    #[case(-22, ReadStatus::NoMoreData)]
    fn wire_decoding(#[case] len: isize, #[case] expected: ReadStatus) {
        assert_eq!(ReadStatus::from_wire_len(len), expected);
    }

    #[test]
    fn chunk_debug_shows_bytes() {
        let outcome = ReadOutcome::Chunk(b"he\0lo");
        assert_eq!(format!("{outcome:?}"), r#"Chunk("he\0lo")"#);
        assert_eq!(outcome.status(), ReadStatus::Chunk(5));
        assert_eq!(outcome.wire_len(), 5);
        assert_eq!(ReadOutcome::NoMoreData.chunk(), None);
    }
}
