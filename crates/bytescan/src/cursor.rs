/// Scan progress over one scan buffer.
///
/// All offsets index the current [`ScanBuffer`](crate::ScanBuffer). When
/// `token_start == token_end` no token is being delivered and the next read
/// scans forward from `pos`.
///
/// Invariants:
/// - `token_start <= token_end <= buffer.len()`
/// - `token_read_offset <= token_end - token_start`
/// - `pos` never moves backwards for a given buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) pos: usize,
    pub(crate) token_start: usize,
    pub(crate) token_end: usize,
    pub(crate) token_read_offset: usize,
}

impl Cursor {
    /// Offset of the next byte not yet scanned.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Start of the token being delivered.
    #[must_use]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// End (exclusive) of the token being delivered.
    #[must_use]
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    /// Bytes of the current token already handed to the caller.
    #[must_use]
    pub fn token_read_offset(&self) -> usize {
        self.token_read_offset
    }

    /// Whether a token is currently located.
    #[must_use]
    pub fn in_token(&self) -> bool {
        self.token_start < self.token_end
    }

    /// Bytes of the current token not yet handed out.
    #[must_use]
    pub fn token_remaining(&self) -> usize {
        (self.token_end - self.token_start) - self.token_read_offset
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin_token(&mut self, start: usize, end: usize) {
        debug_assert!(start < end);
        self.token_start = start;
        self.token_end = end;
        self.token_read_offset = 0;
        self.pos = end;
    }

    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.token_remaining());
        self.token_read_offset += n;
    }

    /// Drops any token and moves `pos` to `len`, the exhausted state.
    pub(crate) fn park(&mut self, len: usize) {
        *self = Self {
            pos: len,
            ..Self::default()
        };
    }

    /// Leaves the delivered token, parking `pos` at its end.
    pub(crate) fn finish_token(&mut self) {
        self.pos = self.token_end;
        self.token_start = 0;
        self.token_end = 0;
        self.token_read_offset = 0;
    }
}
