use core::fmt;

use log::{debug, trace, warn};

use crate::{
    buffer::ScanBuffer,
    cursor::Cursor,
    engine::{ChunkSink, ScanEngine},
    error::ScanError,
    options::ServiceOptions,
    outcome::{ReadOutcome, ReadStatus},
    separators::SeparatorSet,
};

/// Control requests a session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Clear the separators and route the next write into the separator set.
    Configure,
}

impl ControlRequest {
    /// The numeric request code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            ControlRequest::Configure => 0,
        }
    }
}

impl TryFrom<u32> for ControlRequest {
    type Error = ScanError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ControlRequest::Configure),
            other => Err(ScanError::InvalidRequest(other)),
        }
    }
}

impl fmt::Display for ControlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlRequest::Configure => f.write_str("configure"),
        }
    }
}

/// One open connection: a scan buffer, its separators and the read cursor.
///
/// Sessions share nothing with each other. Every operation takes `&mut self`,
/// so at most one is in flight per session.
///
/// ```rust
/// use bytescan::{ReadOutcome, ServiceOptions, Session};
///
/// let mut session = Session::new(&ServiceOptions::default())?;
/// session.write(b"verylongtoken:short")?;
/// assert_eq!(session.read(4), ReadOutcome::Chunk(b"very"));
/// assert_eq!(session.read(64), ReadOutcome::Chunk(b"longtoken"));
/// assert_eq!(session.read(64), ReadOutcome::TokenBoundary);
/// # Ok::<(), bytescan::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    buffer: Option<ScanBuffer>,
    separators: SeparatorSet,
    cursor: Cursor,
    awaiting_separator_write: bool,
    max_buffer_len: Option<usize>,
}

impl Session {
    /// Opens a session with a private copy of the configured default
    /// separators. No buffer is installed yet.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceExhausted`] if the separator copy cannot
    /// be stored.
    pub fn new(options: &ServiceOptions) -> Result<Self, ScanError> {
        Ok(Self {
            buffer: None,
            separators: SeparatorSet::try_from_bytes(options.defaults.separators())?,
            cursor: Cursor::default(),
            awaiting_separator_write: false,
            max_buffer_len: options.max_buffer_len,
        })
    }

    /// Enters configuration mode: the separator set is emptied now, and the
    /// next write replaces it.
    pub fn configure(&mut self) {
        self.awaiting_separator_write = true;
        self.separators.clear();
        debug!("session awaiting separator write");
    }

    /// Dispatches a raw control request code.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRequest`] for any code other than
    /// [`ControlRequest::Configure`]; the session is left untouched.
    pub fn control(&mut self, code: u32) -> Result<(), ScanError> {
        let request = ControlRequest::try_from(code).inspect_err(|_| {
            warn!("rejected control request {code}");
        })?;
        match request {
            ControlRequest::Configure => self.configure(),
        }
        Ok(())
    }

    /// Replaces the separator set (in configuration mode) or the scan buffer.
    ///
    /// Writes never accumulate: installing a buffer discards the previous one
    /// and rewinds the cursor. Returns the number of bytes taken, which is
    /// always `bytes.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceExhausted`] if the bytes exceed
    /// `max_buffer_len` or cannot be stored. The session keeps its previous
    /// buffer, separators and mode.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, ScanError> {
        if self.max_buffer_len.is_some_and(|limit| bytes.len() > limit) {
            warn!(
                "write of {} bytes exceeds limit {:?}",
                bytes.len(),
                self.max_buffer_len
            );
            return Err(ScanError::ResourceExhausted {
                requested: bytes.len(),
            });
        }

        if self.awaiting_separator_write {
            self.separators = SeparatorSet::try_from_bytes(bytes)?;
            self.awaiting_separator_write = false;
            debug!("installed {} separator bytes", bytes.len());
        } else {
            self.buffer = Some(ScanBuffer::try_from_bytes(bytes)?);
            self.cursor.reset();
            trace!("installed {} byte scan buffer", bytes.len());
        }
        Ok(bytes.len())
    }

    /// Splits the session into an engine over its buffer and the cursor that
    /// engine advances. An absent buffer scans as empty.
    fn split(&mut self) -> (ScanEngine<'_>, &mut Cursor) {
        let buffer = self.buffer.as_ref().map_or(&[][..], ScanBuffer::as_bytes);
        (ScanEngine::new(buffer, &self.separators), &mut self.cursor)
    }

    /// Reads the next chunk of at most `capacity` bytes, or reports a token
    /// boundary or the end of the data.
    pub fn read(&mut self, capacity: usize) -> ReadOutcome<'_> {
        let (engine, cursor) = self.split();
        engine.read(cursor, capacity)
    }

    /// Copies the next chunk into `dst`; its length is the capacity.
    pub fn read_into(&mut self, dst: &mut [u8]) -> ReadStatus {
        let (engine, cursor) = self.split();
        engine.read_into(cursor, dst)
    }

    /// Moves the next chunk through `sink`, recording it as delivered only
    /// once the sink accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Transport`] when the sink fails; the bytes are
    /// offered again by the next read.
    pub fn read_with<S>(&mut self, capacity: usize, sink: &mut S) -> Result<ReadStatus, ScanError>
    where
        S: ChunkSink + ?Sized,
    {
        let (engine, cursor) = self.split();
        engine.read_with(cursor, capacity, sink)
    }

    /// Drains the remaining tokens whole.
    ///
    /// A partly delivered token yields only its undelivered tail.
    pub fn tokens(&mut self) -> Tokens<'_> {
        let (engine, cursor) = self.split();
        Tokens { engine, cursor }
    }

    /// The current separator set.
    #[must_use]
    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// The current scan buffer; `None` before the first data write.
    #[must_use]
    pub fn buffer(&self) -> Option<&ScanBuffer> {
        self.buffer.as_ref()
    }

    /// Scan progress.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Whether the next write sets the separators.
    #[must_use]
    pub fn is_awaiting_separators(&self) -> bool {
        self.awaiting_separator_write
    }
}

/// Iterator over whole tokens, returned by [`Session::tokens`].
#[derive(Debug)]
pub struct Tokens<'a> {
    engine: ScanEngine<'a>,
    cursor: &'a mut Cursor,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.engine.read(self.cursor, usize::MAX) {
                ReadOutcome::Chunk(token) => return Some(token),
                ReadOutcome::TokenBoundary => {}
                ReadOutcome::NoMoreData | ReadOutcome::NoProgress => return None,
            }
        }
    }
}
