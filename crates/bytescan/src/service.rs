//! Process-wide owner of the session arena.
//!
//! Sessions live in a slot vector. A [`SessionId`] pairs a slot index with
//! the slot's generation at the time it was issued; closing a session bumps
//! the generation, so a handle kept past `close` no longer resolves even
//! after the slot is reused.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, info, warn};

use crate::{
    engine::ChunkSink,
    error::ScanError,
    options::{ServiceDefaults, ServiceOptions},
    outcome::{ReadOutcome, ReadStatus},
    session::Session,
};

/// Opaque handle to an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    index: u32,
    generation: u32,
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    session: Option<Session>,
}

/// The tokenizer service: default separators plus every open session.
///
/// ```rust
/// use bytescan::{ReadOutcome, ScanService};
///
/// let mut service = ScanService::default();
/// let id = service.open()?;
/// service.configure(id)?;
/// service.write(id, b"-,")?;
/// service.write(id, b"hello-world")?;
/// assert_eq!(service.read(id, 64)?, ReadOutcome::Chunk(b"hello"));
/// service.close(id)?;
/// # Ok::<(), bytescan::ScanError>(())
/// ```
#[derive(Debug)]
pub struct ScanService {
    options: ServiceOptions,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ScanService {
    /// Creates a service; `options.defaults` is fixed from here on.
    #[must_use]
    pub fn new(options: ServiceOptions) -> Self {
        info!(
            "scan service initialized with {} default separators",
            options.defaults.separators().len()
        );
        Self {
            options,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// The separator template new sessions start from.
    #[must_use]
    pub fn defaults(&self) -> &ServiceDefaults {
        &self.options.defaults
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no session is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots ever allocated, open or free.
    #[must_use]
    pub fn allocated_slots(&self) -> usize {
        self.slots.len()
    }

    /// Opens a session seeded with the default separators.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceExhausted`] when `max_sessions` sessions
    /// are already open or storage for the session cannot be obtained.
    pub fn open(&mut self) -> Result<SessionId, ScanError> {
        if self.options.max_sessions.is_some_and(|max| self.live >= max) {
            warn!("session limit {:?} reached", self.options.max_sessions);
            return Err(ScanError::ResourceExhausted {
                requested: self.live + 1,
            });
        }

        let session = Session::new(&self.options)?;
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len()).map_err(|_| {
                    ScanError::ResourceExhausted {
                        requested: self.slots.len() + 1,
                    }
                })?;
                self.slots
                    .try_reserve(1)
                    .map_err(|_| ScanError::ResourceExhausted {
                        requested: self.slots.len() + 1,
                    })?;
                self.slots.push(Slot::default());
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.session = Some(session);
        self.live += 1;
        let id = SessionId {
            index,
            generation: slot.generation,
        };
        debug!("opened session {id}");
        Ok(id)
    }

    /// Closes a session, releasing its buffer and separators.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn close(&mut self, id: SessionId) -> Result<(), ScanError> {
        let slot = self.slot_mut(id)?;
        slot.session = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        debug!("closed session {id}");
        Ok(())
    }

    /// Looks up an open session.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn session(&self, id: SessionId) -> Result<&Session, ScanError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.session.as_ref())
            .ok_or_else(|| unknown(id))
    }

    /// Looks up an open session for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn session_mut(&mut self, id: SessionId) -> Result<&mut Session, ScanError> {
        self.slot_mut(id)?
            .session
            .as_mut()
            .ok_or_else(|| unknown(id))
    }

    fn slot_mut(&mut self, id: SessionId) -> Result<&mut Slot, ScanError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.session.is_some())
            .ok_or_else(|| unknown(id))
    }

    /// Puts a session into configuration mode; see [`Session::configure`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn configure(&mut self, id: SessionId) -> Result<(), ScanError> {
        self.session_mut(id)?.configure();
        Ok(())
    }

    /// Dispatches a raw control request; see [`Session::control`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] or [`ScanError::InvalidRequest`].
    pub fn control(&mut self, id: SessionId, code: u32) -> Result<(), ScanError> {
        self.session_mut(id)?.control(code)
    }

    /// Writes separators or scan data; see [`Session::write`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] or
    /// [`ScanError::ResourceExhausted`].
    pub fn write(&mut self, id: SessionId, bytes: &[u8]) -> Result<usize, ScanError> {
        self.session_mut(id)?.write(bytes)
    }

    /// Reads from a session; see [`Session::read`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn read(&mut self, id: SessionId, capacity: usize) -> Result<ReadOutcome<'_>, ScanError> {
        Ok(self.session_mut(id)?.read(capacity))
    }

    /// Copies the next chunk into `dst`; see [`Session::read_into`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] if `id` is not open.
    pub fn read_into(&mut self, id: SessionId, dst: &mut [u8]) -> Result<ReadStatus, ScanError> {
        Ok(self.session_mut(id)?.read_into(dst))
    }

    /// Moves the next chunk through `sink`; see [`Session::read_with`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownSession`] or [`ScanError::Transport`].
    pub fn read_with<S>(
        &mut self,
        id: SessionId,
        capacity: usize,
        sink: &mut S,
    ) -> Result<ReadStatus, ScanError>
    where
        S: ChunkSink + ?Sized,
    {
        self.session_mut(id)?.read_with(capacity, sink)
    }
}

impl Default for ScanService {
    fn default() -> Self {
        Self::new(ServiceOptions::default())
    }
}

fn unknown(id: SessionId) -> ScanError {
    warn!("no open session {id}");
    ScanError::UnknownSession(id)
}
