use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::error::ScanError;

/// Copies `bytes` into fresh storage, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Vec<u8>, ScanError> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(bytes.len())
        .map_err(|_| ScanError::ResourceExhausted {
            requested: bytes.len(),
        })?;
    owned.extend_from_slice(bytes);
    Ok(owned)
}

/// The bytes a session is currently tokenizing.
///
/// A scan buffer is never appended to. Each data write builds a new one and
/// the session drops the old one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ScanBuffer {
    bytes: Vec<u8>,
}

impl ScanBuffer {
    /// Copies `bytes` into a new scan buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ResourceExhausted`] if the copy cannot be stored.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, ScanError> {
        Ok(Self {
            bytes: try_copy(bytes)?,
        })
    }

    /// The raw contents; may contain NUL.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ScanBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScanBuffer")
            .field(&BStr::new(&self.bytes))
            .finish()
    }
}
