use alloc::vec::Vec;

use crate::separators::DEFAULT_SEPARATORS;

/// The separator template copied into every new session.
///
/// Fixed when the [`ScanService`](crate::ScanService) is built. Sessions take
/// their own copy at open, so changing a session's separators never touches
/// the template.
///
/// # Default
///
/// Space, horizontal tab, line feed and colon.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceDefaults {
    separators: Vec<u8>,
}

impl ServiceDefaults {
    /// A template with the given separator bytes. Any byte value, NUL
    /// included, is accepted; an empty template makes new sessions treat
    /// each buffer as one token.
    #[must_use]
    pub fn new(separators: impl Into<Vec<u8>>) -> Self {
        Self {
            separators: separators.into(),
        }
    }

    /// The template's separator bytes.
    #[must_use]
    pub fn separators(&self) -> &[u8] {
        &self.separators
    }
}

impl Default for ServiceDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATORS)
    }
}

/// Configuration for a [`ScanService`](crate::ScanService).
///
/// # Examples
///
/// ```rust
/// use bytescan::{ScanService, ServiceDefaults, ServiceOptions};
///
/// let service = ScanService::new(ServiceOptions {
///     defaults: ServiceDefaults::new(*b"-,"),
///     max_buffer_len: Some(64 * 1024),
///     ..Default::default()
/// });
/// assert_eq!(service.defaults().separators(), b"-,");
/// ```
///
/// # Default
///
/// Stock separators and no limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ServiceOptions {
    /// Separator template for new sessions.
    pub defaults: ServiceDefaults,

    /// Largest write a session accepts, for scan data and separator sets
    /// alike. Larger writes fail with
    /// [`ScanError::ResourceExhausted`](crate::ScanError::ResourceExhausted).
    ///
    /// # Default
    ///
    /// `None` (bounded only by available memory)
    pub max_buffer_len: Option<usize>,

    /// Most sessions that may be open at once.
    ///
    /// # Default
    ///
    /// `None`
    pub max_sessions: Option<usize>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let options: ServiceOptions = serde_json::from_str(r#"{"max_sessions":2}"#).unwrap();
        assert_eq!(options.max_sessions, Some(2));
        assert_eq!(options.max_buffer_len, None);
        assert_eq!(options.defaults.separators(), b" \t\n:");
    }

    #[test]
    fn separators_are_raw_bytes() {
        let options: ServiceOptions =
            serde_json::from_str(r#"{"defaults":{"separators":[0,58]}}"#).unwrap();
        assert_eq!(options.defaults.separators(), b"\0:");
    }
}
