//! Error types of the cutout library.
//!
//! Only session setup, component initialization and configuration loading can fail.
//! A frame that is missing on a given tick is reported through
//! [`TickOutcome`](crate::tick::TickOutcome), never through [`Error`].

use crate::sensor::StreamKinds;
use thiserror::Error;

/// Result type alias for fallible cutout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type of the cutout library.
#[derive(Debug, Error)]
pub enum Error {
    /// No tracking device answered when the session was opened.
    #[error("depth sensor not found")]
    DeviceNotFound,
    /// The session was used after it had been closed.
    #[error("sensor session is closed")]
    SessionClosed,
    /// A stream was requested that the session did not enable.
    #[error("stream(s) {0:?} not enabled on this session")]
    StreamNotEnabled(StreamKinds),
    /// A frame buffer does not match its frame description.
    #[error("{stream} frame holds {actual} elements, expected {expected}")]
    FrameSize {
        /// Name of the offending stream.
        stream: &'static str,
        /// Element count implied by the frame description.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },
    /// A configuration value cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The component was disabled after a failed initialization.
    #[error("component is disabled")]
    Disabled,
    /// Wrapped `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Malformed TOML configuration.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
