//! Per-tick outcomes of the pipelines.

use std::fmt;

/// Why a pipeline left its previous state untouched this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No new depth frame.
    NoDepthFrame,
    /// No new body-index frame.
    NoBodyIndexFrame,
    /// No new color frame.
    NoColorFrame,
    /// No new skeletal-body frame.
    NoBodyFrame,
    /// A frame did not match the session resolution.
    FrameSize,
    /// The projection surface has no geometry yet.
    NoPlane,
    /// The sensor session is closed.
    SessionClosed,
}

/// The result of one pipeline tick. Skips are expected and never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// The output buffers were refreshed.
    Updated,
    /// The previous output is kept.
    Skipped(SkipReason),
    /// The pipeline is disabled and does nothing.
    Disabled,
}

impl TickOutcome {
    /// Whether the output was refreshed.
    #[inline]
    pub fn is_updated(self) -> bool {
        self == TickOutcome::Updated
    }
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::Updated => f.write_str("updated"),
            TickOutcome::Skipped(reason) => write!(f, "skipped ({:?})", reason),
            TickOutcome::Disabled => f.write_str("disabled"),
        }
    }
}
