//! Shared configuration and the per-frame driver of both pipelines.

pub use self::config::{
    ViewConfig, MAX_DOWNSAMPLE, MAX_MAX_DISTANCE, MIN_DOWNSAMPLE, MIN_MAX_DISTANCE,
};
pub use self::coordinator::{FrameReport, ViewCoordinator};

mod config;
mod coordinator;
