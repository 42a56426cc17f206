//! Sensor session, frames and coordinate mapping.

pub use crate::sensor::body::{Body, BodyFrame, Joint, JointType, TrackingState};
pub use crate::sensor::device::{CoordinateMapper, SensorDevice};
pub use crate::sensor::frame::{
    BodyIndexFrame, ColorFrame, ColorImageFormat, DepthFrame, FrameDescription, FrameSet,
    BODY_INDEX_NOT_TRACKED, BYTES_PER_PIXEL, COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT, DEPTH_WIDTH,
    MM_TO_METERS,
};
pub use crate::sensor::mapper::{Intrinsics, PinholeMapper};
pub use crate::sensor::session::SensorSession;
pub use crate::sensor::simulated::{SimulatedDevice, SimulatedFeed};
pub use crate::sensor::stream::StreamKinds;

use glamx::{Vec2, Vec3};

/// A point in camera space, in meters.
pub type CameraSpacePoint = Vec3;
/// A fractional pixel position in the depth image.
pub type DepthSpacePoint = Vec2;
/// A fractional pixel position in the color image.
pub type ColorSpacePoint = Vec2;

mod body;
mod device;
mod frame;
mod mapper;
mod session;
mod simulated;
mod stream;
