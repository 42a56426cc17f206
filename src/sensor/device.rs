use crate::error::Result;
use crate::sensor::{
    CameraSpacePoint, ColorSpacePoint, DepthSpacePoint, FrameDescription, FrameSet, StreamKinds,
};

/// Conversions between the camera (3D), depth (2D) and color (2D) coordinate spaces.
///
/// Implementations report unmappable points with non-finite coordinates rather than errors.
pub trait CoordinateMapper {
    /// Projects a camera-space point, in meters, onto the depth image.
    fn map_camera_point_to_depth_space(&self, point: CameraSpacePoint) -> DepthSpacePoint;

    /// Maps every pixel of a depth frame to its fractional position in the color image.
    ///
    /// `out` has one entry per depth sample.
    fn map_depth_frame_to_color_space(&self, depth: &[u16], out: &mut [ColorSpacePoint]);
}

/// A tracking device, as implemented by an external sensor binding.
pub trait SensorDevice {
    /// Starts the device. Fails with [`Error::DeviceNotFound`](crate::error::Error::DeviceNotFound)
    /// when no hardware answers.
    fn open(&mut self) -> Result<()>;

    /// Stops the device and drops any frame it still holds.
    fn close(&mut self);

    /// Whether the device is running.
    fn is_open(&self) -> bool;

    /// Enables the given streams.
    fn enable(&mut self, streams: StreamKinds) -> Result<()>;

    /// Resolution of the depth and body-index streams.
    fn depth_description(&self) -> FrameDescription;

    /// Resolution of the color stream.
    fn color_description(&self) -> FrameDescription;

    /// Returns the latest frames of `streams` from one snapshot, without blocking.
    ///
    /// Returns `None` if none of the requested streams has a frame that was not acquired
    /// before. Acquisition consumes the returned frames.
    fn acquire_latest(&mut self, streams: StreamKinds) -> Option<FrameSet>;

    /// The device's coordinate mapper.
    fn coordinate_mapper(&self) -> &dyn CoordinateMapper;
}
