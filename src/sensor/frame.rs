//! Frame buffers surfaced by a sensor session.

use crate::error::{Error, Result};
use crate::sensor::body::BodyFrame;
use crate::sensor::StreamKinds;

/// Native depth (and body-index) width of the reference sensor.
pub const DEPTH_WIDTH: usize = 512;
/// Native depth (and body-index) height of the reference sensor.
pub const DEPTH_HEIGHT: usize = 424;
/// Native color width of the reference sensor.
pub const COLOR_WIDTH: usize = 1920;
/// Native color height of the reference sensor.
pub const COLOR_HEIGHT: usize = 1080;
/// Bytes per color pixel, in both the native and the converted layouts.
pub const BYTES_PER_PIXEL: usize = 4;
/// Body-index value of a pixel that belongs to no tracked body.
pub const BODY_INDEX_NOT_TRACKED: u8 = 255;
/// Depth samples are millimeters.
pub const MM_TO_METERS: f32 = 0.001;

/// Resolution of one sensor stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameDescription {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl FrameDescription {
    /// The depth/body-index resolution of the reference sensor.
    pub const DEPTH: FrameDescription = FrameDescription::new(DEPTH_WIDTH, DEPTH_HEIGHT);
    /// The color resolution of the reference sensor.
    pub const COLOR: FrameDescription = FrameDescription::new(COLOR_WIDTH, COLOR_HEIGHT);

    /// Creates a new frame description.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels of one frame.
    #[inline]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether this description covers zero pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_len(stream: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::FrameSize {
            stream,
            expected,
            actual,
        })
    }
}

/// A grid of distance samples in millimeters; `0` means "no return".
#[derive(Clone, Debug, PartialEq)]
pub struct DepthFrame {
    description: FrameDescription,
    data: Vec<u16>,
}

impl DepthFrame {
    /// Wraps row-major depth samples, checking them against `description`.
    pub fn new(description: FrameDescription, data: Vec<u16>) -> Result<Self> {
        check_len("depth", description.len(), data.len())?;
        Ok(Self { description, data })
    }

    /// The resolution of this frame.
    #[inline]
    pub fn description(&self) -> FrameDescription {
        self.description
    }

    /// Row-major depth samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// The sample at pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.description.width + x]
    }
}

/// Per-pixel body segmentation aligned with the depth frame of the same snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyIndexFrame {
    description: FrameDescription,
    data: Vec<u8>,
}

impl BodyIndexFrame {
    /// Wraps row-major body-index values, checking them against `description`.
    pub fn new(description: FrameDescription, data: Vec<u8>) -> Result<Self> {
        check_len("body-index", description.len(), data.len())?;
        Ok(Self { description, data })
    }

    /// The resolution of this frame.
    #[inline]
    pub fn description(&self) -> FrameDescription {
        self.description
    }

    /// Row-major body-index values.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the pixel at `index` belongs to a tracked body.
    #[inline]
    pub fn is_tracked(&self, index: usize) -> bool {
        self.data[index] != BODY_INDEX_NOT_TRACKED
    }
}

/// Pixel layouts a color frame may arrive in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorImageFormat {
    /// Blue, green, red, alpha. The native layout of the reference sensor.
    Bgra,
    /// Red, green, blue, alpha. The layout expected by renderers.
    Rgba,
}

/// A color image in a device-native layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    description: FrameDescription,
    format: ColorImageFormat,
    data: Vec<u8>,
}

impl ColorFrame {
    /// Wraps raw 4-bytes-per-pixel color data, checking it against `description`.
    pub fn new(description: FrameDescription, format: ColorImageFormat, data: Vec<u8>) -> Result<Self> {
        check_len("color", description.len() * BYTES_PER_PIXEL, data.len())?;
        Ok(Self {
            description,
            format,
            data,
        })
    }

    /// The resolution of this frame.
    #[inline]
    pub fn description(&self) -> FrameDescription {
        self.description
    }

    /// The layout of [`Self::raw_data`].
    #[inline]
    pub fn format(&self) -> ColorImageFormat {
        self.format
    }

    /// The raw pixel bytes, in [`Self::format`] layout.
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Writes this frame into `out` as RGBA.
    ///
    /// BGRA input is converted with a per-pixel channel swap; RGBA input is copied.
    pub fn copy_converted_to_rgba(&self, out: &mut [u8]) -> Result<()> {
        check_len("color", self.data.len(), out.len())?;

        match self.format {
            ColorImageFormat::Rgba => out.copy_from_slice(&self.data),
            ColorImageFormat::Bgra => {
                let src: &[[u8; 4]] = bytemuck::cast_slice(&self.data);
                let dst: &mut [[u8; 4]] = bytemuck::cast_slice_mut(out);
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = [s[2], s[1], s[0], s[3]];
                }
            }
        }

        Ok(())
    }
}

/// The frames of one device snapshot.
///
/// A stream that had no new frame available is `None`. Frames of the same set always
/// originate from the same snapshot, so depth and body-index never mix across ticks.
#[derive(Clone, Debug, Default)]
pub struct FrameSet {
    /// Latest depth frame, if any.
    pub depth: Option<DepthFrame>,
    /// Latest color frame, if any.
    pub color: Option<ColorFrame>,
    /// Latest body-index frame, if any.
    pub body_index: Option<BodyIndexFrame>,
    /// Latest skeletal-body frame, if any.
    pub bodies: Option<BodyFrame>,
}

impl FrameSet {
    /// The streams that have a frame in this set.
    pub fn streams(&self) -> StreamKinds {
        let mut streams = StreamKinds::empty();
        streams.set(StreamKinds::DEPTH, self.depth.is_some());
        streams.set(StreamKinds::COLOR, self.color.is_some());
        streams.set(StreamKinds::BODY_INDEX, self.body_index.is_some());
        streams.set(StreamKinds::BODY, self.bodies.is_some());
        streams
    }

    /// Whether no stream has a frame.
    pub fn is_empty(&self) -> bool {
        self.streams().is_empty()
    }

    /// Moves the frames of `streams` out of this set, leaving the others in place.
    pub fn take(&mut self, streams: StreamKinds) -> FrameSet {
        FrameSet {
            depth: take_if(&mut self.depth, streams.contains(StreamKinds::DEPTH)),
            color: take_if(&mut self.color, streams.contains(StreamKinds::COLOR)),
            body_index: take_if(&mut self.body_index, streams.contains(StreamKinds::BODY_INDEX)),
            bodies: take_if(&mut self.bodies, streams.contains(StreamKinds::BODY)),
        }
    }
}

fn take_if<T>(slot: &mut Option<T>, cond: bool) -> Option<T> {
    if cond {
        slot.take()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffers() {
        let desc = FrameDescription::new(4, 2);
        assert!(DepthFrame::new(desc, vec![0; 8]).is_ok());
        assert!(matches!(
            DepthFrame::new(desc, vec![0; 7]),
            Err(Error::FrameSize {
                stream: "depth",
                expected: 8,
                actual: 7
            })
        ));
        assert!(BodyIndexFrame::new(desc, vec![0; 9]).is_err());
        assert!(ColorFrame::new(desc, ColorImageFormat::Bgra, vec![0; 8]).is_err());
    }

    #[test]
    fn bgra_is_swapped_to_rgba() {
        let desc = FrameDescription::new(2, 1);
        let frame = ColorFrame::new(desc, ColorImageFormat::Bgra, vec![1, 2, 3, 4, 10, 20, 30, 40]).unwrap();
        let mut out = vec![0; 8];
        frame.copy_converted_to_rgba(&mut out).unwrap();
        assert_eq!(out, vec![3, 2, 1, 4, 30, 20, 10, 40]);
    }

    #[test]
    fn rgba_is_copied() {
        let desc = FrameDescription::new(1, 1);
        let frame = ColorFrame::new(desc, ColorImageFormat::Rgba, vec![1, 2, 3, 4]).unwrap();
        let mut out = vec![0; 4];
        frame.copy_converted_to_rgba(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4]);
        assert!(frame.copy_converted_to_rgba(&mut [0; 3]).is_err());
    }

    #[test]
    fn take_moves_only_requested_streams() {
        let desc = FrameDescription::new(1, 1);
        let mut set = FrameSet {
            depth: Some(DepthFrame::new(desc, vec![1]).unwrap()),
            body_index: Some(BodyIndexFrame::new(desc, vec![0]).unwrap()),
            bodies: Some(BodyFrame::default()),
            ..FrameSet::default()
        };
        let taken = set.take(StreamKinds::CUTOUT);
        assert_eq!(taken.streams(), StreamKinds::DEPTH | StreamKinds::BODY_INDEX);
        assert_eq!(set.streams(), StreamKinds::BODY);
    }

    #[test]
    fn body_index_sentinel() {
        let frame = BodyIndexFrame::new(FrameDescription::new(2, 1), vec![BODY_INDEX_NOT_TRACKED, 3]).unwrap();
        assert!(!frame.is_tracked(0));
        assert!(frame.is_tracked(1));
    }
}
