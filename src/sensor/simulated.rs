//! An in-process sensor that serves frames pushed by the host.
//!
//! The device half is handed to a [`SensorSession`](crate::sensor::SensorSession); the
//! [`SimulatedFeed`] half stays with the caller to push snapshots and observe the device
//! lifecycle. Useful for demos, tests, and replaying captured frames through the pipelines.

use crate::error::{Error, Result};
use crate::sensor::{
    BodyFrame, BodyIndexFrame, ColorFrame, ColorImageFormat, CoordinateMapper, DepthFrame,
    FrameDescription, FrameSet, PinholeMapper, SensorDevice, StreamKinds,
};
use std::cell::RefCell;
use std::rc::Rc;

struct State {
    present: bool,
    open: bool,
    enabled: StreamKinds,
    latest: FrameSet,
    open_count: usize,
    close_count: usize,
}

/// The device half of a simulated sensor.
pub struct SimulatedDevice {
    state: Rc<RefCell<State>>,
    depth_description: FrameDescription,
    color_description: FrameDescription,
    mapper: PinholeMapper,
}

/// The host half of a simulated sensor.
#[derive(Clone)]
pub struct SimulatedFeed {
    state: Rc<RefCell<State>>,
    depth_description: FrameDescription,
    color_description: FrameDescription,
}

impl SimulatedDevice {
    /// A simulated reference sensor (512x424 depth, 1920x1080 color).
    pub fn new() -> (SimulatedDevice, SimulatedFeed) {
        Self::with_descriptions(
            FrameDescription::DEPTH,
            FrameDescription::COLOR,
            PinholeMapper::default(),
        )
    }

    /// A simulated sensor with custom resolutions.
    ///
    /// `mapper` is rescaled to `depth_description` and `color_description`, so flat depth
    /// indices resolve to the pixels of the simulated frames.
    pub fn with_descriptions(
        depth_description: FrameDescription,
        color_description: FrameDescription,
        mapper: PinholeMapper,
    ) -> (SimulatedDevice, SimulatedFeed) {
        let state = Rc::new(RefCell::new(State {
            present: true,
            open: false,
            enabled: StreamKinds::empty(),
            latest: FrameSet::default(),
            open_count: 0,
            close_count: 0,
        }));

        let device = SimulatedDevice {
            state: state.clone(),
            depth_description,
            color_description,
            mapper: mapper.with_resolutions(depth_description, color_description),
        };
        let feed = SimulatedFeed {
            state,
            depth_description,
            color_description,
        };

        (device, feed)
    }
}

impl SensorDevice for SimulatedDevice {
    fn open(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.present {
            return Err(Error::DeviceNotFound);
        }

        state.open = true;
        state.open_count += 1;
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.open {
            state.open = false;
            state.close_count += 1;
            state.latest = FrameSet::default();
        }
    }

    fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    fn enable(&mut self, streams: StreamKinds) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.present {
            return Err(Error::DeviceNotFound);
        }

        state.enabled = streams;
        Ok(())
    }

    fn depth_description(&self) -> FrameDescription {
        self.depth_description
    }

    fn color_description(&self) -> FrameDescription {
        self.color_description
    }

    fn acquire_latest(&mut self, streams: StreamKinds) -> Option<FrameSet> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return None;
        }
        let frames = state.latest.take(streams);
        (!frames.is_empty()).then_some(frames)
    }

    fn coordinate_mapper(&self) -> &dyn CoordinateMapper {
        &self.mapper
    }
}

impl SimulatedFeed {
    /// Makes the next `open`/`enable` succeed or fail with [`Error::DeviceNotFound`].
    pub fn set_present(&self, present: bool) {
        self.state.borrow_mut().present = present;
    }

    /// Publishes a snapshot.
    ///
    /// If the snapshot carries any of the depth, body-index or color streams, all three
    /// slots are replaced together, so unconsumed frames of an older snapshot are never
    /// paired with newer ones. The body slot is replaced only when the snapshot carries it.
    pub fn push(&self, mut frames: FrameSet) {
        let mut state = self.state.borrow_mut();

        if frames.streams().intersects(StreamKinds::CUTOUT) {
            state.latest.depth = frames.depth.take();
            state.latest.body_index = frames.body_index.take();
            state.latest.color = frames.color.take();
        }

        if let Some(bodies) = frames.bodies.take() {
            state.latest.bodies = Some(bodies);
        }
    }

    /// Publishes full-resolution cutout frames where every pixel has the same depth and
    /// body-index, with a uniform BGRA color image.
    pub fn push_uniform(&self, depth_mm: u16, body_index: u8, bgra: [u8; 4]) {
        let depth_len = self.depth_description.len();
        let color_len = self.color_description.len();

        let frames = FrameSet {
            depth: DepthFrame::new(self.depth_description, vec![depth_mm; depth_len]).ok(),
            body_index: BodyIndexFrame::new(self.depth_description, vec![body_index; depth_len]).ok(),
            color: ColorFrame::new(
                self.color_description,
                ColorImageFormat::Bgra,
                bgra.repeat(color_len),
            )
            .ok(),
            bodies: None,
        };

        self.push(frames);
    }

    /// Publishes a skeletal snapshot.
    pub fn push_bodies(&self, bodies: BodyFrame) {
        self.push(FrameSet {
            bodies: Some(bodies),
            ..FrameSet::default()
        });
    }

    /// The streams with an unconsumed frame.
    pub fn pending_streams(&self) -> StreamKinds {
        self.state.borrow().latest.streams()
    }

    /// The streams last enabled on the device.
    pub fn enabled_streams(&self) -> StreamKinds {
        self.state.borrow().enabled
    }

    /// Whether the device is running.
    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// Number of successful `open` calls.
    pub fn open_count(&self) -> usize {
        self.state.borrow().open_count
    }

    /// Number of `close` calls that stopped a running device.
    pub fn close_count(&self) -> usize {
        self.state.borrow().close_count
    }

    /// Resolution of the depth and body-index streams.
    pub fn depth_description(&self) -> FrameDescription {
        self.depth_description
    }

    /// Resolution of the color stream.
    pub fn color_description(&self) -> FrameDescription {
        self.color_description
    }
}
