use crate::error::{Error, Result};
use crate::sensor::{CoordinateMapper, FrameDescription, FrameSet, SensorDevice, StreamKinds};

/// Owns a tracking device for the lifetime of an installation run.
///
/// Both pipelines borrow the session once per tick: frame acquisition never blocks, and
/// a stream without a new frame simply yields nothing. The device is closed when the
/// session is closed or dropped, whichever comes first.
pub struct SensorSession {
    device: Box<dyn SensorDevice>,
    enabled: StreamKinds,
}

impl SensorSession {
    /// Enables `streams` on `device` and opens it if it is not running yet.
    pub fn open(mut device: Box<dyn SensorDevice>, streams: StreamKinds) -> Result<Self> {
        device.enable(streams)?;

        if !device.is_open() {
            device.open()?;
        }

        let depth = device.depth_description();
        let color = device.color_description();
        log::info!(
            "Sensor session opened: streams {:?}, depth {}x{}, color {}x{}",
            streams,
            depth.width,
            depth.height,
            color.width,
            color.height
        );

        Ok(Self {
            device,
            enabled: streams,
        })
    }

    /// Whether the underlying device is running.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.device.is_open()
    }

    /// The streams enabled at creation.
    #[inline]
    pub fn enabled_streams(&self) -> StreamKinds {
        self.enabled
    }

    /// Fails unless every stream of `streams` was enabled on this session.
    pub fn require(&self, streams: StreamKinds) -> Result<()> {
        if !self.is_open() {
            return Err(Error::SessionClosed);
        }

        let missing = streams.difference(self.enabled);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::StreamNotEnabled(missing))
        }
    }

    /// Resolution of the depth and body-index streams.
    #[inline]
    pub fn depth_description(&self) -> FrameDescription {
        self.device.depth_description()
    }

    /// Resolution of the color stream.
    #[inline]
    pub fn color_description(&self) -> FrameDescription {
        self.device.color_description()
    }

    /// The latest frames of `streams` from a single device snapshot.
    ///
    /// Streams that were not enabled are never returned. Returns `None` when the session
    /// is closed or when no requested stream has a new frame.
    pub fn acquire_latest(&mut self, streams: StreamKinds) -> Option<FrameSet> {
        if !self.device.is_open() {
            return None;
        }

        let streams = streams.intersection(self.enabled);
        if streams.is_empty() {
            return None;
        }

        self.device
            .acquire_latest(streams)
            .filter(|frames| !frames.is_empty())
    }

    /// The device's coordinate mapper.
    #[inline]
    pub fn mapper(&self) -> &dyn CoordinateMapper {
        self.device.coordinate_mapper()
    }

    /// Releases the device. Idempotent.
    pub fn close(&mut self) {
        if self.device.is_open() {
            self.device.close();
            log::info!("Sensor session closed");
        }
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        self.close();
    }
}
