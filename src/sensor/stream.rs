//! Sensor stream selection.

bitflags::bitflags! {
    /// A set of sensor streams, used both to enable streams on a session and to request
    /// frames from it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StreamKinds: u32 {
        /// Per-pixel distance samples, in millimeters.
        const DEPTH = 1 << 0;
        /// Device-native color image.
        const COLOR = 1 << 1;
        /// Per-pixel body segmentation, aligned with depth.
        const BODY_INDEX = 1 << 2;
        /// Tracked skeletal bodies.
        const BODY = 1 << 3;

        /// The streams consumed by the cutout mesh.
        const CUTOUT = Self::DEPTH.bits() | Self::COLOR.bits() | Self::BODY_INDEX.bits();
    }
}

impl Default for StreamKinds {
    fn default() -> Self {
        StreamKinds::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutout_set_excludes_bodies() {
        assert!(StreamKinds::CUTOUT.contains(StreamKinds::DEPTH | StreamKinds::BODY_INDEX));
        assert!(StreamKinds::CUTOUT.contains(StreamKinds::COLOR));
        assert!(!StreamKinds::CUTOUT.contains(StreamKinds::BODY));
        assert_eq!(StreamKinds::default(), StreamKinds::CUTOUT | StreamKinds::BODY);
    }
}
