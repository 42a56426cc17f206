use crate::cutout::sampling::{alpha, color_uv, sample_index};
use crate::error::Result;
use crate::procedural::GridSize;
use crate::resource::{ColorTexture, CutoutMesh};
use crate::sensor::{
    BodyIndexFrame, ColorSpacePoint, DepthFrame, FrameDescription, SensorSession, StreamKinds,
};
use crate::tick::{SkipReason, TickOutcome};

/// Options of the cutout mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutoutSettings {
    /// Reverses the horizontal sampling direction.
    pub mirror: bool,
    /// Reverses the vertical sampling direction.
    pub flip: bool,
    /// Returns farther than this many meters are hidden.
    pub max_distance: f32,
    /// Shows every return within `max_distance`, ignoring body segmentation.
    pub visualize_capture_distance: bool,
    /// Grid resolution divisor.
    pub downsample: usize,
}

impl Default for CutoutSettings {
    fn default() -> Self {
        Self {
            mirror: false,
            flip: false,
            max_distance: 8.0,
            visualize_capture_distance: false,
            downsample: 1,
        }
    }
}

/// Keeps a grid mesh and a color texture in sync with the depth, body-index and color streams.
///
/// Every updated tick rewrites the alpha and UV of each vertex. Ticks where any of the three
/// streams has no new frame are skipped as a whole, leaving the previous mesh displayed.
pub struct CutoutMeshPipeline {
    settings: CutoutSettings,
    depth_description: FrameDescription,
    color_description: FrameDescription,
    mesh: CutoutMesh,
    texture: ColorTexture,
    color_space: Vec<ColorSpacePoint>,
    enabled: bool,
}

impl CutoutMeshPipeline {
    /// A disabled pipeline. Call [`CutoutMeshPipeline::initialize`] to start it.
    pub fn new(settings: CutoutSettings) -> Self {
        Self {
            settings,
            depth_description: FrameDescription::DEPTH,
            color_description: FrameDescription::COLOR,
            mesh: CutoutMesh::empty(),
            texture: ColorTexture::new(FrameDescription::new(0, 0)),
            color_space: Vec::new(),
            enabled: false,
        }
    }

    /// Allocates the mesh and texture for the session's resolutions and enables the pipeline.
    ///
    /// If the session lacks a cutout stream, the pipeline stays disabled and the error is
    /// returned.
    pub fn initialize(&mut self, session: &SensorSession) -> Result<()> {
        if let Err(e) = session.require(StreamKinds::CUTOUT) {
            log::error!("Cutout pipeline disabled: {}", e);
            self.shutdown();
            return Err(e);
        }

        self.depth_description = session.depth_description();
        self.color_description = session.color_description();
        self.texture = ColorTexture::new(self.color_description);
        self.color_space = vec![ColorSpacePoint::ZERO; self.depth_description.len()];
        self.mesh.rebuild(self.expected_grid());
        self.enabled = true;

        log::info!(
            "Cutout pipeline started with a {}x{} grid",
            self.mesh.grid_size().width,
            self.mesh.grid_size().height
        );
        Ok(())
    }

    /// Whether ticks do anything.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current options.
    #[inline]
    pub fn settings(&self) -> &CutoutSettings {
        &self.settings
    }

    /// Replaces the options. A changed downsample rebuilds the grid immediately.
    pub fn apply_settings(&mut self, settings: CutoutSettings) {
        self.settings = settings;

        if self.enabled {
            let _ = self.ensure_grid_integrity();
        }
    }

    /// The grid size implied by the depth resolution and the downsample factor.
    #[inline]
    pub fn expected_grid(&self) -> GridSize {
        GridSize::for_depth(self.depth_description, self.settings.downsample)
    }

    /// Rebuilds the mesh if any of its buffers disagrees with [`Self::expected_grid`].
    ///
    /// Returns `true` if a rebuild happened.
    pub fn ensure_grid_integrity(&mut self) -> bool {
        let expected = self.expected_grid();
        if self.mesh.is_consistent_with(expected) {
            return false;
        }

        let current = self.mesh.grid_size();
        log::warn!(
            "Rebuilding grid mesh. Current: ({},{}), expected: ({},{})",
            current.width,
            current.height,
            expected.width,
            expected.height
        );
        self.mesh.rebuild(expected);
        true
    }

    /// Refreshes the mesh and texture from the latest frames.
    pub fn tick(&mut self, session: &mut SensorSession) -> TickOutcome {
        if !self.enabled {
            return TickOutcome::Disabled;
        }

        let _ = self.ensure_grid_integrity();

        if !session.is_open() {
            return skip(SkipReason::SessionClosed);
        }

        let Some(mut frames) = session.acquire_latest(StreamKinds::CUTOUT) else {
            return skip(SkipReason::NoDepthFrame);
        };
        let Some(depth) = frames.depth.take() else {
            return skip(SkipReason::NoDepthFrame);
        };
        let Some(body_index) = frames.body_index.take() else {
            return skip(SkipReason::NoBodyIndexFrame);
        };
        let Some(color) = frames.color.take() else {
            return skip(SkipReason::NoColorFrame);
        };

        if depth.description() != self.depth_description
            || body_index.description() != self.depth_description
        {
            log::warn!(
                "Depth frames are {:?}/{:?}, expected {:?}; skipping",
                depth.description(),
                body_index.description(),
                self.depth_description
            );
            return skip(SkipReason::FrameSize);
        }

        if let Err(e) = self.texture.upload(&color) {
            log::warn!("Color upload failed: {}", e);
            return skip(SkipReason::FrameSize);
        }

        session
            .mapper()
            .map_depth_frame_to_color_space(depth.data(), &mut self.color_space);

        self.update_vertices(&depth, &body_index, color.description());
        TickOutcome::Updated
    }

    fn update_vertices(
        &mut self,
        depth: &DepthFrame,
        body_index: &BodyIndexFrame,
        color: FrameDescription,
    ) {
        let settings = self.settings;
        let step = settings.downsample.max(1);
        let grid = self.mesh.grid_size();
        let (uvs, colors) = self.mesh.vertex_attributes_mut();

        for y in 0..grid.height {
            for x in 0..grid.width {
                let vertex = y * grid.width + x;
                let pixel = sample_index(
                    self.depth_description,
                    x * step,
                    y * step,
                    settings.mirror,
                    settings.flip,
                );

                colors[vertex][3] = alpha(
                    depth.data()[pixel],
                    body_index.is_tracked(pixel),
                    settings.max_distance,
                    settings.visualize_capture_distance,
                );
                uvs[vertex] = color_uv(self.color_space[pixel], color);
            }
        }
    }

    /// The grid mesh.
    #[inline]
    pub fn mesh(&self) -> &CutoutMesh {
        &self.mesh
    }

    /// The grid mesh, mutably. Used by renderers to clear dirty flags.
    #[inline]
    pub fn mesh_mut(&mut self) -> &mut CutoutMesh {
        &mut self.mesh
    }

    /// The color texture.
    #[inline]
    pub fn texture(&self) -> &ColorTexture {
        &self.texture
    }

    /// The color texture, mutably. Used by renderers to clear dirty flags.
    #[inline]
    pub fn texture_mut(&mut self) -> &mut ColorTexture {
        &mut self.texture
    }

    /// Frees the mesh and texture and disables the pipeline. Idempotent.
    pub fn shutdown(&mut self) {
        if self.enabled {
            log::info!("Cutout pipeline stopped");
        }

        self.enabled = false;
        self.mesh.release();
        self.texture.release();
        self.color_space = Vec::new();
    }
}

fn skip(reason: SkipReason) -> TickOutcome {
    log::trace!("Cutout tick skipped: {:?}", reason);
    TickOutcome::Skipped(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::IndexFormat;
    use crate::sensor::{
        BodyFrame, ColorFrame, ColorImageFormat, FrameSet, PinholeMapper, SimulatedDevice,
        SimulatedFeed, BODY_INDEX_NOT_TRACKED,
    };
    use glamx::Vec2;

    const DEPTH: FrameDescription = FrameDescription::new(8, 6);
    const COLOR: FrameDescription = FrameDescription::new(4, 2);

    fn small_session(streams: StreamKinds) -> (SensorSession, SimulatedFeed) {
        let (device, feed) = SimulatedDevice::with_descriptions(DEPTH, COLOR, PinholeMapper::default());
        let session = SensorSession::open(Box::new(device), streams).unwrap();
        (session, feed)
    }

    fn started(settings: CutoutSettings) -> (CutoutMeshPipeline, SensorSession, SimulatedFeed) {
        let (session, feed) = small_session(StreamKinds::all());
        let mut pipeline = CutoutMeshPipeline::new(settings);
        pipeline.initialize(&session).unwrap();
        (pipeline, session, feed)
    }

    fn alphas(pipeline: &CutoutMeshPipeline) -> Vec<u8> {
        pipeline.mesh().colors().data().iter().map(|c| c[3]).collect()
    }

    #[test]
    fn initialize_builds_grid() {
        let (pipeline, _session, _feed) = started(CutoutSettings::default());
        assert!(pipeline.is_enabled());
        assert_eq!(pipeline.mesh().grid_size(), GridSize::new(8, 6));
        assert_eq!(pipeline.mesh().index_format(), IndexFormat::Uint16);
        assert_eq!(pipeline.texture().size(), (4, 2));
    }

    #[test]
    fn initialize_without_cutout_streams_disables() {
        let (session, _feed) = small_session(StreamKinds::BODY);
        let mut pipeline = CutoutMeshPipeline::new(CutoutSettings::default());
        assert!(pipeline.initialize(&session).is_err());
        assert!(!pipeline.is_enabled());
        let mut session = session;
        assert_eq!(pipeline.tick(&mut session), TickOutcome::Disabled);
    }

    #[test]
    fn tracked_body_becomes_visible() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        feed.push_uniform(1000, 0, [10, 20, 30, 255]);

        assert_eq!(pipeline.tick(&mut session), TickOutcome::Updated);
        assert!(alphas(&pipeline).iter().all(|a| *a == 255));
        assert_eq!(&pipeline.texture().as_bytes()[..4], &[30, 20, 10, 255]);
    }

    #[test]
    fn missing_stream_keeps_previous_state() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        feed.push_uniform(1000, 0, [0; 4]);
        assert!(pipeline.tick(&mut session).is_updated());
        let writes = pipeline.mesh().colors().writes();

        assert_eq!(
            pipeline.tick(&mut session),
            TickOutcome::Skipped(SkipReason::NoDepthFrame)
        );

        feed.push(FrameSet {
            depth: DepthFrame::new(DEPTH, vec![0; DEPTH.len()]).ok(),
            color: ColorFrame::new(COLOR, ColorImageFormat::Bgra, vec![0; COLOR.len() * 4]).ok(),
            ..FrameSet::default()
        });
        assert_eq!(
            pipeline.tick(&mut session),
            TickOutcome::Skipped(SkipReason::NoBodyIndexFrame)
        );

        feed.push(FrameSet {
            depth: DepthFrame::new(DEPTH, vec![0; DEPTH.len()]).ok(),
            body_index: BodyIndexFrame::new(DEPTH, vec![0; DEPTH.len()]).ok(),
            ..FrameSet::default()
        });
        assert_eq!(
            pipeline.tick(&mut session),
            TickOutcome::Skipped(SkipReason::NoColorFrame)
        );

        assert_eq!(pipeline.mesh().colors().writes(), writes);
        assert!(alphas(&pipeline).iter().all(|a| *a == 255));
    }

    #[test]
    fn body_frames_alone_do_not_update() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        feed.push_bodies(BodyFrame::default());
        assert_eq!(
            pipeline.tick(&mut session),
            TickOutcome::Skipped(SkipReason::NoDepthFrame)
        );
        assert_eq!(feed.pending_streams(), StreamKinds::BODY);
    }

    #[test]
    fn mismatched_frames_are_skipped() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        let other = FrameDescription::new(4, 4);
        feed.push(FrameSet {
            depth: DepthFrame::new(other, vec![1000; other.len()]).ok(),
            body_index: BodyIndexFrame::new(other, vec![0; other.len()]).ok(),
            color: ColorFrame::new(COLOR, ColorImageFormat::Bgra, vec![0; COLOR.len() * 4]).ok(),
            bodies: None,
        });
        assert_eq!(
            pipeline.tick(&mut session),
            TickOutcome::Skipped(SkipReason::FrameSize)
        );
    }

    #[test]
    fn distance_mode_ignores_segmentation() {
        let settings = CutoutSettings {
            visualize_capture_distance: true,
            ..CutoutSettings::default()
        };
        let (mut pipeline, mut session, feed) = started(settings);
        feed.push_uniform(2000, BODY_INDEX_NOT_TRACKED, [0; 4]);
        pipeline.tick(&mut session);
        assert!(alphas(&pipeline).iter().all(|a| *a == 255));

        pipeline.apply_settings(CutoutSettings {
            visualize_capture_distance: false,
            ..settings
        });
        feed.push_uniform(2000, BODY_INDEX_NOT_TRACKED, [0; 4]);
        pipeline.tick(&mut session);
        assert!(alphas(&pipeline).iter().all(|a| *a == 0));
    }

    #[test]
    fn zero_depth_hides_and_invalidates_uv() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        feed.push_uniform(0, 0, [0; 4]);
        pipeline.tick(&mut session);
        assert!(alphas(&pipeline).iter().all(|a| *a == 0));
        assert!(pipeline
            .mesh()
            .uvs()
            .data()
            .iter()
            .all(|uv| *uv == Vec2::splat(-1.0)));
    }

    #[test]
    fn downsample_change_rebuilds() {
        let (mut pipeline, _session, _feed) = started(CutoutSettings::default());
        let version = pipeline.mesh().version();

        pipeline.apply_settings(CutoutSettings {
            downsample: 2,
            ..CutoutSettings::default()
        });
        assert_eq!(pipeline.mesh().grid_size(), GridSize::new(4, 3));
        assert_eq!(pipeline.mesh().version(), version + 1);
        assert!(!pipeline.ensure_grid_integrity());
    }

    #[test]
    fn inconsistent_mesh_is_rebuilt_before_update() {
        let (mut pipeline, mut session, feed) = started(CutoutSettings::default());
        pipeline.mesh_mut().rebuild(GridSize::new(2, 2));

        feed.push_uniform(1000, 0, [0; 4]);
        assert!(pipeline.tick(&mut session).is_updated());
        assert_eq!(pipeline.mesh().grid_size(), GridSize::new(8, 6));
        assert_eq!(pipeline.mesh().vertex_count(), 48);
    }

    #[test]
    fn shutdown_releases_buffers() {
        let (mut pipeline, mut session, _feed) = started(CutoutSettings::default());
        pipeline.shutdown();
        assert!(!pipeline.is_enabled());
        assert_eq!(pipeline.mesh().vertex_count(), 0);
        assert_eq!(pipeline.texture().size(), (0, 0));
        assert_eq!(pipeline.tick(&mut session), TickOutcome::Disabled);
    }
}
