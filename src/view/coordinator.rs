use crate::cutout::CutoutMeshPipeline;
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::scene::{Surface, UnitQuad};
use crate::sensor::{SensorDevice, SensorSession, StreamKinds};
use crate::skeleton::SkeletonPlaneMapper;
use crate::tick::TickOutcome;
use crate::view::ViewConfig;
use glamx::Mat4;
use std::collections::VecDeque;
use std::fmt;

/// What both pipelines did during one [`ViewCoordinator::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// 1 for the first tick.
    pub tick: u64,
    /// Outcome of the cutout mesh.
    pub cutout: TickOutcome,
    /// Outcome of the skeleton overlay.
    pub skeleton: TickOutcome,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: cutout {}, skeleton {}",
            self.tick, self.cutout, self.skeleton
        )
    }
}

/// Owns the sensor session and drives both pipelines with one shared configuration.
///
/// The host calls [`ViewCoordinator::tick`] once per frame, then
/// [`ViewCoordinator::present`]. Configuration changes either go through
/// [`ViewCoordinator::apply`], which reaches both pipelines in the same call, or through
/// [`ViewCoordinator::request`], which defers them to the start of the next tick.
///
/// The skeleton is projected onto the cutout mesh while the cutout pipeline runs, and onto a
/// [`UnitQuad`] of the same extent otherwise.
pub struct ViewCoordinator {
    session: Option<SensorSession>,
    cutout: CutoutMeshPipeline,
    skeleton: SkeletonPlaneMapper,
    fallback_plane: UnitQuad,
    config: ViewConfig,
    pending: VecDeque<ViewConfig>,
    ticks: u64,
}

impl ViewCoordinator {
    /// Starts both pipelines on `session`.
    ///
    /// If the session could not be opened, or a pipeline fails to start, the error is
    /// logged and the affected pipelines stay disabled. The coordinator itself always works.
    pub fn new(session: Result<SensorSession>, config: ViewConfig) -> Self {
        let config = config.validated();
        let mut cutout = CutoutMeshPipeline::new(config.cutout_settings());
        let mut skeleton = SkeletonPlaneMapper::new(config.skeleton_settings());

        let session = match session {
            Ok(session) => {
                // Each pipeline logs its own failure and stays disabled.
                let _ = cutout.initialize(&session);
                let _ = skeleton.initialize(&session, config.bone_material.as_ref());
                Some(session)
            }
            Err(e) => {
                log::error!("Sensor unavailable, view disabled: {}", e);
                None
            }
        };

        Self {
            session,
            cutout,
            skeleton,
            fallback_plane: UnitQuad::new(),
            config,
            pending: VecDeque::new(),
            ticks: 0,
        }
    }

    /// Opens `device` with every stream enabled and starts both pipelines on it.
    pub fn open(device: Box<dyn SensorDevice>, config: ViewConfig) -> Self {
        Self::new(SensorSession::open(device, StreamKinds::all()), config)
    }

    /// Whether the session is open and at least one pipeline is enabled.
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_open())
            && (self.cutout.is_enabled() || self.skeleton.is_enabled())
    }

    /// The configuration currently applied.
    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Validates `config` and applies it to both pipelines now.
    pub fn apply(&mut self, config: ViewConfig) {
        let config = config.validated();

        self.cutout.apply_settings(config.cutout_settings());
        self.skeleton
            .apply_settings(config.skeleton_settings(), config.bone_material.as_ref());

        log::info!(
            "View configuration applied: mirror {}, flip {}, max distance {}, downsample {}",
            config.mirror,
            config.flip,
            config.max_distance,
            config.downsample
        );
        self.config = config;
    }

    /// Queues `config` for the start of the next tick. Only the latest request is applied.
    pub fn request(&mut self, config: ViewConfig) {
        self.pending.push_back(config);
    }

    /// Number of queued configurations.
    #[inline]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Sets the display plane's local-to-world transform, used for joint positions.
    pub fn set_plane_transform(&mut self, local_to_world: Mat4) {
        self.skeleton.set_plane_transform(local_to_world);
    }

    /// Runs one frame: drains the configuration queue, then ticks the cutout mesh and the
    /// skeleton overlay, in that order.
    pub fn tick(&mut self) -> FrameReport {
        self.ticks += 1;

        if let Some(config) = self.pending.drain(..).last() {
            self.apply(config);
        }

        let (cutout, skeleton) = match self.session.as_mut() {
            Some(session) => {
                let cutout = self.cutout.tick(session);
                let surface: &dyn Surface = if self.cutout.is_enabled() {
                    self.cutout.mesh()
                } else {
                    &self.fallback_plane
                };
                let skeleton = self.skeleton.tick(session, surface);
                (cutout, skeleton)
            }
            None => (TickOutcome::Disabled, TickOutcome::Disabled),
        };

        let report = FrameReport {
            tick: self.ticks,
            cutout,
            skeleton,
        };
        log::trace!("{}", report);
        report
    }

    /// Hands the current output to `renderer`, then marks it uploaded.
    pub fn present(&mut self, renderer: &mut dyn Renderer) {
        renderer.update_cutout(self.cutout.mesh(), self.cutout.texture());
        renderer.update_skeleton(self.skeleton.material(), self.skeleton.bodies());

        self.cutout.mesh_mut().clear_dirty();
        self.cutout.texture_mut().clear_dirty();
    }

    /// The cutout mesh pipeline.
    #[inline]
    pub fn cutout(&self) -> &CutoutMeshPipeline {
        &self.cutout
    }

    /// The skeleton overlay.
    #[inline]
    pub fn skeleton(&self) -> &SkeletonPlaneMapper {
        &self.skeleton
    }

    /// The sensor session, unless it failed to open or was shut down.
    pub fn session(&self) -> Result<&SensorSession> {
        self.session.as_ref().ok_or(Error::Disabled)
    }

    /// Stops both pipelines and closes the session. Idempotent.
    pub fn shutdown(&mut self) {
        self.cutout.shutdown();
        self.skeleton.shutdown();
        self.pending.clear();

        if let Some(mut session) = self.session.take() {
            session.close();
        }
    }
}

impl Drop for ViewCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
