use crate::error::Result;
use crate::scene::{PlaneCache, PlaneGeometry, PlaneTransform, Surface};
use crate::sensor::{
    Body, BodyFrame, CoordinateMapper, FrameDescription, Joint, JointType, SensorSession,
    StreamKinds,
};
use crate::skeleton::projection::{is_valid_depth_point, is_within_distance, plane_local_position};
use crate::skeleton::style::{tracking_color, BoneMaterial, BoneStyle};
use crate::skeleton::topology;
use crate::skeleton::visual::{BodyVisualMap, BodyVisuals, InteractionProxy};
use crate::tick::{SkipReason, TickOutcome};
use glamx::{Mat4, Vec2, Vec3};

/// Options of the skeleton overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonSettings {
    /// Reverses the horizontal projection direction.
    pub mirror: bool,
    /// Reverses the vertical projection direction.
    pub flip: bool,
    /// Joints farther than this many meters are hidden.
    pub max_distance: f32,
    /// Global show/hide of markers and bones.
    pub bones_visible: bool,
    /// Marker scale.
    pub joint_base_size: f32,
    /// Bone line width.
    pub line_base_width: f32,
    /// Added to every plane-local joint position.
    pub bone_pos_offset: Vec2,
}

impl Default for SkeletonSettings {
    fn default() -> Self {
        Self {
            mirror: false,
            flip: false,
            max_distance: 8.0,
            bones_visible: true,
            joint_base_size: 0.3,
            line_base_width: 0.05,
            bone_pos_offset: Vec2::ZERO,
        }
    }
}

/// Projects tracked skeletons onto the display plane.
///
/// One [`BodyVisuals`] set is kept per tracked body id. Sets are created the tick their id
/// shows up tracked and removed the tick it disappears.
pub struct SkeletonPlaneMapper {
    settings: SkeletonSettings,
    depth_description: FrameDescription,
    material: BoneMaterial,
    applied_style: BoneStyle,
    plane: PlaneCache,
    transform: PlaneTransform,
    bodies: BodyVisualMap,
    next_generation: u64,
    style_writes: usize,
    enabled: bool,
}

impl SkeletonPlaneMapper {
    /// A disabled mapper. Call [`SkeletonPlaneMapper::initialize`] to start it.
    pub fn new(settings: SkeletonSettings) -> Self {
        let material = BoneMaterial::instantiate(None);
        let applied_style = style_of(&settings, &material);

        Self {
            settings,
            depth_description: FrameDescription::DEPTH,
            material,
            applied_style,
            plane: PlaneCache::new(),
            transform: PlaneTransform::default(),
            bodies: BodyVisualMap::new(),
            next_generation: 0,
            style_writes: 0,
            enabled: false,
        }
    }

    /// Reads the depth resolution, instantiates the bone material and enables the mapper.
    ///
    /// If the session lacks the body stream, the mapper stays disabled and the error is
    /// returned.
    pub fn initialize(
        &mut self,
        session: &SensorSession,
        material: Option<&BoneMaterial>,
    ) -> Result<()> {
        if let Err(e) = session.require(StreamKinds::BODY) {
            log::error!("Skeleton mapper disabled: {}", e);
            self.shutdown();
            return Err(e);
        }

        self.depth_description = session.depth_description();
        self.material = BoneMaterial::instantiate(material);
        self.applied_style = self.current_style();
        self.plane.invalidate();
        self.enabled = true;

        log::info!("Skeleton mapper started with material {:?}", self.material.name);
        Ok(())
    }

    /// Whether ticks do anything.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current options.
    #[inline]
    pub fn settings(&self) -> &SkeletonSettings {
        &self.settings
    }

    /// Replaces the options. A `material` template replaces the session material.
    ///
    /// Styling changes are pushed to existing visuals right away.
    pub fn apply_settings(&mut self, settings: SkeletonSettings, material: Option<&BoneMaterial>) {
        self.settings = settings;

        if material.is_some() {
            self.material = BoneMaterial::instantiate(material);
        }

        self.apply_style_if_changed();
    }

    /// Sets the plane's local-to-world transform.
    pub fn set_plane_transform(&mut self, local_to_world: Mat4) {
        self.transform = PlaneTransform::new(local_to_world);
    }

    /// The cached plane geometry.
    #[inline]
    pub fn plane(&self) -> &PlaneCache {
        &self.plane
    }

    fn current_style(&self) -> BoneStyle {
        style_of(&self.settings, &self.material)
    }

    /// Pushes styling to every visual if it changed since it was last pushed.
    ///
    /// Returns `true` if anything was written.
    pub fn apply_style_if_changed(&mut self) -> bool {
        let style = self.current_style();
        let changes = style.changes_from(&self.applied_style);
        if changes.is_empty() {
            return false;
        }

        for body in self.bodies.values_mut() {
            for visual in body.joints.iter_mut() {
                visual.apply_style(&style, changes);
                self.style_writes += 1;
            }
        }

        log::debug!("Bone style changed: {:?}", changes);
        self.applied_style = style;
        true
    }

    /// Number of joint visuals written by style propagation.
    #[inline]
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    /// Refreshes the visuals from the latest body frame, projecting onto `surface`.
    pub fn tick(&mut self, session: &mut SensorSession, surface: &dyn Surface) -> TickOutcome {
        if !self.enabled {
            return TickOutcome::Disabled;
        }

        let Some(plane) = self.plane.refresh(surface) else {
            return skip(SkipReason::NoPlane);
        };

        let _ = self.apply_style_if_changed();

        if !session.is_open() {
            return skip(SkipReason::SessionClosed);
        }

        let Some(frame) = session
            .acquire_latest(StreamKinds::BODY)
            .and_then(|frames| frames.bodies)
        else {
            return skip(SkipReason::NoBodyFrame);
        };

        self.reconcile(&frame);

        for body in frame.tracked() {
            self.refresh_body(body, session.mapper(), &plane);
        }

        TickOutcome::Updated
    }

    fn reconcile(&mut self, frame: &BodyFrame) {
        let tracked = frame.tracked_ids();

        self.bodies.retain(|id, _| {
            let keep = tracked.contains(id);
            if !keep {
                log::debug!("Body {} lost", id);
            }
            keep
        });

        let style = self.current_style();
        let generation = &mut self.next_generation;
        for body in frame.tracked() {
            self.bodies.entry(body.tracking_id).or_insert_with(|| {
                *generation += 1;
                log::debug!("Body {} tracked", body.tracking_id);
                BodyVisuals::new(body.tracking_id, *generation, &style)
            });
        }
    }

    fn project(
        &self,
        joint: &Joint,
        mapper: &dyn CoordinateMapper,
        plane: &PlaneGeometry,
    ) -> Option<Vec3> {
        let point = mapper.map_camera_point_to_depth_space(joint.position);
        if !is_valid_depth_point(point, self.depth_description)
            || !is_within_distance(joint.position.z, self.settings.max_distance)
        {
            return None;
        }

        let local = plane_local_position(
            point,
            self.depth_description,
            plane,
            self.settings.mirror,
            self.settings.flip,
            self.settings.bone_pos_offset,
        );
        Some(self.transform.transform_point(local))
    }

    fn refresh_body(&mut self, body: &Body, mapper: &dyn CoordinateMapper, plane: &PlaneGeometry) {
        let projected = JointType::ALL.map(|jt| self.project(body.joint(jt), mapper, plane));
        let visible = self.settings.bones_visible;

        let Some(visuals) = self.bodies.get_mut(&body.tracking_id) else {
            return;
        };

        for jt in JointType::ALL {
            let visual = &mut visuals.joints[jt.index()];

            let Some(position) = projected[jt.index()] else {
                visual.hide();
                continue;
            };

            visual.position = position;
            visual.in_range = true;
            visual.marker_visible = visible;
            visual.proxy_enabled = true;

            let end = topology::parent(jt).and_then(|p| projected[p.index()].map(|end| (p, end)));
            match end {
                Some((parent, end)) => {
                    visual.bone.start = position;
                    visual.bone.end = end;
                    visual.bone.start_color = tracking_color(body.joint(jt).tracking_state);
                    visual.bone.end_color = tracking_color(body.joint(parent).tracking_state);
                    visual.bone.connected = true;
                    visual.bone.visible = visible;
                }
                None => {
                    visual.bone.connected = false;
                    visual.bone.visible = false;
                }
            }
        }
    }

    /// The visual sets, keyed by tracking id.
    #[inline]
    pub fn bodies(&self) -> &BodyVisualMap {
        &self.bodies
    }

    /// The visual set of body `tracking_id`.
    #[inline]
    pub fn body(&self, tracking_id: u64) -> Option<&BodyVisuals> {
        self.bodies.get(&tracking_id)
    }

    /// The session instance of the bone material.
    #[inline]
    pub fn material(&self) -> &BoneMaterial {
        &self.material
    }

    /// Every enabled interaction proxy.
    pub fn interaction_proxies(&self) -> Vec<InteractionProxy> {
        self.bodies
            .values()
            .flat_map(|body| {
                body.joints
                    .iter()
                    .filter(|v| v.proxy_enabled && v.in_range)
                    .map(move |v| InteractionProxy {
                        body_id: body.tracking_id,
                        joint: v.joint_type,
                        position: v.position,
                        half_extent: v.scale * 0.5,
                    })
            })
            .collect()
    }

    /// Drops every visual and disables the mapper. Idempotent.
    pub fn shutdown(&mut self) {
        if self.enabled {
            log::info!("Skeleton mapper stopped");
        }

        self.enabled = false;
        self.bodies.clear();
        self.plane.invalidate();
    }
}

fn style_of(settings: &SkeletonSettings, material: &BoneMaterial) -> BoneStyle {
    BoneStyle {
        joint_size: settings.joint_base_size,
        line_width: settings.line_base_width,
        render_queue: material.render_queue,
        visible: settings.bones_visible,
    }
}

fn skip(reason: SkipReason) -> TickOutcome {
    log::trace!("Skeleton tick skipped: {:?}", reason);
    TickOutcome::Skipped(reason)
}
