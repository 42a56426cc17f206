use crate::cutout::CutoutSettings;
use crate::error::{Error, Result};
use crate::skeleton::{BoneMaterial, SkeletonSettings};
use glamx::Vec2;
#[cfg(feature = "serde")]
use std::path::Path;

/// Smallest accepted maximum distance, in meters.
pub const MIN_MAX_DISTANCE: f32 = 0.5;
/// Largest accepted maximum distance, in meters.
pub const MAX_MAX_DISTANCE: f32 = 8.0;
/// Smallest accepted downsample factor.
pub const MIN_DOWNSAMPLE: usize = 1;
/// Largest accepted downsample factor.
pub const MAX_DOWNSAMPLE: usize = 8;

/// Every option shared by the cutout mesh and the skeleton overlay.
///
/// Loaded from TOML, every missing key takes its default:
///
/// ```toml
/// mirror = true
/// max_distance = 3.0
/// downsample = 2
/// bone_pos_offset = [0.0, 0.1]
///
/// [bone_material]
/// name = "Unlit/Color"
/// color = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Reverses the horizontal direction of both pipelines.
    pub mirror: bool,
    /// Reverses the vertical direction of both pipelines.
    pub flip: bool,
    /// Visibility cutoff of both pipelines, in meters.
    pub max_distance: f32,
    /// Cutout alpha follows distance only, ignoring body segmentation.
    pub visualize_capture_distance: bool,
    /// Cutout grid resolution divisor.
    pub downsample: usize,
    /// Global show/hide of joint markers and bones.
    pub bones_visible: bool,
    /// Joint marker scale.
    pub joint_base_size: f32,
    /// Bone line width.
    pub line_base_width: f32,
    /// Plane-local offset added to every projected joint.
    pub bone_pos_offset: Vec2,
    /// Appearance template of markers and bones. `None` uses an unlit material.
    pub bone_material: Option<BoneMaterial>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mirror: false,
            flip: false,
            max_distance: MAX_MAX_DISTANCE,
            visualize_capture_distance: false,
            downsample: MIN_DOWNSAMPLE,
            bones_visible: true,
            joint_base_size: 0.3,
            line_base_width: 0.05,
            bone_pos_offset: Vec2::ZERO,
            bone_material: None,
        }
    }
}

impl ViewConfig {
    /// Fails if a numeric option is not finite.
    pub fn check(&self) -> Result<()> {
        let fields = [
            ("max_distance", self.max_distance),
            ("joint_base_size", self.joint_base_size),
            ("line_base_width", self.line_base_width),
            ("bone_pos_offset.x", self.bone_pos_offset.x),
            ("bone_pos_offset.y", self.bone_pos_offset.y),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(Error::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }

    /// This configuration with every option brought into its accepted range.
    ///
    /// Each correction is logged as a warning.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !self.max_distance.is_finite() {
            log::warn!(
                "max_distance {} is not finite, using {}",
                self.max_distance,
                defaults.max_distance
            );
            self.max_distance = defaults.max_distance;
        } else if !(MIN_MAX_DISTANCE..=MAX_MAX_DISTANCE).contains(&self.max_distance) {
            let clamped = self.max_distance.clamp(MIN_MAX_DISTANCE, MAX_MAX_DISTANCE);
            log::warn!("max_distance {} clamped to {}", self.max_distance, clamped);
            self.max_distance = clamped;
        }

        if !(MIN_DOWNSAMPLE..=MAX_DOWNSAMPLE).contains(&self.downsample) {
            let clamped = self.downsample.clamp(MIN_DOWNSAMPLE, MAX_DOWNSAMPLE);
            log::warn!("downsample {} clamped to {}", self.downsample, clamped);
            self.downsample = clamped;
        }

        if !(self.joint_base_size.is_finite() && self.joint_base_size >= 0.0) {
            log::warn!(
                "joint_base_size {} is invalid, using {}",
                self.joint_base_size,
                defaults.joint_base_size
            );
            self.joint_base_size = defaults.joint_base_size;
        }

        if !(self.line_base_width.is_finite() && self.line_base_width >= 0.0) {
            log::warn!(
                "line_base_width {} is invalid, using {}",
                self.line_base_width,
                defaults.line_base_width
            );
            self.line_base_width = defaults.line_base_width;
        }

        if !self.bone_pos_offset.is_finite() {
            log::warn!("bone_pos_offset {} is not finite, using zero", self.bone_pos_offset);
            self.bone_pos_offset = Vec2::ZERO;
        }

        self
    }

    /// The options of the cutout mesh.
    pub fn cutout_settings(&self) -> CutoutSettings {
        CutoutSettings {
            mirror: self.mirror,
            flip: self.flip,
            max_distance: self.max_distance,
            visualize_capture_distance: self.visualize_capture_distance,
            downsample: self.downsample,
        }
    }

    /// The options of the skeleton overlay.
    pub fn skeleton_settings(&self) -> SkeletonSettings {
        SkeletonSettings {
            mirror: self.mirror,
            flip: self.flip,
            max_distance: self.max_distance,
            bones_visible: self.bones_visible,
            joint_base_size: self.joint_base_size,
            line_base_width: self.line_base_width,
            bone_pos_offset: self.bone_pos_offset,
        }
    }

    /// Parses a TOML document, then validates it.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ViewConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config.validated())
    }

    /// Reads and parses a TOML file, then validates it.
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
