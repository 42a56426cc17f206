//! Bone appearance and lazy style propagation.

use crate::color::{self, Color};
use crate::sensor::TrackingState;
use bitflags::bitflags;

/// Render queue of the transparent cutout plane.
pub const TRANSPARENT_RENDER_QUEUE: i32 = 3000;
/// Render queue of markers and bones, drawn after the cutout plane.
pub const LINE_RENDER_QUEUE: i32 = 3501;

/// The appearance template shared by every marker and bone of a session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoneMaterial {
    /// Name of the shader or material the renderer should use.
    pub name: String,
    /// Base color, modulated by the per-endpoint tracking colors.
    pub color: Color,
    /// Layering depth; higher is drawn later.
    pub render_queue: i32,
}

impl BoneMaterial {
    /// The session instance of `template`, or of the unlit fallback if there is none.
    ///
    /// The instance is always drawn at [`LINE_RENDER_QUEUE`].
    pub fn instantiate(template: Option<&BoneMaterial>) -> BoneMaterial {
        let mut instance = template.cloned().unwrap_or_default();
        instance.render_queue = LINE_RENDER_QUEUE;
        instance
    }
}

impl Default for BoneMaterial {
    fn default() -> Self {
        Self {
            name: "Unlit/Color".to_string(),
            color: color::WHITE,
            render_queue: LINE_RENDER_QUEUE,
        }
    }
}

/// The color of a bone endpoint whose joint has tracking quality `state`.
pub fn tracking_color(state: TrackingState) -> Color {
    match state {
        TrackingState::Tracked => color::LIME,
        TrackingState::Inferred => color::RED,
        TrackingState::NotTracked => color::BLACK,
    }
}

bitflags! {
    /// The fields that differ between two [`BoneStyle`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleChanges: u8 {
        /// Marker scale.
        const SIZE = 1 << 0;
        /// Line width.
        const WIDTH = 1 << 1;
        /// Material layering.
        const RENDER_QUEUE = 1 << 2;
        /// Global visibility.
        const VISIBILITY = 1 << 3;
    }
}

/// The styling pushed to every joint visual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneStyle {
    /// Marker scale.
    pub joint_size: f32,
    /// Bone line width.
    pub line_width: f32,
    /// Material layering depth.
    pub render_queue: i32,
    /// Global show/hide of markers and bones.
    pub visible: bool,
}

impl BoneStyle {
    /// The fields of `self` that differ from `previous`. Sizes compare approximately.
    pub fn changes_from(&self, previous: &BoneStyle) -> StyleChanges {
        let mut changes = StyleChanges::empty();
        changes.set(
            StyleChanges::SIZE,
            !approximately(self.joint_size, previous.joint_size),
        );
        changes.set(
            StyleChanges::WIDTH,
            !approximately(self.line_width, previous.line_width),
        );
        changes.set(
            StyleChanges::RENDER_QUEUE,
            self.render_queue != previous.render_queue,
        );
        changes.set(StyleChanges::VISIBILITY, self.visible != previous.visible);
        changes
    }
}

/// Float equality tolerant to representation noise.
pub fn approximately(a: f32, b: f32) -> bool {
    let tolerance = (1.0e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0);
    (b - a).abs() < tolerance
}
