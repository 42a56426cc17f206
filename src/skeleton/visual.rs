//! Plain presentation records of the skeleton overlay.

use crate::color::{self, Color};
use crate::sensor::JointType;
use crate::skeleton::style::{BoneStyle, StyleChanges};
use glamx::Vec3;
use std::collections::HashMap;

/// The line from a joint to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneSegment {
    /// World position of the joint.
    pub start: Vec3,
    /// World position of the parent joint.
    pub end: Vec3,
    /// Color at `start`, from the joint's tracking quality.
    pub start_color: Color,
    /// Color at `end`, from the parent's tracking quality.
    pub end_color: Color,
    /// Line width.
    pub width: f32,
    /// Both endpoints projected inside the plane this tick.
    pub connected: bool,
    /// Whether the renderer draws the line.
    pub visible: bool,
}

/// The marker, bone and interaction proxy of one joint of one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointVisual {
    /// The joint this visual stands for.
    pub joint_type: JointType,
    /// World position of the marker.
    pub position: Vec3,
    /// Uniform marker scale.
    pub scale: f32,
    /// The joint projected inside the plane and within range this tick.
    pub in_range: bool,
    /// Whether the renderer draws the marker.
    pub marker_visible: bool,
    /// Whether the interaction proxy takes part in collisions.
    pub proxy_enabled: bool,
    /// The outgoing bone.
    pub bone: BoneSegment,
}

impl JointVisual {
    /// A visual seeded with `style`, not yet positioned.
    pub fn new(joint_type: JointType, style: &BoneStyle) -> Self {
        Self {
            joint_type,
            position: Vec3::ZERO,
            scale: style.joint_size,
            in_range: false,
            marker_visible: style.visible,
            proxy_enabled: true,
            bone: BoneSegment {
                start: Vec3::ZERO,
                end: Vec3::ZERO,
                start_color: color::BLACK,
                end_color: color::BLACK,
                width: style.line_width,
                connected: false,
                visible: style.visible,
            },
        }
    }

    /// Hides the marker, bone and proxy.
    pub fn hide(&mut self) {
        self.in_range = false;
        self.marker_visible = false;
        self.proxy_enabled = false;
        self.bone.connected = false;
        self.bone.visible = false;
    }

    /// Pushes the `changes` fields of `style`.
    pub fn apply_style(&mut self, style: &BoneStyle, changes: StyleChanges) {
        if changes.contains(StyleChanges::VISIBILITY) {
            self.marker_visible = style.visible && self.in_range;
            self.bone.visible = style.visible && self.bone.connected;
        }
        if changes.contains(StyleChanges::SIZE) {
            self.scale = style.joint_size;
        }
        if changes.contains(StyleChanges::WIDTH) {
            self.bone.width = style.line_width;
        }
    }
}

/// Every joint visual of one tracked body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyVisuals {
    /// The body's tracking id.
    pub tracking_id: u64,
    /// Unique per created set; a re-tracked id gets a new generation.
    pub generation: u64,
    /// Indexed by [`JointType::index`].
    pub joints: [JointVisual; JointType::COUNT],
}

impl BodyVisuals {
    /// A fresh visual set seeded with `style`.
    pub fn new(tracking_id: u64, generation: u64, style: &BoneStyle) -> Self {
        Self {
            tracking_id,
            generation,
            joints: JointType::ALL.map(|jt| JointVisual::new(jt, style)),
        }
    }

    /// The visual of `joint_type`.
    #[inline]
    pub fn joint(&self, joint_type: JointType) -> &JointVisual {
        &self.joints[joint_type.index()]
    }
}

/// Visual sets keyed by tracking id.
pub type BodyVisualMap = HashMap<u64, BodyVisuals>;

/// An enabled collision proxy, for the external interaction collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionProxy {
    /// Tracking id of the body.
    pub body_id: u64,
    /// The joint.
    pub joint: JointType,
    /// World position of the proxy's center.
    pub position: Vec3,
    /// Half the side of the square proxy.
    pub half_extent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::style::LINE_RENDER_QUEUE;

    fn style(visible: bool) -> BoneStyle {
        BoneStyle {
            joint_size: 0.3,
            line_width: 0.05,
            render_queue: LINE_RENDER_QUEUE,
            visible,
        }
    }

    #[test]
    fn showing_again_keeps_out_of_range_joints_hidden() {
        let mut visual = JointVisual::new(JointType::Head, &style(true));
        visual.hide();
        visual.apply_style(&style(true), StyleChanges::VISIBILITY);
        assert!(!visual.marker_visible);
        assert!(!visual.bone.visible);

        visual.in_range = true;
        visual.apply_style(&style(true), StyleChanges::VISIBILITY);
        assert!(visual.marker_visible);
        assert!(!visual.bone.visible);
    }

    #[test]
    fn only_flagged_fields_change() {
        let mut visual = JointVisual::new(JointType::Head, &style(true));
        let next = BoneStyle {
            joint_size: 1.0,
            line_width: 1.0,
            ..style(true)
        };
        visual.apply_style(&next, StyleChanges::SIZE);
        assert_eq!(visual.scale, 1.0);
        assert_eq!(visual.bone.width, 0.05);
    }

    #[test]
    fn body_visuals_cover_every_joint() {
        let body = BodyVisuals::new(7, 1, &style(false));
        assert_eq!(body.joints.len(), JointType::COUNT);
        assert_eq!(body.joint(JointType::ThumbRight).joint_type, JointType::ThumbRight);
        assert!(!body.joint(JointType::Head).marker_visible);
    }
}
