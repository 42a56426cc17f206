//! Skeletal body data.

use crate::sensor::CameraSpacePoint;
use glamx::Vec3;
use std::collections::HashSet;

/// The 25 joints reported per tracked body, in device order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum JointType {
    /// Base of the spine, the root of the skeleton.
    SpineBase = 0,
    /// Middle of the spine.
    SpineMid = 1,
    /// Neck.
    Neck = 2,
    /// Head.
    Head = 3,
    /// Left shoulder.
    ShoulderLeft = 4,
    /// Left elbow.
    ElbowLeft = 5,
    /// Left wrist.
    WristLeft = 6,
    /// Left hand.
    HandLeft = 7,
    /// Right shoulder.
    ShoulderRight = 8,
    /// Right elbow.
    ElbowRight = 9,
    /// Right wrist.
    WristRight = 10,
    /// Right hand.
    HandRight = 11,
    /// Left hip.
    HipLeft = 12,
    /// Left knee.
    KneeLeft = 13,
    /// Left ankle.
    AnkleLeft = 14,
    /// Left foot.
    FootLeft = 15,
    /// Right hip.
    HipRight = 16,
    /// Right knee.
    KneeRight = 17,
    /// Right ankle.
    AnkleRight = 18,
    /// Right foot.
    FootRight = 19,
    /// Spine at the shoulder line.
    SpineShoulder = 20,
    /// Tip of the left hand.
    HandTipLeft = 21,
    /// Left thumb.
    ThumbLeft = 22,
    /// Tip of the right hand.
    HandTipRight = 23,
    /// Right thumb.
    ThumbRight = 24,
}

impl JointType {
    /// Number of joints per body.
    pub const COUNT: usize = 25;

    /// Every joint, in device order.
    pub const ALL: [JointType; JointType::COUNT] = [
        JointType::SpineBase,
        JointType::SpineMid,
        JointType::Neck,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
        JointType::SpineShoulder,
        JointType::HandTipLeft,
        JointType::ThumbLeft,
        JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    /// The joint at device index `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The device index of this joint.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-joint tracking confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    /// No position available.
    #[default]
    NotTracked,
    /// Position estimated from neighboring joints.
    Inferred,
    /// Position observed directly.
    Tracked,
}

/// One joint of a body: camera-space position in meters and its tracking state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    /// Which joint this is.
    pub joint_type: JointType,
    /// Camera-space position, in meters.
    pub position: CameraSpacePoint,
    /// Confidence of `position`.
    pub tracking_state: TrackingState,
}

/// One body slot of a skeletal frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Stable while the body stays tracked.
    pub tracking_id: u64,
    /// Whether the slot holds a body. Untracked slots are ignored.
    pub is_tracked: bool,
    /// Joints, indexed by [`JointType::index`].
    pub joints: [Joint; JointType::COUNT],
}

impl Body {
    /// A tracked body whose joints are all untracked at the sensor origin.
    pub fn new(tracking_id: u64) -> Self {
        let joints = JointType::ALL.map(|joint_type| Joint {
            joint_type,
            position: Vec3::ZERO,
            tracking_state: TrackingState::NotTracked,
        });

        Self {
            tracking_id,
            is_tracked: true,
            joints,
        }
    }

    /// An empty slot.
    pub fn untracked() -> Self {
        Self {
            is_tracked: false,
            ..Self::new(0)
        }
    }

    /// Sets one joint, builder style.
    pub fn with_joint(mut self, joint_type: JointType, position: CameraSpacePoint, state: TrackingState) -> Self {
        self.set_joint(joint_type, position, state);
        self
    }

    /// Sets the position and tracking state of one joint.
    pub fn set_joint(&mut self, joint_type: JointType, position: CameraSpacePoint, state: TrackingState) {
        let joint = &mut self.joints[joint_type.index()];
        joint.position = position;
        joint.tracking_state = state;
    }

    /// One joint.
    #[inline]
    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type.index()]
    }
}

/// The body slots of one skeletal snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyFrame {
    /// Body slots, in device order. Untracked slots may be present.
    pub bodies: Vec<Body>,
}

impl BodyFrame {
    /// A frame with the given slots.
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// Tracked bodies, in slot order.
    pub fn tracked(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| b.is_tracked)
    }

    /// Ids of every tracked body.
    pub fn tracked_ids(&self) -> HashSet<u64> {
        self.tracked().map(|b| b.tracking_id).collect()
    }
}
