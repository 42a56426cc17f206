//! The fixed joint adjacency of a tracked body.

use crate::sensor::JointType;

/// The joint every other joint chains to.
pub const ROOT_JOINT: JointType = JointType::SpineBase;

/// `(joint, parent)` for every joint except the root.
pub const BONES: [(JointType, JointType); JointType::COUNT - 1] = [
    // Left leg
    (JointType::FootLeft, JointType::AnkleLeft),
    (JointType::AnkleLeft, JointType::KneeLeft),
    (JointType::KneeLeft, JointType::HipLeft),
    (JointType::HipLeft, JointType::SpineBase),
    // Right leg
    (JointType::FootRight, JointType::AnkleRight),
    (JointType::AnkleRight, JointType::KneeRight),
    (JointType::KneeRight, JointType::HipRight),
    (JointType::HipRight, JointType::SpineBase),
    // Left arm
    (JointType::HandTipLeft, JointType::HandLeft),
    (JointType::ThumbLeft, JointType::HandLeft),
    (JointType::HandLeft, JointType::WristLeft),
    (JointType::WristLeft, JointType::ElbowLeft),
    (JointType::ElbowLeft, JointType::ShoulderLeft),
    (JointType::ShoulderLeft, JointType::SpineShoulder),
    // Right arm
    (JointType::HandTipRight, JointType::HandRight),
    (JointType::ThumbRight, JointType::HandRight),
    (JointType::HandRight, JointType::WristRight),
    (JointType::WristRight, JointType::ElbowRight),
    (JointType::ElbowRight, JointType::ShoulderRight),
    (JointType::ShoulderRight, JointType::SpineShoulder),
    // Spine
    (JointType::SpineMid, JointType::SpineBase),
    (JointType::SpineShoulder, JointType::SpineMid),
    (JointType::Neck, JointType::SpineShoulder),
    (JointType::Head, JointType::Neck),
];

/// The joint `joint` draws its bone to, or `None` for the root.
pub fn parent(joint: JointType) -> Option<JointType> {
    BONES
        .iter()
        .find(|(child, _)| *child == joint)
        .map(|(_, parent)| *parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_joint_but_root_has_one_parent() {
        for joint in JointType::ALL {
            let count = BONES.iter().filter(|(child, _)| *child == joint).count();
            if joint == ROOT_JOINT {
                assert_eq!(count, 0);
            } else {
                assert_eq!(count, 1, "{:?}", joint);
            }
        }
    }

    #[test]
    fn every_chain_reaches_root() {
        for joint in JointType::ALL {
            let mut current = joint;
            let mut steps = 0;
            while let Some(p) = parent(current) {
                current = p;
                steps += 1;
                assert!(steps < JointType::COUNT, "cycle from {:?}", joint);
            }
            assert_eq!(current, ROOT_JOINT);
        }
    }

    #[test]
    fn head_chains_down_the_spine() {
        assert_eq!(parent(JointType::Head), Some(JointType::Neck));
        assert_eq!(parent(JointType::Neck), Some(JointType::SpineShoulder));
        assert_eq!(parent(JointType::SpineMid), Some(JointType::SpineBase));
        assert_eq!(parent(JointType::SpineBase), None);
    }
}
