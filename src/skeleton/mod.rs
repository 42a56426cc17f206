//! The skeleton overlay projected onto the display plane.

pub use self::mapper::{SkeletonPlaneMapper, SkeletonSettings};
pub use self::projection::{is_valid_depth_point, is_within_distance, plane_local_position, plane_uv};
pub use self::style::{
    approximately, tracking_color, BoneMaterial, BoneStyle, StyleChanges, LINE_RENDER_QUEUE,
    TRANSPARENT_RENDER_QUEUE,
};
pub use self::topology::{parent, BONES, ROOT_JOINT};
pub use self::visual::{BodyVisualMap, BodyVisuals, BoneSegment, InteractionProxy, JointVisual};

mod mapper;
mod projection;
mod style;
pub mod topology;
mod visual;
