//! Camera space to display plane.

use crate::scene::PlaneGeometry;
use crate::sensor::{DepthSpacePoint, FrameDescription};
use glamx::Vec2;

/// Whether `point` is finite and inside a depth frame of resolution `depth`.
#[inline]
pub fn is_valid_depth_point(point: DepthSpacePoint, depth: FrameDescription) -> bool {
    point.is_finite()
        && point.x >= 0.0
        && point.x < depth.width as f32
        && point.y >= 0.0
        && point.y < depth.height as f32
}

/// Whether a camera-space depth lies in `(0, max_distance]`.
#[inline]
pub fn is_within_distance(z: f32, max_distance: f32) -> bool {
    z > 0.0 && z <= max_distance
}

/// Normalized `(u, v)` of a depth-space point, after mirroring and flipping.
#[inline]
pub fn plane_uv(point: DepthSpacePoint, depth: FrameDescription, mirror: bool, flip: bool) -> Vec2 {
    let mut u = point.x / depth.width as f32;
    let mut v = point.y / depth.height as f32;

    if mirror {
        u = 1.0 - u;
    }
    if flip {
        v = 1.0 - v;
    }

    Vec2::new(u, v)
}

/// The plane-local position of a depth-space point, shifted by `offset`.
pub fn plane_local_position(
    point: DepthSpacePoint,
    depth: FrameDescription,
    plane: &PlaneGeometry,
    mirror: bool,
    flip: bool,
    offset: Vec2,
) -> Vec2 {
    let uv = plane_uv(point, depth, mirror, flip);
    plane.local_point(uv.x, uv.y) + offset
}
