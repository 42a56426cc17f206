//! Per-vertex sampling rules of the cutout mesh.

use crate::sensor::{ColorSpacePoint, FrameDescription, MM_TO_METERS};
use glamx::Vec2;

/// Fully opaque vertex alpha.
pub const ALPHA_VISIBLE: u8 = 255;
/// Fully transparent vertex alpha.
pub const ALPHA_HIDDEN: u8 = 0;
/// UV component written when the color mapping is not finite. Lies outside `[0, 1]`.
pub const UV_OUT_OF_RANGE: f32 = -1.0;

/// Index into a depth frame of the pixel sampled at grid step `(depth_x, depth_y)`.
///
/// `mirror` reverses the column. Rows are read bottom-up unless `flip` is set.
/// Coordinates past the frame edge are clamped to it.
#[inline]
pub fn sample_index(
    depth: FrameDescription,
    depth_x: usize,
    depth_y: usize,
    mirror: bool,
    flip: bool,
) -> usize {
    let last_x = depth.width.saturating_sub(1);
    let last_y = depth.height.saturating_sub(1);
    let x = depth_x.min(last_x);
    let y = depth_y.min(last_y);

    let actual_x = if mirror { last_x - x } else { x };
    let actual_y = if flip { y } else { last_y - y };

    actual_y * depth.width + actual_x
}

/// Alpha of a vertex whose depth pixel holds `depth_mm`. `on_body` tells whether the
/// pixel belongs to a tracked body.
///
/// Missing or too distant returns are hidden. Otherwise the vertex is shown if
/// `visualize_distance` is set, or if the pixel is on a body.
#[inline]
pub fn alpha(depth_mm: u16, on_body: bool, max_distance: f32, visualize_distance: bool) -> u8 {
    if depth_mm == 0 {
        return ALPHA_HIDDEN;
    }

    let meters = depth_mm as f32 * MM_TO_METERS;
    if meters > max_distance {
        return ALPHA_HIDDEN;
    }

    if visualize_distance || on_body {
        ALPHA_VISIBLE
    } else {
        ALPHA_HIDDEN
    }
}

/// Texture coordinate of a color-space point, normalized by the color resolution.
#[inline]
pub fn color_uv(point: ColorSpacePoint, color: FrameDescription) -> Vec2 {
    let u = point.x / color.width as f32;
    let v = point.y / color.height as f32;

    if u.is_finite() && v.is_finite() {
        Vec2::new(u, v)
    } else {
        Vec2::splat(UV_OUT_OF_RANGE)
    }
}
