//! A software coordinate mapper built from pinhole intrinsics.
//!
//! Camera space is in meters with +X toward the image's +x, +Y up and +Z away from the
//! sensor. Image rows grow downward.

use crate::sensor::{
    CameraSpacePoint, ColorSpacePoint, CoordinateMapper, DepthSpacePoint, FrameDescription,
    MM_TO_METERS,
};
use glamx::{Vec2, Vec3};

/// Pinhole intrinsics of one camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intrinsics {
    /// Focal length x (pixel)
    pub fx: f32,
    /// Focal length y (pixel)
    pub fy: f32,
    /// Principal point x (pixel)
    pub cx: f32,
    /// Principal point y (pixel)
    pub cy: f32,
}

impl Intrinsics {
    /// Factory-typical depth camera intrinsics of the reference sensor at 512x424.
    pub const DEPTH_512X424: Intrinsics = Intrinsics {
        fx: 365.456,
        fy: 365.456,
        cx: 254.878,
        cy: 205.395,
    };

    /// Factory-typical color camera intrinsics of the reference sensor at 1920x1080.
    pub const COLOR_1920X1080: Intrinsics = Intrinsics {
        fx: 1081.372,
        fy: 1081.372,
        cx: 959.5,
        cy: 539.5,
    };

    /// Projects a camera-space point onto the image plane.
    ///
    /// Points at or behind the sensor plane project to negative infinity.
    #[inline]
    pub fn project(&self, point: Vec3) -> Vec2 {
        if !(point.z > 0.0) {
            return Vec2::splat(f32::NEG_INFINITY);
        }

        Vec2::new(
            self.fx * point.x / point.z + self.cx,
            self.cy - self.fy * point.y / point.z,
        )
    }

    /// Lifts a pixel with a known depth, in meters, back into camera space.
    #[inline]
    pub fn deproject(&self, pixel: Vec2, depth: f32) -> Vec3 {
        Vec3::new(
            (pixel.x - self.cx) / self.fx * depth,
            (self.cy - pixel.y) / self.fy * depth,
            depth,
        )
    }

    /// The intrinsics of the same camera with its image scaled by `sx` and `sy`.
    #[inline]
    pub fn scaled(&self, sx: f32, sy: f32) -> Intrinsics {
        Intrinsics {
            fx: self.fx * sx,
            fy: self.fy * sy,
            cx: self.cx * sx,
            cy: self.cy * sy,
        }
    }
}

fn scale_factors(from: FrameDescription, to: FrameDescription) -> (f32, f32) {
    (
        to.width as f32 / from.width.max(1) as f32,
        to.height as f32 / from.height.max(1) as f32,
    )
}

/// A [`CoordinateMapper`] computed from pinhole models of the depth and color cameras.
#[derive(Clone, Debug, PartialEq)]
pub struct PinholeMapper {
    depth_description: FrameDescription,
    color_description: FrameDescription,
    depth: Intrinsics,
    color: Intrinsics,
    depth_to_color: Vec3,
}

impl PinholeMapper {
    /// Creates a mapper for cameras of the given resolutions. `depth_to_color` is the color
    /// camera's offset from the depth camera, in meters.
    pub fn new(
        depth_description: FrameDescription,
        depth: Intrinsics,
        color_description: FrameDescription,
        color: Intrinsics,
        depth_to_color: Vec3,
    ) -> Self {
        Self {
            depth_description,
            color_description,
            depth,
            color,
            depth_to_color,
        }
    }

    /// The same cameras at other resolutions, with both intrinsics rescaled to match.
    pub fn with_resolutions(&self, depth: FrameDescription, color: FrameDescription) -> Self {
        let (dx, dy) = scale_factors(self.depth_description, depth);
        let (cx, cy) = scale_factors(self.color_description, color);

        Self {
            depth_description: depth,
            color_description: color,
            depth: self.depth.scaled(dx, dy),
            color: self.color.scaled(cx, cy),
            depth_to_color: self.depth_to_color,
        }
    }
}

impl Default for PinholeMapper {
    /// The reference sensor: 512x424 depth, 1920x1080 color, color camera 52mm to the side.
    fn default() -> Self {
        Self::new(
            FrameDescription::DEPTH,
            Intrinsics::DEPTH_512X424,
            FrameDescription::COLOR,
            Intrinsics::COLOR_1920X1080,
            Vec3::new(-0.052, 0.0, 0.0),
        )
    }
}

impl CoordinateMapper for PinholeMapper {
    fn map_camera_point_to_depth_space(&self, point: CameraSpacePoint) -> DepthSpacePoint {
        self.depth.project(point)
    }

    fn map_depth_frame_to_color_space(&self, depth: &[u16], out: &mut [ColorSpacePoint]) {
        let width = self.depth_description.width.max(1);

        for (i, (sample, dest)) in depth.iter().zip(out.iter_mut()).enumerate() {
            if *sample == 0 {
                *dest = Vec2::splat(f32::NEG_INFINITY);
                continue;
            }

            let pixel = Vec2::new((i % width) as f32, (i / width) as f32);
            let point = self.depth.deproject(pixel, *sample as f32 * MM_TO_METERS);
            *dest = self.color.project(point + self.depth_to_color);
        }
    }
}
