use crate::sensor::FrameDescription;
use glamx::{Vec2, Vec3};
use num::Float;

/// Number of vertices along each axis of a cutout grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Vertices per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridSize {
    /// Creates a new grid size.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The grid sampling a depth frame of resolution `depth` every `downsample` pixels.
    ///
    /// Each axis keeps at least two vertices. A `downsample` of zero is treated as one.
    pub fn for_depth(depth: FrameDescription, downsample: usize) -> Self {
        let downsample = downsample.max(1);
        Self {
            width: (depth.width / downsample).max(2),
            height: (depth.height / downsample).max(2),
        }
    }

    /// Number of vertices.
    #[inline]
    pub const fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of triangle indices (six per cell).
    #[inline]
    pub const fn index_count(&self) -> usize {
        self.width.saturating_sub(1) * self.height.saturating_sub(1) * 6
    }
}

/// Geometry of a regular grid, before it is packed into renderer buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMesh {
    /// Row-major vertex positions on the XY plane.
    pub coords: Vec<Vec3>,
    /// Texture coordinates, matching the normalized grid coordinates.
    pub uvs: Vec<Vec2>,
    /// Two triangles per cell.
    pub triangles: Vec<[u32; 3]>,
}

#[inline]
fn lerp<N: Float>(a: N, b: N, t: N) -> N {
    a + (b - a) * t
}

/// Generates a unit grid of `size` vertices centered at the origin.
///
/// Vertex `(x, y)` is stored at `y * width + x`, spans `[-0.5, 0.5]` on both axes and has
/// the UV `(x / (width - 1), y / (height - 1))`. Each cell emits the triangles
/// (bottom-left, top-left, bottom-right) and (bottom-right, top-left, top-right).
///
/// Axes with fewer than two vertices are widened to two.
pub fn unit_grid(size: GridSize) -> GridMesh {
    let w = size.width.max(2);
    let h = size.height.max(2);

    let wstep = 1.0 / (w - 1) as f32;
    let hstep = 1.0 / (h - 1) as f32;

    let mut coords = Vec::with_capacity(w * h);
    let mut uvs = Vec::with_capacity(w * h);

    for y in 0..h {
        for x in 0..w {
            let u = x as f32 * wstep;
            let v = y as f32 * hstep;
            coords.push(Vec3::new(lerp(-0.5, 0.5, u), lerp(-0.5, 0.5, v), 0.0));
            uvs.push(Vec2::new(u, v));
        }
    }

    fn bl_triangle(bl: u32, ws: u32) -> [u32; 3] {
        [bl, bl + ws, bl + 1]
    }

    fn tr_triangle(bl: u32, ws: u32) -> [u32; 3] {
        [bl + 1, bl + ws, bl + ws + 1]
    }

    let mut triangles = Vec::with_capacity((w - 1) * (h - 1) * 2);
    for y in 0..h - 1 {
        for x in 0..w - 1 {
            let bl = (y * w + x) as u32;
            triangles.push(bl_triangle(bl, w as u32));
            triangles.push(tr_triangle(bl, w as u32));
        }
    }

    GridMesh {
        coords,
        uvs,
        triangles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_from_downsample() {
        let native = FrameDescription::new(512, 424);
        assert_eq!(GridSize::for_depth(native, 1), GridSize::new(512, 424));
        assert_eq!(GridSize::for_depth(native, 2), GridSize::new(256, 212));
        assert_eq!(GridSize::for_depth(native, 0), GridSize::new(512, 424));
        assert_eq!(
            GridSize::for_depth(FrameDescription::new(3, 3), 8),
            GridSize::new(2, 2)
        );
    }

    #[test]
    fn full_resolution_counts() {
        let size = GridSize::for_depth(FrameDescription::new(512, 424), 1);
        assert_eq!(size.vertex_count(), 217_088);
        assert_eq!(size.index_count(), 511 * 423 * 6);
    }

    #[test]
    fn corners_and_winding() {
        let grid = unit_grid(GridSize::new(3, 2));
        assert_eq!(grid.coords.len(), 6);
        assert_eq!(grid.coords[0], Vec3::new(-0.5, -0.5, 0.0));
        assert_eq!(grid.coords[5], Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(grid.uvs[1], Vec2::new(0.5, 0.0));
        assert_eq!(grid.triangles, vec![[0, 3, 1], [1, 3, 4], [1, 4, 2], [2, 4, 5]]);
    }
}
