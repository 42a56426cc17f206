use crate::procedural::{unit_grid, GridSize};
use glamx::{Mat4, Vec2, Vec3};

/// A flat surface whose local vertices define the projection plane.
pub trait Surface {
    /// Changes whenever [`Surface::local_vertices`] may have changed.
    fn geometry_version(&self) -> u64;
    /// The vertices, in the surface's local space.
    fn local_vertices(&self) -> &[Vec3];
}

/// The corners of a unit grid, used as the plane when no cutout mesh is built.
///
/// Spans the same `[-0.5, 0.5]` square as every cutout grid. Its geometry version never
/// matches one of a [`crate::resource::CutoutMesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct UnitQuad {
    vertices: Vec<Vec3>,
}

impl UnitQuad {
    /// A quad of 2x2 grid vertices.
    pub fn new() -> Self {
        Self {
            vertices: unit_grid(GridSize::new(2, 2)).coords,
        }
    }
}

impl Default for UnitQuad {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for UnitQuad {
    fn geometry_version(&self) -> u64 {
        u64::MAX
    }

    fn local_vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}

/// The local-space bounding rectangle of a surface, on its XY plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl PlaneGeometry {
    /// Creates a new plane geometry.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The bounding rectangle of `vertices`, or `None` if there is no vertex.
    pub fn from_vertices(vertices: &[Vec3]) -> Option<Self> {
        let first = vertices.first()?.truncate();
        let (min, max) = vertices
            .iter()
            .fold((first, first), |(min, max), v| {
                (min.min(v.truncate()), max.max(v.truncate()))
            });
        Some(Self { min, max })
    }

    /// The local point at normalized coordinates `(u, v)`.
    ///
    /// `u` runs from `min.x` to `max.x`; `v` runs from `max.y` down to `min.y`, like image rows.
    #[inline]
    pub fn local_point(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(
            self.min.x + (self.max.x - self.min.x) * u,
            self.max.y + (self.min.y - self.max.y) * v,
        )
    }
}

/// A [`PlaneGeometry`] cached against a surface's geometry version.
#[derive(Clone, Debug, Default)]
pub struct PlaneCache {
    version: Option<u64>,
    geometry: Option<PlaneGeometry>,
    recomputations: usize,
}

impl PlaneCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the geometry if `surface` changed since the last call, then returns it.
    pub fn refresh(&mut self, surface: &dyn Surface) -> Option<PlaneGeometry> {
        let version = surface.geometry_version();
        if self.version != Some(version) {
            self.geometry = PlaneGeometry::from_vertices(surface.local_vertices());
            self.version = Some(version);
            self.recomputations += 1;
            log::debug!("Plane geometry recomputed: {:?}", self.geometry);
        }

        self.geometry
    }

    /// The cached geometry, if any.
    #[inline]
    pub fn geometry(&self) -> Option<PlaneGeometry> {
        self.geometry
    }

    /// Number of times the geometry was recomputed.
    #[inline]
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Forgets the cached geometry.
    pub fn invalidate(&mut self) {
        self.version = None;
        self.geometry = None;
    }
}

/// Maps plane-local points to the output (world/display) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneTransform {
    local_to_world: Mat4,
}

impl PlaneTransform {
    /// A transform from a local-to-world matrix.
    pub fn new(local_to_world: Mat4) -> Self {
        Self { local_to_world }
    }

    /// Transforms a point of the plane's local XY plane.
    #[inline]
    pub fn transform_point(&self, local: Vec2) -> Vec3 {
        self.local_to_world
            .transform_point3(Vec3::new(local.x, local.y, 0.0))
    }
}

impl Default for PlaneTransform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quad {
        version: u64,
        vertices: Vec<Vec3>,
    }

    impl Surface for Quad {
        fn geometry_version(&self) -> u64 {
            self.version
        }

        fn local_vertices(&self) -> &[Vec3] {
            &self.vertices
        }
    }

    #[test]
    fn bounds_of_vertices() {
        let plane = PlaneGeometry::from_vertices(&[
            Vec3::new(-0.5, 0.25, 0.0),
            Vec3::new(0.5, -0.25, 1.0),
        ])
        .unwrap();
        assert_eq!(plane.min, Vec2::new(-0.5, -0.25));
        assert_eq!(plane.max, Vec2::new(0.5, 0.25));
        assert!(PlaneGeometry::from_vertices(&[]).is_none());
    }

    #[test]
    fn local_point_runs_rows_downward() {
        let plane = PlaneGeometry::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert_eq!(plane.local_point(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(plane.local_point(1.0, 1.0), Vec2::new(1.0, -1.0));
        assert_eq!(plane.local_point(0.5, 0.5), Vec2::ZERO);
    }

    #[test]
    fn cache_recomputes_on_version_change_only() {
        let mut quad = Quad {
            version: 1,
            vertices: vec![Vec3::ZERO, Vec3::ONE],
        };
        let mut cache = PlaneCache::new();

        cache.refresh(&quad);
        cache.refresh(&quad);
        assert_eq!(cache.recomputations(), 1);

        quad.vertices = vec![Vec3::ZERO, Vec3::splat(2.0)];
        quad.version = 2;
        let plane = cache.refresh(&quad).unwrap();
        assert_eq!(cache.recomputations(), 2);
        assert_eq!(plane.max, Vec2::splat(2.0));
    }

    #[test]
    fn unit_quad_spans_the_grid_square() {
        let mut cache = PlaneCache::new();
        let plane = cache.refresh(&UnitQuad::new()).unwrap();
        assert_eq!(plane.min, Vec2::splat(-0.5));
        assert_eq!(plane.max, Vec2::splat(0.5));
    }

    #[test]
    fn transform_places_local_points() {
        let t = PlaneTransform::new(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(t.transform_point(Vec2::new(1.0, 2.0)), Vec3::new(1.0, 2.0, 5.0));
    }
}
