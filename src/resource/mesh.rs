//! The cutout grid mesh.

use crate::color::{VertexColor, HIDDEN_VERTEX};
use crate::procedural::{unit_grid, GridSize};
use crate::resource::vertex_index::{IndexBuffer, IndexFormat};
use crate::resource::BufferVec;
use crate::scene::Surface;
use glamx::{Vec2, Vec3};

/// A regular grid mesh whose per-vertex UVs and alpha follow the sensor frames.
///
/// Positions and indices only change on [`CutoutMesh::rebuild`], which bumps the
/// geometry version. UVs and colors are rewritten every updated tick.
#[derive(Clone, Debug)]
pub struct CutoutMesh {
    size: GridSize,
    coords: BufferVec<Vec3>,
    uvs: BufferVec<Vec2>,
    colors: BufferVec<VertexColor>,
    indices: IndexBuffer,
    version: u64,
}

impl CutoutMesh {
    /// A mesh without any vertex. Never consistent with a grid size.
    pub fn empty() -> Self {
        Self {
            size: GridSize::new(0, 0),
            coords: BufferVec::new_empty(),
            uvs: BufferVec::new_empty(),
            colors: BufferVec::new_empty(),
            indices: IndexBuffer::empty(),
            version: 0,
        }
    }

    /// A mesh built for `size`.
    pub fn new(size: GridSize) -> Self {
        let mut mesh = Self::empty();
        mesh.rebuild(size);
        mesh
    }

    /// Regenerates every buffer for `size`. All vertices start fully transparent.
    pub fn rebuild(&mut self, size: GridSize) {
        let grid = unit_grid(size);
        let vertex_count = grid.coords.len();

        self.size = GridSize::new(size.width.max(2), size.height.max(2));
        self.coords = BufferVec::new(grid.coords);
        self.uvs = BufferVec::new(grid.uvs);
        self.colors = BufferVec::new(vec![HIDDEN_VERTEX; vertex_count]);
        self.indices = IndexBuffer::new(&grid.triangles, vertex_count);
        self.version += 1;
    }

    /// Whether every buffer matches `size`.
    pub fn is_consistent_with(&self, size: GridSize) -> bool {
        let n = size.vertex_count();
        self.size == size
            && self.coords.len() == n
            && self.uvs.len() == n
            && self.colors.len() == n
            && self.indices.len() == size.index_count()
    }

    /// The current grid dimensions.
    #[inline]
    pub fn grid_size(&self) -> GridSize {
        self.size
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    /// Vertex positions.
    #[inline]
    pub fn coords(&self) -> &BufferVec<Vec3> {
        &self.coords
    }

    /// Texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &BufferVec<Vec2> {
        &self.uvs
    }

    /// Vertex colors. RGB is always white; alpha is the cutout mask.
    #[inline]
    pub fn colors(&self) -> &BufferVec<VertexColor> {
        &self.colors
    }

    /// Triangle indices.
    #[inline]
    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    /// Width of the index buffer elements.
    #[inline]
    pub fn index_format(&self) -> IndexFormat {
        self.indices.format()
    }

    /// Incremented by every rebuild.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Mutable UV and color buffers, for one full per-vertex pass. Marks both dirty.
    pub fn vertex_attributes_mut(&mut self) -> (&mut [Vec2], &mut [VertexColor]) {
        (
            self.uvs.data_mut().as_mut_slice(),
            self.colors.data_mut().as_mut_slice(),
        )
    }

    /// Whether any buffer changed since the last upload.
    pub fn dirty(&self) -> bool {
        self.coords.dirty() || self.uvs.dirty() || self.colors.dirty() || self.indices.dirty()
    }

    /// Marks every buffer as uploaded.
    pub fn clear_dirty(&mut self) {
        self.coords.clear_dirty();
        self.uvs.clear_dirty();
        self.colors.clear_dirty();
        self.indices.clear_dirty();
    }

    /// Frees every buffer. The geometry version is bumped so cached planes are dropped.
    pub fn release(&mut self) {
        *self = Self {
            version: self.version + 1,
            ..Self::empty()
        };
    }
}

impl Default for CutoutMesh {
    fn default() -> Self {
        Self::empty()
    }
}

impl Surface for CutoutMesh {
    fn geometry_version(&self) -> u64 {
        self.version
    }

    fn local_vertices(&self) -> &[Vec3] {
        self.coords.data()
    }
}
