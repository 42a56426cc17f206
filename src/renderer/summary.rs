//! A renderer that only tallies what a GPU backend would upload and draw.

use crate::renderer::Renderer;
use crate::resource::{ColorTexture, CutoutMesh};
use crate::skeleton::{BodyVisualMap, BoneMaterial};

/// What one [`Renderer`] pass received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Bytes of mesh buffers that were dirty.
    pub mesh_bytes: usize,
    /// Bytes of texture that were dirty.
    pub texture_bytes: usize,
    /// Cutout vertices with a non-zero alpha.
    pub opaque_vertices: usize,
    /// Tracked bodies.
    pub bodies: usize,
    /// Visible joint markers.
    pub markers: usize,
    /// Visible bones.
    pub bones: usize,
}

/// Keeps the [`FrameSummary`] of the last pass and running upload totals.
#[derive(Clone, Debug, Default)]
pub struct SummaryRenderer {
    last: FrameSummary,
    uploaded_bytes: usize,
    passes: usize,
}

impl SummaryRenderer {
    /// A renderer that saw nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The summary of the last pass.
    #[inline]
    pub fn last(&self) -> &FrameSummary {
        &self.last
    }

    /// Bytes uploaded over every pass.
    #[inline]
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Number of cutout updates received.
    #[inline]
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl Renderer for SummaryRenderer {
    fn update_cutout(&mut self, mesh: &CutoutMesh, texture: &ColorTexture) {
        let mut mesh_bytes = 0;
        if mesh.coords().dirty() {
            mesh_bytes += mesh.coords().as_bytes().len();
        }
        if mesh.uvs().dirty() {
            mesh_bytes += mesh.uvs().as_bytes().len();
        }
        if mesh.colors().dirty() {
            mesh_bytes += mesh.colors().as_bytes().len();
        }
        if mesh.indices().dirty() {
            mesh_bytes += mesh.indices().as_bytes().len();
        }

        let texture_bytes = if texture.dirty() {
            texture.as_bytes().len()
        } else {
            0
        };

        self.last.mesh_bytes = mesh_bytes;
        self.last.texture_bytes = texture_bytes;
        self.last.opaque_vertices = mesh.colors().data().iter().filter(|c| c[3] > 0).count();
        self.uploaded_bytes += mesh_bytes + texture_bytes;
        self.passes += 1;
    }

    fn update_skeleton(&mut self, _material: &BoneMaterial, bodies: &BodyVisualMap) {
        let joints = bodies.values().flat_map(|b| b.joints.iter());

        self.last.bodies = bodies.len();
        self.last.markers = joints.clone().filter(|j| j.marker_visible).count();
        self.last.bones = joints.filter(|j| j.bone.visible).count();
    }
}
