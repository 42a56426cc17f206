use crate::resource::{ColorTexture, CutoutMesh};
use crate::skeleton::{BodyVisualMap, BoneMaterial};

/// The seam to the host's rendering backend.
///
/// Implementations upload whatever is marked dirty and draw it. They never modify the
/// pipelines' state; the caller clears dirty flags after both calls returned.
pub trait Renderer {
    /// Receives the cutout mesh and its color texture.
    ///
    /// The mesh is drawn in the transparent queue, sampling `texture` with the mesh UVs and
    /// modulating by the vertex colors.
    fn update_cutout(&mut self, mesh: &CutoutMesh, texture: &ColorTexture);

    /// Receives every joint marker and bone, drawn with `material` after the cutout mesh.
    fn update_skeleton(&mut self, material: &BoneMaterial, bodies: &BodyVisualMap);
}
