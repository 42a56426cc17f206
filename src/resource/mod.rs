//! CPU-side resources handed to the renderer.

pub use crate::resource::buffer_vec::BufferVec;
pub use crate::resource::mesh::CutoutMesh;
pub use crate::resource::texture::{ColorTexture, FilterMode, TextureWrapping};
pub use crate::resource::vertex_index::{IndexBuffer, IndexFormat, WIDE_INDEX_THRESHOLD};

mod buffer_vec;
mod mesh;
mod texture;
pub mod vertex_index;
