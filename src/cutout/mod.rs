//! The body cutout mesh.

pub use self::pipeline::{CutoutMeshPipeline, CutoutSettings};
pub use self::sampling::{
    alpha, color_uv, sample_index, ALPHA_HIDDEN, ALPHA_VISIBLE, UV_OUT_OF_RANGE,
};

mod pipeline;
mod sampling;
