//! The interface to the host renderer.

pub use self::renderer::Renderer;
pub use self::summary::{FrameSummary, SummaryRenderer};

mod renderer;
mod summary;
