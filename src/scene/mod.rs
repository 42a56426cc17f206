//! The display plane shared by the cutout mesh and the skeleton overlay.

pub use self::plane::{PlaneCache, PlaneGeometry, PlaneTransform, Surface, UnitQuad};

mod plane;
