/*!
# Body cutout

Silhouette-style AR presentation of tracked people from a depth camera.

Every frame, two pipelines read the latest frames of a [`SensorSession`](sensor::SensorSession):

* the [`CutoutMeshPipeline`](cutout::CutoutMeshPipeline) refreshes a regular grid mesh whose
  per-vertex alpha masks out everything but tracked bodies (or everything beyond a distance),
  and whose UVs sample a texture holding the color stream.
* the [`SkeletonPlaneMapper`](skeleton::SkeletonPlaneMapper) projects the tracked skeletons
  onto the same plane as joint markers and bone lines.

Both are driven by a [`ViewCoordinator`](view::ViewCoordinator), which keeps them on one
shared [`ViewConfig`](view::ViewConfig). Nothing is drawn here: the output is a set of CPU
buffers with dirty tracking, handed to the host through the [`Renderer`](renderer::Renderer)
trait.

```
use body_cutout::prelude::*;

let (device, feed) = SimulatedDevice::new();
let mut view = ViewCoordinator::open(Box::new(device), ViewConfig::default());

// Everyone stands 1.5m away and belongs to body slot 0.
feed.push_uniform(1500, 0, [40, 80, 160, 255]);

let report = view.tick();
assert!(report.cutout.is_updated());

let mut renderer = SummaryRenderer::new();
view.present(&mut renderer);
assert_eq!(renderer.last().opaque_vertices, 512 * 424);
```

Ticks never block. A stream without a new frame skips the affected pipeline for that tick and
leaves its previous output in place.

## Sensors
Device bindings implement [`SensorDevice`](sensor::SensorDevice) and
[`CoordinateMapper`](sensor::CoordinateMapper). The crate ships a
[`SimulatedDevice`](sensor::SimulatedDevice) fed by the host, and a
[`PinholeMapper`](sensor::PinholeMapper) for the reference 512x424 depth / 1920x1080 color
sensor.
*/
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

extern crate num_traits as num;
#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub mod color;
pub mod cutout;
pub mod error;
pub mod procedural;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod sensor;
pub mod skeleton;
pub mod tick;
pub mod view;

pub mod prelude {
    pub use crate::color::*;
    pub use crate::cutout::{CutoutMeshPipeline, CutoutSettings};
    pub use crate::error::{Error, Result};
    pub use crate::procedural::GridSize;
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use crate::sensor::*;
    pub use crate::skeleton::{
        BodyVisualMap, BodyVisuals, BoneMaterial, BoneSegment, InteractionProxy, JointVisual,
        SkeletonPlaneMapper, SkeletonSettings,
    };
    pub use crate::tick::{SkipReason, TickOutcome};
    pub use crate::view::{FrameReport, ViewConfig, ViewCoordinator};
    pub use glamx::{Mat4, Vec2, Vec3};
}
