//! Color types and the handful of named colors used by the cutout and skeleton visuals.
//!
//! Bone endpoints use [`Color`] values with RGBA components in the range [0.0, 1.0]. The
//! cutout mesh stores one packed [`VertexColor`] per vertex instead, since only its alpha
//! channel changes from one tick to the next.
//!
//! # Example
//! ```
//! # use body_cutout::color;
//! let packed = color::to_vertex_color(color::LIME);
//! assert_eq!(packed, [0, 255, 0, 255]);
//! ```

pub use rgb::Rgba;

/// The color type used for bone endpoints and materials. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// A packed RGBA8 vertex color, laid out the way GPU vertex buffers expect it.
pub type VertexColor = [u8; 4];

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Black (0, 0, 0)</div>
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>White (255, 255, 255)</div>
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Red (255, 0, 0)</div>
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 255, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Lime (0, 255, 0) - CSS "lime", pure green</div>
pub const LIME: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Yellow (255, 255, 0)</div>
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Transparent color (0, 0, 0, 0).
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Vertex color of a hidden cutout vertex: white, fully transparent.
pub const HIDDEN_VERTEX: VertexColor = [255, 255, 255, 0];

/// Packs a float color into an RGBA8 vertex color, clamping every channel.
#[inline]
pub fn to_vertex_color(color: Color) -> VertexColor {
    let pack = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [pack(color.r), pack(color.g), pack(color.b), pack(color.a)]
}
