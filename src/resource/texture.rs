//! The color texture sampled by the cutout mesh.

use crate::error::Result;
use crate::sensor::{ColorFrame, FrameDescription};
use image::RgbaImage;

/// Wrapping parameters for a texture.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum TextureWrapping {
    /// Repeats the texture when a texture coordinate is out of bounds.
    Repeat,
    /// Repeats the mirrored texture when a texture coordinate is out of bounds.
    MirroredRepeat,
    /// Repeats the nearest edge point texture color when a texture coordinate is out of bounds.
    ClampToEdge,
}

/// Sampling filter for a texture.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation between the four nearest texels.
    Bilinear,
}

/// An RGBA8 image holding the latest color frame.
///
/// The renderer re-uploads the image whenever [`ColorTexture::dirty`] is set.
#[derive(Clone, Debug)]
pub struct ColorTexture {
    image: RgbaImage,
    wrapping: TextureWrapping,
    filter: FilterMode,
    revision: u64,
    dirty: bool,
}

impl ColorTexture {
    /// A black, fully transparent texture sized for `description`.
    pub fn new(description: FrameDescription) -> Self {
        Self {
            image: RgbaImage::new(description.width as u32, description.height as u32),
            wrapping: TextureWrapping::ClampToEdge,
            filter: FilterMode::Bilinear,
            revision: 0,
            dirty: true,
        }
    }

    /// Converts `frame` to RGBA into this texture.
    ///
    /// The texture is reallocated if the frame resolution changed.
    pub fn upload(&mut self, frame: &ColorFrame) -> Result<()> {
        let desc = frame.description();
        if self.size() != (desc.width as u32, desc.height as u32) {
            log::debug!(
                "Resizing color texture from {:?} to {}x{}",
                self.size(),
                desc.width,
                desc.height
            );
            self.image = RgbaImage::new(desc.width as u32, desc.height as u32);
        }

        frame.copy_converted_to_rgba(&mut self.image)?;
        self.revision += 1;
        self.dirty = true;
        Ok(())
    }

    /// Texture dimensions (width, height).
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The RGBA pixels.
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The RGBA pixels as raw bytes, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// How out-of-range texture coordinates are resolved.
    #[inline]
    pub fn wrapping(&self) -> TextureWrapping {
        self.wrapping
    }

    /// How texels are filtered.
    #[inline]
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Number of uploads so far.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the pixels changed since the last renderer upload.
    #[inline]
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the pixels as uploaded.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Frees the pixels.
    pub fn release(&mut self) {
        self.image = RgbaImage::new(0, 0);
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::ColorImageFormat;

    #[test]
    fn upload_swaps_bgra() {
        let desc = FrameDescription::new(2, 1);
        let mut texture = ColorTexture::new(desc);
        let frame =
            ColorFrame::new(desc, ColorImageFormat::Bgra, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        texture.upload(&frame).unwrap();
        assert_eq!(texture.as_bytes(), &[3, 2, 1, 4, 7, 6, 5, 8]);
        assert_eq!(texture.revision(), 1);
        assert_eq!(texture.wrapping(), TextureWrapping::ClampToEdge);
        assert_eq!(texture.filter(), FilterMode::Bilinear);
    }

    #[test]
    fn upload_resizes() {
        let mut texture = ColorTexture::new(FrameDescription::new(1, 1));
        let desc = FrameDescription::new(2, 2);
        let frame = ColorFrame::new(desc, ColorImageFormat::Rgba, vec![9; 16]).unwrap();

        texture.upload(&frame).unwrap();
        assert_eq!(texture.size(), (2, 2));
        assert_eq!(texture.image().get_pixel(1, 1).0, [9, 9, 9, 9]);
    }
}
