use std::{
    convert::TryFrom,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use image::{DynamicImage, RgbaImage};
use lazy_static::lazy_static;

use crate::{backend::BatchTexture, math::Size, sprite::UvRect};

lazy_static! {
    static ref GLOBAL_ID_CELL: AtomicU64 = AtomicU64::new(0);
}

/// Embeds a texture in the binary.
#[macro_export]
macro_rules! include_texture {
    ($image_path:expr) => {{
        let image_bytes = std::include_bytes!($image_path);
        <$crate::texture::Texture as std::convert::TryFrom<&[u8]>>::try_from(image_bytes)
    }};
}

/// An image that can be drawn by a batch. Cheap to clone.
///
/// Uploading the pixels to the GPU is the backend's job; the batch only uses
/// the texture's id and size.
#[derive(Debug, Clone)]
pub struct Texture {
    id: u64,
    /// The image behind the texture.
    pub image: Arc<RgbaImage>,
}

impl Texture {
    /// The unique ID of this texture. This depends on load order and is not
    /// related to the image data in any way.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Creates a new texture from an image.
    #[must_use]
    pub fn new(image: &DynamicImage) -> Self {
        let image = image.to_rgba8();
        let id = GLOBAL_ID_CELL.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            image: Arc::new(image),
        }
    }

    /// Loads a texture from an image at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let img = image::open(path)?;

        Ok(Self::new(&img))
    }

    /// Returns the size of the image.
    #[must_use]
    pub fn size(&self) -> Size<u32> {
        let (w, h) = self.image.dimensions();
        Size::new(w, h)
    }

    /// Returns the raw image data.
    #[must_use]
    pub fn rgba_pixels(&self) -> Vec<u8> {
        (*self.image).clone().into_vec()
    }
}

impl BatchTexture for Texture {
    fn id(&self) -> u64 {
        self.id
    }

    fn width(&self) -> Option<u32> {
        Some(self.image.width())
    }

    fn height(&self) -> Option<u32> {
        Some(self.image.height())
    }
}

impl<'a> TryFrom<&'a [u8]> for Texture {
    type Error = crate::Error;

    fn try_from(bytes: &[u8]) -> crate::Result<Self> {
        let img = image::load_from_memory(bytes)?;

        Ok(Self::new(&img))
    }
}

/// A rectangular area of a texture, such as one image within an atlas.
#[derive(Debug, Clone)]
pub struct TextureRegion<T> {
    texture: T,
    uv: UvRect,
    size: Option<Size>,
}

impl<T> TextureRegion<T>
where
    T: BatchTexture,
{
    /// Returns a region covering the whole texture.
    #[must_use]
    pub fn entire(texture: T) -> Self {
        Self::new(texture, UvRect::FULL)
    }

    /// Returns the region of `texture` described by normalized coordinates.
    /// The region's pixel size is derived from the texture's size, if known.
    #[must_use]
    pub fn new(texture: T, uv: UvRect) -> Self {
        let size = texture
            .width()
            .zip(texture.height())
            .map(|(width, height)| {
                Size::new(
                    (uv.u2 - uv.u1).abs() * width as f32,
                    (uv.v2 - uv.v1).abs() * height as f32,
                )
            });
        Self { texture, uv, size }
    }

    /// Returns the region covering the pixels `x, y, width, height` of
    /// `texture`. Returns `None` if the texture's size isn't known.
    #[must_use]
    pub fn from_pixels(texture: T, x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        let texture_size = Size::new(texture.width()?, texture.height()?);
        Some(Self {
            texture,
            uv: UvRect::from_pixels(x, y, width, height, texture_size),
            size: Some(Size::new(width as f32, height as f32)),
        })
    }

    /// The texture this region is part of.
    #[must_use]
    pub const fn texture(&self) -> &T {
        &self.texture
    }

    /// The normalized coordinates of this region.
    #[must_use]
    pub const fn uv(&self) -> UvRect {
        self.uv
    }

    /// The width of this region in pixels, if known.
    #[must_use]
    pub fn width(&self) -> Option<f32> {
        self.size.map(|size| size.width)
    }

    /// The height of this region in pixels, if known.
    #[must_use]
    pub fn height(&self) -> Option<f32> {
        self.size.map(|size| size.height)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn texture(width: u32, height: u32) -> Texture {
        Texture::new(&DynamicImage::new_rgba8(width, height))
    }

    #[test]
    fn ids_are_unique() {
        let first = texture(1, 1);
        let second = texture(1, 1);
        assert_ne!(first.id(), second.id());
        assert_eq!(first.clone().id(), first.id());
    }

    #[test]
    fn reports_natural_size() {
        let texture = texture(64, 32);
        assert_eq!(texture.size(), Size::new(64, 32));
        assert_eq!(BatchTexture::width(&texture), Some(64));
        assert_eq!(BatchTexture::height(&texture), Some(32));
        assert_eq!(texture.rgba_pixels().len(), 64 * 32 * 4);
    }

    #[test]
    fn region_from_pixels() {
        let region = TextureRegion::from_pixels(texture(64, 32), 32, 16, 16, 16).unwrap();
        assert_eq!(region.uv(), UvRect::new(0.5, 0.5, 0.75, 1.));
        assert_eq!(region.width(), Some(16.));
        assert_eq!(region.height(), Some(16.));
    }

    #[test]
    fn region_size_follows_uv() {
        let region = TextureRegion::new(texture(64, 32), UvRect::new(0., 0., 0.5, 0.25));
        assert_relative_eq!(region.width().unwrap(), 32.);
        assert_relative_eq!(region.height().unwrap(), 8.);

        let entire = TextureRegion::entire(texture(10, 20));
        assert_eq!(entire.uv(), UvRect::FULL);
        assert_eq!(entire.width(), Some(10.));
    }

    #[test]
    fn decodes_embedded_png() {
        let texture = crate::include_texture!("../assets/red-blue.png").unwrap();
        assert_eq!(texture.size(), Size::new(2, 1));
        assert_eq!(texture.rgba_pixels(), vec![255, 0, 0, 255, 0, 0, 255, 128]);

        let bytes = include_bytes!("../assets/red-blue.png");
        let decoded = Texture::try_from(&bytes[..]).unwrap();
        assert_eq!(BatchTexture::width(&decoded), Some(2));
        assert_ne!(decoded.id(), texture.id());
    }

    #[test]
    fn invalid_bytes_are_an_image_error() {
        let result = Texture::try_from(&b"not an image"[..]);
        assert!(matches!(result, Err(crate::Error::Image(_))));
    }
}
