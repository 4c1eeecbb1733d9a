//! Per-layer pixel buffers and the immutable captures the history keeps.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::{EditorError, EditorResult};

pub mod font;
pub mod raster;

/// Fully transparent, the blank state of every surface.
pub const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An immutable capture of a surface's pixels.
///
/// Cloning a snapshot only bumps a reference count; the pixels themselves are
/// never written to after capture.
#[derive(Clone)]
pub struct Snapshot {
    pixels: Arc<RgbaImage>,
}

impl Snapshot {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels) || *self.pixels == *other.pixels
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// An addressable RGBA pixel buffer.
#[derive(Clone, PartialEq)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BLANK),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// A surface with zero area has not been laid out yet.
    pub fn is_realized(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Copy the current pixels into an immutable snapshot.
    pub fn capture(&self) -> EditorResult<Snapshot> {
        if !self.is_realized() {
            return Err(EditorError::SurfaceUnavailable {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(Snapshot::from_image(self.image.clone()))
    }

    /// Replace every pixel with the snapshot's. A snapshot of a different
    /// size is cropped or padded with transparency to fit this surface.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.image = fit(snapshot.image(), self.width(), self.height());
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BLANK;
        }
    }

    /// Change the surface size, keeping the top-left content.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        self.image = fit(&self.image, width, height);
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Crop or pad `source` to `width` x `height`, anchored at the top-left.
fn fit(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.width() == width && source.height() == height {
        return source.clone();
    }
    let mut image = RgbaImage::from_pixel(width, height, BLANK);
    let w = width.min(source.width());
    let h = height.min(source.height());
    for y in 0..h {
        for x in 0..w {
            image.put_pixel(x, y, *source.get_pixel(x, y));
        }
    }
    image
}
