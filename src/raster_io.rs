/// conversions between image files and the engine's pixmaps
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tiny_skia as sk;

use crate::error::{EvolveError, Result};
use crate::render::premultiply;

/// straight RGBA image -> pixmap. translucent pixels are premultiplied,
/// opaque ones come through unchanged
pub fn pixmap_from_rgba(img: &RgbaImage) -> Result<sk::Pixmap> {
    let (width, height) = img.dimensions();
    let size = sk::IntSize::from_wh(width, height).ok_or(EvolveError::EmptyCanvas { width, height })?;
    sk::Pixmap::from_vec(premultiply(img.as_raw()), size).ok_or(EvolveError::EmptyCanvas { width, height })
}

/// pixmap -> straight RGBA image
pub fn rgba_from_pixmap(pix: &sk::Pixmap) -> Result<RgbaImage> {
    let (width, height) = (pix.width(), pix.height());
    let data: Vec<u8> = pix
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).ok_or(EvolveError::DimensionMismatch {
        expected: (width, height),
        actual: (width, height),
    })
}

/// decode the target image from disk (any format the `image` crate knows)
pub fn load_target(path: &Path) -> Result<sk::Pixmap> {
    profiling::scope!("load_target");
    let rgba8 = image::open(path)?.to_rgba8();
    pixmap_from_rgba(&rgba8)
}

/// encode a raster as PNG
pub fn save_png(pix: &sk::Pixmap, path: &Path) -> Result<()> {
    profiling::scope!("save_png");
    rgba_from_pixmap(pix)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
