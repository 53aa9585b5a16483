//! Image normalisation: `DynamicImage` → colour-corrected PNG bytes.
//!
//! Embedded PDF images arrive in whatever colour model the producing tool
//! used — CMYK scans, 16-bit greyscale, palettised buffers. Browsers only
//! need to see standard RGB, so anything the codec does not already treat as
//! RGB is converted before re-encoding. PNG is chosen over JPEG because it is
//! lossless and every browser renders it inline from a data URI.

use crate::document::PageImage;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Colour-normalise a decoded image and encode it as PNG.
///
/// Buffers already in `Rgb8`/`Rgba8` pass through untouched (alpha is
/// preserved); every other colour model is converted to `Rgb8` first. The
/// conversion itself cannot fail — only the PNG encoder can, and that error
/// is the caller's cue to skip the image.
pub fn encode_image(img: DynamicImage) -> Result<PageImage, image::ImageError> {
    let img = normalise_colour(img);
    let (width, height) = (img.width(), img.height());

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    debug!("encoded {}x{} image → {} PNG bytes", width, height, png.len());

    Ok(PageImage { width, height, png })
}

/// Convert any pixel buffer the codec does not consider standard RGB.
fn normalise_colour(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
