//! Image variant generation.
//!
//! Every published image ships in four widths so pages can pick an
//! appropriate size:
//!
//! | Variant | Width |
//! |---------|-------|
//! | `large` | 1600 px |
//! | `medium` | 800 px |
//! | `small` | 400 px |
//! | `tiny` | 100 px |
//!
//! Resizing preserves aspect ratio and never upscales — a variant wider
//! than the original is emitted at the original size instead. Decoding and
//! encoding are the `image` crate's (Lanczos3 resampling), so the binary
//! has no system dependencies.

use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Variant labels and their target widths, largest first.
pub const VARIANT_WIDTHS: [(&str, u32); 4] =
    [("large", 1600), ("medium", 800), ("small", 400), ("tiny", 100)];

/// One resized rendition of a source image.
pub struct ImageVariant {
    pub label: &'static str,
    pub image: DynamicImage,
}

/// Decode a source image and produce its four variants.
pub fn create_image_output(source: &Path) -> Result<Vec<ImageVariant>, image::ImageError> {
    let original = image::open(source)?;
    Ok(VARIANT_WIDTHS
        .iter()
        .map(|&(label, width)| ImageVariant {
            label,
            image: scale_to_width(&original, width),
        })
        .collect())
}

/// Scale an image down to `width`, keeping the aspect ratio.
fn scale_to_width(original: &DynamicImage, width: u32) -> DynamicImage {
    if original.width() <= width {
        return original.clone();
    }
    let height = (u64::from(width) * u64::from(original.height()) / u64::from(original.width()))
        .max(1) as u32;
    original.resize_exact(width, height, FilterType::Lanczos3)
}
