//! Reading images from disk and writing rendered views.

use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};
use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::image::ImageData;
use crate::scaling::DisplayBuffer;

/// Load an image file, keeping the native sample values.
///
/// Gray images (with or without alpha) become mono, everything else colour.
/// Alpha is dropped.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let img = image::open(path)?;
    let color = img.color();
    debug!(path = %path.display(), ?color, "Decoded image");
    Ok(from_dynamic(&img))
}

/// Convert a decoded image without rescaling its samples.
pub fn from_dynamic(img: &DynamicImage) -> ImageData {
    let (w, h) = (img.width() as usize, img.height() as usize);
    match img.color() {
        ColorType::L8 | ColorType::La8 => {
            let gray = img.to_luma8();
            mono_from(w, h, gray.as_raw().iter().map(|&v| v as f64))
        }
        ColorType::L16 | ColorType::La16 => {
            let gray = img.to_luma16();
            mono_from(w, h, gray.as_raw().iter().map(|&v| v as f64))
        }
        ColorType::Rgb16 | ColorType::Rgba16 => {
            let rgb = img.to_rgb16();
            rgb_from(w, h, rgb.as_raw().iter().map(|&v| v as f64))
        }
        ColorType::Rgb32F | ColorType::Rgba32F => {
            let rgb = img.to_rgb32f();
            rgb_from(w, h, rgb.as_raw().iter().map(|&v| v as f64))
        }
        _ => {
            let rgb = img.to_rgb8();
            rgb_from(w, h, rgb.as_raw().iter().map(|&v| v as f64))
        }
    }
}

fn mono_from(w: usize, h: usize, samples: impl Iterator<Item = f64>) -> ImageData {
    let mut data = Array2::<f64>::zeros((h, w));
    for (dst, src) in data.iter_mut().zip(samples) {
        *dst = src;
    }
    ImageData::Mono(data)
}

fn rgb_from(w: usize, h: usize, samples: impl Iterator<Item = f64>) -> ImageData {
    let mut data = Array3::<f64>::zeros((h, w, 3));
    for (dst, src) in data.iter_mut().zip(samples) {
        *dst = src;
    }
    ImageData::Rgb(data)
}

/// Save a rendered view as an 8-bit RGBA PNG.
pub fn save_display_png(buffer: &DisplayBuffer, path: &Path) -> Result<()> {
    if buffer.is_empty() {
        return Err(ViewerError::EmptyDisplay);
    }
    buffer
        .to_rgba_image()
        .save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
