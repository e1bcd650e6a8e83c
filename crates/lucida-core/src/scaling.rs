//! Conversion of raw samples into the 8-bit RGBA display buffer.

use ndarray::{s, Array2, Array3, ArrayView2};
use rayon::prelude::*;

use crate::colormap::Lut;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::image::{ImageData, ImageStats};
use crate::viewport::ViewportRect;

/// How raw mono samples are mapped onto 0..=255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalePolicy {
    /// Stretch the image's own min/max over the full range.
    Auto { min: f64, max: f64 },
    /// Fixed window; samples outside it clamp to 0 or 255.
    Manual { lower: f64, upper: f64 },
}

impl ScalePolicy {
    /// Autoscale policy for an image with the given statistics.
    pub fn auto(stats: &ImageStats) -> Self {
        Self::Auto {
            min: stats.min,
            max: stats.max,
        }
    }

    /// `(offset, factor)` such that `display = (v - offset) * factor`.
    ///
    /// A zero-width range gives factor 0, so a constant image maps to black.
    pub fn linear(&self) -> (f64, f64) {
        let (lo, hi) = match *self {
            Self::Auto { min, max } => (min, max),
            Self::Manual { lower, upper } => (lower, upper),
        };
        let range = hi - lo;
        if range == 0.0 || !range.is_finite() {
            (lo, 0.0)
        } else {
            (lo, 255.0 / range)
        }
    }
}

/// 8-bit RGBA pixels for the visible part of the image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl DisplayBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major RGBA bytes, `width * height * 4` long.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]])
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.rgba.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width as u32, self.height as u32))
    }
}

/// Render the viewport of `image` into a display buffer.
///
/// Mono images go through `policy` and the optional colormap; colour images
/// are only clamped and cast to 8 bits.
pub fn render_display(
    image: &ImageData,
    viewport: &ViewportRect,
    policy: &ScalePolicy,
    lut: Option<&Lut>,
) -> DisplayBuffer {
    if image.is_empty() || viewport.is_empty() {
        return DisplayBuffer::default();
    }
    match image {
        ImageData::Mono(data) => mono_display(data, viewport, policy, lut),
        ImageData::Rgb(data) => rgb_display(data, viewport),
    }
}

fn crop_bounds(viewport: &ViewportRect) -> (usize, usize, usize, usize) {
    let x = viewport.x.max(0) as usize;
    let y = viewport.y.max(0) as usize;
    (x, y, x + viewport.width as usize, y + viewport.height as usize)
}

fn mono_display(
    data: &Array2<f64>,
    viewport: &ViewportRect,
    policy: &ScalePolicy,
    lut: Option<&Lut>,
) -> DisplayBuffer {
    let (x1, y1, x2, y2) = crop_bounds(viewport);
    let crop = data.slice(s![y1..y2, x1..x2]);
    let (offset, factor) = policy.linear();

    let to_rgba = |v: f64| -> [u8; 4] {
        let level = to_u8((v - offset) * factor);
        match lut {
            Some(lut) => {
                let [r, g, b] = lut[level as usize];
                [r, g, b, 255]
            }
            None => [level, level, level, 255],
        }
    };

    fill_rows(crop.ncols(), crop.nrows(), |row, out| {
        write_row(crop.row(row).iter().map(|&v| to_rgba(v)), out);
    })
}

fn rgb_display(data: &Array3<f64>, viewport: &ViewportRect) -> DisplayBuffer {
    let (x1, y1, x2, y2) = crop_bounds(viewport);
    let crop = data.slice(s![y1..y2, x1..x2, ..]);
    let (h, w, _) = crop.dim();

    fill_rows(w, h, |row, out| {
        let line: ArrayView2<'_, f64> = crop.slice(s![row, .., ..]);
        write_row(
            line.outer_iter()
                .map(|px| [to_u8(px[0]), to_u8(px[1]), to_u8(px[2]), 255]),
            out,
        );
    })
}

fn write_row(pixels: impl Iterator<Item = [u8; 4]>, out: &mut [u8]) {
    for (dst, px) in out.chunks_exact_mut(4).zip(pixels) {
        dst.copy_from_slice(&px);
    }
}

/// Allocate a `width x height` buffer and fill it row by row, in parallel for
/// large crops.
fn fill_rows<F>(width: usize, height: usize, fill: F) -> DisplayBuffer
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    let mut rgba = vec![0u8; width * height * 4];
    if width > 0 {
        let stride = width * 4;
        if width * height >= PARALLEL_PIXEL_THRESHOLD {
            rgba.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(row, out)| fill(row, out));
        } else {
            rgba.chunks_mut(stride)
                .enumerate()
                .for_each(|(row, out)| fill(row, out));
        }
    }
    DisplayBuffer {
        width,
        height,
        rgba,
    }
}

fn to_u8(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_auto_range_maps_to_zero() {
        let policy = ScalePolicy::Auto { min: 7.0, max: 7.0 };
        assert_eq!(policy.linear(), (7.0, 0.0));
    }

    #[test]
    fn manual_window_clamps() {
        let data = Array2::from_shape_vec((1, 3), vec![-10.0, 50.0, 500.0]).unwrap();
        let img = ImageData::Mono(data);
        let vp = ViewportRect::full(3, 1);
        let policy = ScalePolicy::Manual {
            lower: 0.0,
            upper: 100.0,
        };
        let buf = render_display(&img, &vp, &policy, None);
        assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(buf.pixel(1, 0), Some([127, 127, 127, 255]));
        assert_eq!(buf.pixel(2, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn rgb_is_cast_without_stretch() {
        let mut data = Array3::<f64>::zeros((1, 2, 3));
        data[[0, 1, 0]] = 10.0;
        data[[0, 1, 1]] = 300.0;
        data[[0, 1, 2]] = 42.9;
        let img = ImageData::Rgb(data);
        let buf = render_display(
            &img,
            &ViewportRect::full(2, 1),
            &ScalePolicy::Auto { min: 0.0, max: 1.0 },
            None,
        );
        assert_eq!(buf.pixel(1, 0), Some([10, 255, 42, 255]));
    }

    #[test]
    fn colormap_is_applied_to_mono() {
        let data = Array2::from_elem((2, 2), 255.0);
        let img = ImageData::Mono(data);
        let mut lut = [[0u8; 3]; 256];
        lut[255] = [1, 2, 3];
        let policy = ScalePolicy::Manual {
            lower: 0.0,
            upper: 255.0,
        };
        let buf = render_display(&img, &ViewportRect::full(2, 2), &policy, Some(&lut));
        assert_eq!(buf.pixel(1, 1), Some([1, 2, 3, 255]));
    }

    #[test]
    fn crop_follows_viewport() {
        let data = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let img = ImageData::Mono(data);
        let vp = ViewportRect {
            x: 1,
            y: 2,
            width: 2,
            height: 2,
        };
        let policy = ScalePolicy::Manual {
            lower: 0.0,
            upper: 255.0,
        };
        let buf = render_display(&img, &vp, &policy, None);
        assert_eq!((buf.width(), buf.height()), (2, 2));
        assert_eq!(buf.pixel(0, 0).map(|p| p[0]), Some(9));
        assert_eq!(buf.pixel(1, 1).map(|p| p[0]), Some(14));
    }
}
