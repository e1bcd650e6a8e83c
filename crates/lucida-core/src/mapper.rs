//! Conversion between widget (screen) pixels and image pixels.
//!
//! The display buffer is scaled into a pixmap that keeps its aspect ratio and
//! is centred in the widget, so both directions account for the letterbox
//! offset `(widget - pixmap) / 2`. Nothing here is cached: callers build a
//! fresh [`ViewGeometry`] from the current state every time.

use crate::surface::ScreenRect;
use crate::viewport::ViewportRect;

/// Everything the coordinate conversions depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewGeometry {
    pub viewport: ViewportRect,
    /// Display buffer size `(width, height)`.
    pub buffer_size: (usize, usize),
    /// Scaled pixmap size `(width, height)` in screen pixels.
    pub pixmap_size: (u32, u32),
    /// Widget size `(width, height)` in screen pixels.
    pub widget_size: (u32, u32),
}

impl ViewGeometry {
    /// `None` when there is nothing rendered to map against.
    pub fn new(
        viewport: ViewportRect,
        buffer_size: (usize, usize),
        pixmap_size: (u32, u32),
        widget_size: (u32, u32),
    ) -> Option<Self> {
        if buffer_size.0 == 0 || buffer_size.1 == 0 || pixmap_size.0 == 0 || pixmap_size.1 == 0 {
            return None;
        }
        Some(Self {
            viewport,
            buffer_size,
            pixmap_size,
            widget_size,
        })
    }

    /// Top-left corner of the pixmap relative to the widget.
    pub fn offsets(&self) -> (f64, f64) {
        (
            (self.widget_size.0 as f64 - self.pixmap_size.0 as f64) / 2.0,
            (self.widget_size.1 as f64 - self.pixmap_size.1 as f64) / 2.0,
        )
    }

    pub fn pixmap_rect(&self) -> ScreenRect {
        let (x, y) = self.offsets();
        ScreenRect::new(
            x as f32,
            y as f32,
            self.pixmap_size.0 as f32,
            self.pixmap_size.1 as f32,
        )
    }

    fn screen_to_image_f64(&self, x: f64, y: f64) -> (f64, f64) {
        let (x_off, y_off) = self.offsets();
        (
            (x - x_off) / self.pixmap_size.0 as f64 * self.buffer_size.0 as f64
                + self.viewport.x as f64,
            (y - y_off) / self.pixmap_size.1 as f64 * self.buffer_size.1 as f64
                + self.viewport.y as f64,
        )
    }

    /// Image pixel containing the screen point (used for cursor tracking).
    pub fn screen_to_image(&self, x: f64, y: f64) -> (i64, i64) {
        let (ix, iy) = self.screen_to_image_f64(x, y);
        (ix.floor() as i64, iy.floor() as i64)
    }

    /// Nearest pixel boundary to the screen point (used for ROI corners).
    pub fn screen_to_image_nearest(&self, x: f64, y: f64) -> (i64, i64) {
        let (ix, iy) = self.screen_to_image_f64(x, y);
        (ix.round() as i64, iy.round() as i64)
    }

    pub fn image_to_screen(&self, x: f64, y: f64) -> (i64, i64) {
        let (x_off, y_off) = self.offsets();
        (
            ((x - self.viewport.x as f64) * self.pixmap_size.0 as f64
                / self.buffer_size.0 as f64
                + x_off)
                .round() as i64,
            ((y - self.viewport.y as f64) * self.pixmap_size.1 as f64
                / self.buffer_size.1 as f64
                + y_off)
                .round() as i64,
        )
    }

    /// Convert an image-space extent to a screen-space extent.
    pub fn image_dims_to_screen(&self, w: f64, h: f64) -> (i64, i64) {
        (
            (w * self.pixmap_size.0 as f64 / self.buffer_size.0 as f64).round() as i64,
            (h * self.pixmap_size.1 as f64 / self.buffer_size.1 as f64).round() as i64,
        )
    }
}

/// Scale `source` to the largest size fitting `target` with the same aspect
/// ratio (integer arithmetic, as a raster toolkit would do it).
///
/// `None` if either size is empty.
pub fn fit_keep_aspect(source: (usize, usize), target: (u32, u32)) -> Option<(u32, u32)> {
    let (sw, sh) = (source.0 as u64, source.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return None;
    }
    let width_for_full_height = th * sw / sh;
    let (w, h) = if width_for_full_height <= tw {
        (width_for_full_height, th)
    } else {
        (tw, tw * sh / sw)
    };
    Some((w.max(1) as u32, h.max(1) as u32))
}
