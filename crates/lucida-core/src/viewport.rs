//! Zoom levels and the visible image-space rectangle.
//!
//! Zoom level 0 shows the whole image. Each whole level halves the visible
//! extent along the axis that binds the fit; the other axis follows the
//! widget's aspect ratio so the pixmap fills the widget without distortion.

use crate::consts::{WHEEL_NOTCH_DELTA, ZOOM_FLOOR_PIXELS};

/// Image-space rectangle currently visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ViewportRect {
    /// The whole image.
    pub fn full(image_width: usize, image_height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: image_width as i64,
            height: image_height as i64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Shrink to the image if needed and slide back inside its bounds.
    pub fn clamped(self, image_width: usize, image_height: usize) -> Self {
        let (iw, ih) = (image_width as i64, image_height as i64);
        let width = self.width.clamp(0, iw);
        let height = self.height.clamp(0, ih);
        Self {
            x: self.x.min(iw - width).max(0),
            y: self.y.min(ih - height).max(0),
            width,
            height,
        }
    }

    /// Move by `(dx, dy)` image pixels, staying inside the image.
    pub fn shifted(self, dx: i64, dy: i64, image_width: usize, image_height: usize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
        .clamped(image_width, image_height)
    }

    /// Carry the origin over to an image of a different size so the same
    /// relative area stays in view.
    pub fn rescaled(self, old_size: (usize, usize), new_size: (usize, usize)) -> Self {
        Self {
            x: rescale_coord(self.x, old_size.0, new_size.0),
            y: rescale_coord(self.y, old_size.1, new_size.1),
            ..self
        }
    }
}

/// Map a coordinate proportionally from an axis of length `old` to one of length `new`.
pub fn rescale_coord(v: i64, old: usize, new: usize) -> i64 {
    if old == 0 {
        return 0;
    }
    (v as f64 / old as f64 * new as f64).round() as i64
}

/// Apply one wheel event to a zoom level.
///
/// `level' = max(0, level + round(delta / 120) / divider)`.
pub fn step_zoom(level: f64, wheel_delta: f64, divider: f64) -> f64 {
    (level + (wheel_delta / WHEEL_NOTCH_DELTA).round() / divider).max(0.0)
}

/// Magnification relative to the fitted image.
pub fn zoom_multiplier(level: f64) -> f64 {
    2f64.powf(level)
}

/// Largest level on the divider's grid that keeps both image axes at
/// `ZOOM_FLOOR_PIXELS` or more.
pub fn max_zoom_level(image_width: usize, image_height: usize, divider: f64) -> f64 {
    let min_dim = image_width.min(image_height) as f64;
    if min_dim < ZOOM_FLOOR_PIXELS as f64 {
        return 0.0;
    }
    ((min_dim / ZOOM_FLOOR_PIXELS as f64).log2() * divider).floor() / divider
}

/// Pull `level` down when it would leave fewer than `ZOOM_FLOOR_PIXELS`
/// pixels along the shorter image axis.
pub fn floor_zoom_level(level: f64, image_width: usize, image_height: usize, divider: f64) -> f64 {
    if level <= 0.0 {
        return 0.0;
    }
    let scale = zoom_multiplier(level);
    let zoom_w = (image_width as f64 / scale).round() as i64;
    let zoom_h = (image_height as f64 / scale).round() as i64;
    if zoom_w.min(zoom_h) < ZOOM_FLOOR_PIXELS {
        level.min(max_zoom_level(image_width, image_height, divider))
    } else {
        level
    }
}

/// Visible extent `(width, height)` in image pixels for `level`, with the
/// non-binding axis stretched to the target area's aspect ratio.
///
/// `area` is the screen area the pixmap is fitted into.
pub fn zoom_extent(
    level: f64,
    image_width: usize,
    image_height: usize,
    area: (f64, f64),
) -> (i64, i64) {
    let (iw, ih) = (image_width as i64, image_height as i64);
    if level <= 0.0 {
        return (iw, ih);
    }
    let scale = zoom_multiplier(level);
    let zoom_w = (image_width as f64 / scale).round() as i64;
    let zoom_h = (image_height as f64 / scale).round() as i64;

    let (area_w, area_h) = area;
    let (w, h) = if area_w <= 0.0 || area_h <= 0.0 {
        (zoom_w, zoom_h)
    } else {
        let area_aspect = area_w / area_h;
        let image_aspect = image_width as f64 / image_height as f64;
        if image_aspect >= area_aspect {
            // width binds the fit
            (zoom_w, ((zoom_w as f64 / area_aspect).round() as i64).min(ih))
        } else {
            (((zoom_h as f64 * area_aspect).round() as i64).min(iw), zoom_h)
        }
    };

    (
        w.clamp(ZOOM_FLOOR_PIXELS.min(iw), iw),
        h.clamp(ZOOM_FLOOR_PIXELS.min(ih), ih),
    )
}

/// Viewport for `level`. With an anchor the rectangle is centred on it;
/// otherwise the current origin is kept. The result is always clamped.
pub fn compute_viewport(
    level: f64,
    image_width: usize,
    image_height: usize,
    area: (f64, f64),
    current: ViewportRect,
    anchor: Option<(f64, f64)>,
) -> ViewportRect {
    if level <= 0.0 {
        return ViewportRect::full(image_width, image_height);
    }
    let (width, height) = zoom_extent(level, image_width, image_height, area);
    let (x, y) = match anchor {
        Some((ax, ay)) => (
            (ax - width as f64 / 2.0).round() as i64,
            (ay - height as f64 / 2.0).round() as i64,
        ),
        None => (current.x, current.y),
    };
    ViewportRect {
        x,
        y,
        width,
        height,
    }
    .clamped(image_width, image_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_step_rounds_notches() {
        assert_eq!(step_zoom(0.0, 120.0, 1.0), 1.0);
        assert_eq!(step_zoom(0.0, 240.0, 2.0), 1.0);
        assert_eq!(step_zoom(1.0, -360.0, 1.0), 0.0);
        // less than half a notch does nothing
        assert_eq!(step_zoom(2.0, 40.0, 1.0), 2.0);
    }

    #[test]
    fn clamped_keeps_rect_inside() {
        let vp = ViewportRect {
            x: -5,
            y: 90,
            width: 20,
            height: 20,
        };
        assert_eq!(
            vp.clamped(100, 100),
            ViewportRect {
                x: 0,
                y: 80,
                width: 20,
                height: 20
            }
        );
    }

    #[test]
    fn oversized_rect_shrinks_to_image() {
        let vp = ViewportRect {
            x: 3,
            y: 3,
            width: 50,
            height: 5,
        };
        let c = vp.clamped(10, 10);
        assert_eq!((c.x, c.width), (0, 10));
        assert_eq!((c.y, c.height), (3, 5));
    }

    #[test]
    fn max_level_for_small_images_is_zero() {
        assert_eq!(max_zoom_level(3, 100, 1.0), 0.0);
        assert_eq!(max_zoom_level(8, 8, 1.0), 1.0);
        assert_eq!(max_zoom_level(100, 100, 1.0), 4.0);
        assert_eq!(max_zoom_level(100, 100, 2.0), 4.5);
    }

    #[test]
    fn rescale_tracks_relative_origin() {
        let vp = ViewportRect {
            x: 50,
            y: 10,
            width: 10,
            height: 10,
        };
        let r = vp.rescaled((100, 100), (200, 50));
        assert_eq!((r.x, r.y), (100, 5));
    }
}
