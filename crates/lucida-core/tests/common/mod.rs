#![allow(dead_code)]

use lucida_core::Viewer;
use ndarray::Array2;

/// Default status bar reserve subtracted from the widget height.
pub const RESERVE: u32 = 40;

/// Mono image whose pixel `(x, y)` holds `y * width + x`.
pub fn ramp(width: usize, height: usize) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(r, c)| (r * width + c) as f64)
}

/// Viewer showing a ramp image with a pixmap area of `area` screen pixels.
pub fn viewer_with_ramp(width: usize, height: usize, area: (u32, u32)) -> Viewer {
    let mut viewer = Viewer::new();
    viewer.set_mono_image(ramp(width, height).view());
    viewer.set_widget_size(area.0, area.1 + RESERVE);
    viewer
}
