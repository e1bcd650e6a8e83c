//! Text of the status bar.

use crate::image::{ImageData, ImageStats, Sample};
use crate::interaction::{DragRect, Roi};
use crate::viewport::zoom_multiplier;

const COORD_PLACEHOLDER: &str = "-";
const VALUE_PLACEHOLDER: &str = "--";

/// State the status line is built from.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusInputs<'a> {
    pub zoom_level: f64,
    pub image: Option<&'a ImageData>,
    /// Whole-image statistics, computed once per image.
    pub stats: Option<ImageStats>,
    /// Tracked pointer position, `None` while off the image.
    pub cursor: Option<(i64, i64)>,
    pub roi: Option<Roi>,
    /// Drag in progress, shown when there is no committed ROI.
    pub drag: Option<DragRect>,
}

/// `2X (12,40) = 873 | [0-4095, Mean: 1021.3] | [ROI: (10,10)-(50,60): 12-3000, Mean: 800.2]`
pub fn compose(inputs: &StatusInputs<'_>) -> String {
    let mut text = String::new();
    if inputs.zoom_level > 0.0 {
        text.push_str(&format!("{}X ", format_value(zoom_multiplier(inputs.zoom_level))));
    }

    let (mx, my, value) = cursor_readout(inputs.image, inputs.cursor);
    text.push_str(&format!("({mx},{my}) = {value} | {}", format_stats(inputs.stats)));

    let region = match (inputs.roi, inputs.drag) {
        (Some(roi), _) => Some(((roi.x1, roi.y1), (roi.x2, roi.y2), Some(roi))),
        (None, Some(drag)) => Some((drag.anchor, drag.current, drag.to_roi())),
        (None, None) => None,
    };
    if let Some(((x1, y1), (x2, y2), bounds)) = region {
        let stats = bounds.and_then(|r| {
            inputs
                .image
                .and_then(|img| img.region_stats(r.x1, r.y1, r.x2, r.y2))
        });
        text.push_str(&format!(
            " | [ROI: ({x1},{y1})-({x2},{y2}): {}",
            format_stats(stats)
        ));
    }
    text
}

/// `(x, y, value)` strings for the pixel under the cursor, with placeholders
/// when there is no cursor, no image, or the position is outside the buffer.
pub fn cursor_readout(image: Option<&ImageData>, cursor: Option<(i64, i64)>) -> (String, String, String) {
    let sample = cursor.and_then(|(x, y)| Some(((x, y), image?.sample(x, y)?)));
    match sample {
        Some(((x, y), Sample::Mono(v))) => (x.to_string(), y.to_string(), format_value(v)),
        Some(((x, y), Sample::Rgb(rgb))) => (
            x.to_string(),
            y.to_string(),
            rgb.iter().map(|v| format_value(*v)).collect::<Vec<_>>().join(","),
        ),
        None => (
            COORD_PLACEHOLDER.to_string(),
            COORD_PLACEHOLDER.to_string(),
            VALUE_PLACEHOLDER.to_string(),
        ),
    }
}

fn format_stats(stats: Option<ImageStats>) -> String {
    match stats {
        Some(s) => format!(
            "{}-{}, Mean: {:.1}]",
            format_value(s.min),
            format_value(s.max),
            s.mean
        ),
        None => format!("{VALUE_PLACEHOLDER}]"),
    }
}

/// Whole numbers without decimals, everything else with two.
pub fn format_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
