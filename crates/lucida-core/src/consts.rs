/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Wheel delta reported for one notch of a standard mouse wheel.
pub const WHEEL_NOTCH_DELTA: f64 = 120.0;

/// Smallest viewport extent (in image pixels) a zoom level may produce.
pub const ZOOM_FLOOR_PIXELS: i64 = 4;

/// Vertical space (in screen pixels) kept free below the pixmap for the status bar.
pub const DEFAULT_STATUS_BAR_RESERVE: u32 = 40;

/// Height of the status bar in screen pixels.
pub const STATUS_BAR_HEIGHT: f32 = 20.0;

/// Horizontal padding before the status text.
pub const STATUS_TEXT_PADDING: f32 = 10.0;

/// Longest side of the zoom indicator minimap, in screen pixels.
pub const ZOOM_INDICATOR_SIZE: f32 = 80.0;

/// Gap between the zoom indicator and the pixmap corner.
pub const ZOOM_INDICATOR_MARGIN: f32 = 8.0;

/// Width of the contrast pass drawn under selection rectangles.
pub const SELECTION_OUTLINE_WIDTH: f32 = 4.0;

/// Width of the accent pass drawn over selection rectangles.
pub const SELECTION_ACCENT_WIDTH: f32 = 2.0;

/// Number of entries in a colormap lookup table.
pub const LUT_SIZE: usize = 256;

/// Number of colour channels used from an RGB buffer.
pub const COLOR_CHANNEL_COUNT: usize = 3;
