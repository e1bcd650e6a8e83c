//! Paint pipeline.
//!
//! Order: image, overlays (insertion order), drag rectangle, committed ROI,
//! zoom indicator, status bar. Everything except the status bar is clipped to
//! the pixmap.

use crate::consts::{
    SELECTION_ACCENT_WIDTH, SELECTION_OUTLINE_WIDTH, STATUS_BAR_HEIGHT, STATUS_TEXT_PADDING,
    ZOOM_INDICATOR_MARGIN, ZOOM_INDICATOR_SIZE,
};
use crate::interaction::{DragRect, Roi};
use crate::mapper::ViewGeometry;
use crate::overlay::{Overlay, OverlayList, OverlayShape};
use crate::scaling::DisplayBuffer;
use crate::surface::{Color, DrawSurface, ScreenRect, Stroke};
use crate::viewport::ViewportRect;

const DRAG_ACCENT: Color = Color::RED;
const ROI_ACCENT: Color = Color::GREEN;
const INDICATOR_BACKGROUND: Color = Color::rgba(0, 0, 0, 128);
const INDICATOR_VIEW: Color = Color::rgba(255, 255, 0, 160);

/// Position of the current viewport within the full image, for the minimap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomIndicator {
    pub image_size: (usize, usize),
    pub viewport: ViewportRect,
}

/// Snapshot of everything one paint needs.
pub struct Scene<'a> {
    pub geometry: Option<ViewGeometry>,
    pub display: &'a DisplayBuffer,
    pub overlays: &'a OverlayList,
    /// Drag in progress, if any.
    pub drag: Option<DragRect>,
    pub roi: Option<Roi>,
    /// Set when the indicator is enabled and the view is zoomed in.
    pub zoom_indicator: Option<ZoomIndicator>,
    /// Set when the status bar is visible.
    pub status: Option<String>,
}

pub fn paint<S: DrawSurface + ?Sized>(scene: &Scene<'_>, surface: &mut S) {
    let Some(geo) = scene.geometry else {
        return;
    };
    let pixmap = geo.pixmap_rect();

    surface.set_clip_rect(Some(pixmap));
    if !scene.display.is_empty() {
        surface.draw_image(scene.display, pixmap);
    }

    for (_, overlay) in scene.overlays.iter() {
        draw_overlay(&geo, overlay, surface);
    }

    if let Some(drag) = scene.drag {
        if drag.to_roi().is_some() {
            draw_selection(&geo, drag.anchor, drag.current, DRAG_ACCENT, surface);
        }
    }

    if let Some(roi) = scene.roi {
        draw_selection(&geo, (roi.x1, roi.y1), (roi.x2, roi.y2), ROI_ACCENT, surface);
    }

    if let Some(indicator) = scene.zoom_indicator {
        draw_zoom_indicator(&indicator, pixmap, surface);
    }

    if let Some(text) = &scene.status {
        // The bar sits below the pixmap, so widen the clip down to the widget edge.
        let widget_h = geo.widget_size.1 as f32;
        surface.set_clip_rect(Some(ScreenRect::new(
            pixmap.x,
            pixmap.y,
            pixmap.width,
            (widget_h - pixmap.y).max(0.0),
        )));
        draw_status_bar(text, pixmap, widget_h, surface);
    }

    surface.set_clip_rect(None);
}

fn draw_overlay<S: DrawSurface + ?Sized>(geo: &ViewGeometry, overlay: &Overlay, surface: &mut S) {
    surface.set_stroke(overlay.stroke);
    surface.set_fill(overlay.fill);

    match &overlay.shape {
        OverlayShape::Ellipse {
            x,
            y,
            width,
            height,
        } => surface.draw_ellipse(screen_rect(geo, *x, *y, *width, *height)),
        OverlayShape::Rectangle {
            x,
            y,
            width,
            height,
        } => surface.draw_rect(screen_rect(geo, *x, *y, *width, *height)),
        OverlayShape::Point { x, y } => {
            let (sx, sy) = geo.image_to_screen(*x, *y);
            surface.draw_point(sx as f32, sy as f32);
        }
        OverlayShape::Line { x, y, dx, dy } => {
            let (sx, sy) = geo.image_to_screen(*x, *y);
            let (sw, sh) = geo.image_dims_to_screen(*dx, *dy);
            surface.draw_line(sx as f32, sy as f32, (sx + sw) as f32, (sy + sh) as f32);
        }
        OverlayShape::Text { x, y, text } => {
            let (sx, sy) = geo.image_to_screen(*x, *y);
            surface.draw_text(sx as f32, sy as f32, text);
        }
    }
}

/// Negative extents are normalised so the rect spans up/left of `(x, y)`.
fn screen_rect(geo: &ViewGeometry, x: f64, y: f64, w: f64, h: f64) -> ScreenRect {
    let (sx, sy) = geo.image_to_screen(x, y);
    let (sw, sh) = geo.image_dims_to_screen(w, h);
    ScreenRect::from_corners(sx as f32, sy as f32, (sx + sw) as f32, (sy + sh) as f32)
}

/// Rectangle between two image corners, as a dark outline with a coloured
/// line on top so it stays visible on any background.
fn draw_selection<S: DrawSurface + ?Sized>(
    geo: &ViewGeometry,
    a: (i64, i64),
    b: (i64, i64),
    accent: Color,
    surface: &mut S,
) {
    let (x1, y1) = geo.image_to_screen(a.0 as f64, a.1 as f64);
    let (x2, y2) = geo.image_to_screen(b.0 as f64, b.1 as f64);
    let rect = ScreenRect::from_corners(x1 as f32, y1 as f32, x2 as f32, y2 as f32);

    surface.set_fill(None);
    surface.set_stroke(Stroke::new(Color::BLACK, SELECTION_OUTLINE_WIDTH));
    surface.draw_rect(rect);
    surface.set_stroke(Stroke::new(accent, SELECTION_ACCENT_WIDTH));
    surface.draw_rect(rect);
}

/// Outer and inner minimap rectangles in the pixmap's top-right corner.
pub fn zoom_indicator_rects(indicator: &ZoomIndicator, pixmap: ScreenRect) -> (ScreenRect, ScreenRect) {
    let (iw, ih) = (
        indicator.image_size.0.max(1) as f32,
        indicator.image_size.1.max(1) as f32,
    );
    let scale = ZOOM_INDICATOR_SIZE / iw.max(ih);
    let (ow, oh) = (iw * scale, ih * scale);
    let outer = ScreenRect::new(
        pixmap.right() - ZOOM_INDICATOR_MARGIN - ow,
        pixmap.y + ZOOM_INDICATOR_MARGIN,
        ow,
        oh,
    );
    let vp = indicator.viewport;
    let inner = ScreenRect::new(
        outer.x + vp.x as f32 * scale,
        outer.y + vp.y as f32 * scale,
        vp.width as f32 * scale,
        vp.height as f32 * scale,
    );
    (outer, inner)
}

fn draw_zoom_indicator<S: DrawSurface + ?Sized>(
    indicator: &ZoomIndicator,
    pixmap: ScreenRect,
    surface: &mut S,
) {
    let (outer, inner) = zoom_indicator_rects(indicator, pixmap);

    surface.set_stroke(Stroke::new(Color::WHITE, 1.0));
    surface.set_fill(Some(INDICATOR_BACKGROUND));
    surface.draw_rect(outer);

    surface.set_stroke(Stroke::new(Color::YELLOW, 1.0));
    surface.set_fill(Some(INDICATOR_VIEW));
    surface.draw_rect(inner);
    surface.set_fill(None);
}

fn draw_status_bar<S: DrawSurface + ?Sized>(
    text: &str,
    pixmap: ScreenRect,
    widget_h: f32,
    surface: &mut S,
) {
    let bar = ScreenRect::new(
        pixmap.x + 1.0,
        widget_h - STATUS_BAR_HEIGHT,
        (pixmap.width - 2.0).max(0.0),
        STATUS_BAR_HEIGHT,
    );
    surface.set_fill(Some(Color::WHITE));
    surface.set_stroke(Stroke::new(Color::WHITE, 2.0));
    surface.draw_rect(bar);

    surface.set_fill(None);
    surface.set_stroke(Stroke::new(Color::BLACK, 2.0));
    surface.draw_text(pixmap.x + STATUS_TEXT_PADDING, widget_h - 5.0, text);
}
