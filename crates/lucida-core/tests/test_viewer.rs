mod common;

use common::{ramp, viewer_with_ramp};
use lucida_core::surface::RecordingSurface;
use lucida_core::viewport::ViewportRect;
use lucida_core::{
    ChannelMode, Color, Overlay, PointerButton, Roi, Stroke, Viewer, ViewerConfig, ViewerError,
};
use ndarray::{Array2, Array3, ArrayD, IxDyn};

const PEN: Stroke = Stroke::new(Color::RED, 1.0);

fn roi(x1: i64, y1: i64, x2: i64, y2: i64) -> Roi {
    Roi { x1, y1, x2, y2 }
}

/// 100x100 ramp at scale 1; image `(x, y)` is at screen `(x, y + 20)`.
fn unit_viewer() -> Viewer {
    viewer_with_ramp(100, 100, (100, 100))
}

fn drag(viewer: &mut Viewer, from: (f64, f64), to: (f64, f64)) {
    viewer.pointer_pressed(PointerButton::Primary, from.0, from.1);
    viewer.pointer_moved(to.0, to.1);
    viewer.pointer_released(PointerButton::Primary, to.0, to.1);
}

// ---------------------------------------------------------------------------
// ROI selection
// ---------------------------------------------------------------------------

#[test]
fn test_drag_commits_roi_with_stats() {
    let mut viewer = unit_viewer();
    viewer.set_status_bar(true);

    viewer.pointer_pressed(PointerButton::Primary, 10.0, 30.0);
    viewer.pointer_moved(50.0, 80.0);
    let rect = viewer.drag_rect().unwrap();
    assert_eq!((rect.anchor, rect.current), ((10, 10), (50, 60)));
    viewer.pointer_released(PointerButton::Primary, 50.0, 80.0);

    assert_eq!(viewer.roi(), Some(roi(10, 10, 50, 60)));
    assert!(viewer.drag_rect().is_none());
    let status = viewer.status_text().unwrap();
    assert!(
        status.ends_with("[ROI: (10,10)-(50,60): 1010-5949, Mean: 3479.5]"),
        "got: {status}"
    );
}

#[test]
fn test_drag_in_reverse_is_normalised() {
    let mut viewer = unit_viewer();
    drag(&mut viewer, (50.0, 80.0), (10.0, 30.0));
    assert_eq!(viewer.roi(), Some(roi(10, 10, 50, 60)));
}

#[test]
fn test_zero_width_drag_leaves_no_roi() {
    let mut viewer = unit_viewer();
    drag(&mut viewer, (10.0, 30.0), (10.0, 70.0));
    assert_eq!(viewer.roi(), None);
}

#[test]
fn test_new_drag_clears_previous_roi() {
    let mut viewer = unit_viewer();
    drag(&mut viewer, (10.0, 30.0), (50.0, 80.0));
    assert!(viewer.roi().is_some());
    viewer.pointer_pressed(PointerButton::Primary, 70.0, 90.0);
    assert_eq!(viewer.roi(), None);
}

#[test]
fn test_drag_corner_freezes_outside_image() {
    let mut viewer = viewer_with_ramp(100, 100, (200, 100));
    // pixmap spans x 50..150
    viewer.pointer_pressed(PointerButton::Primary, 60.0, 30.0);
    viewer.pointer_moved(90.0, 60.0);
    viewer.pointer_moved(190.0, 90.0);
    let rect = viewer.drag_rect().unwrap();
    assert_eq!(rect.current, (40, 40));
}

#[test]
fn test_press_outside_image_starts_nothing() {
    let mut viewer = viewer_with_ramp(100, 100, (200, 100));
    viewer.pointer_pressed(PointerButton::Primary, 10.0, 30.0);
    assert!(viewer.drag_rect().is_none());
}

#[test]
fn test_disabling_roi_clears_it() {
    let mut viewer = unit_viewer();
    drag(&mut viewer, (10.0, 30.0), (50.0, 80.0));
    viewer.set_roi_enabled(false);
    assert_eq!(viewer.roi(), None);

    drag(&mut viewer, (10.0, 30.0), (50.0, 80.0));
    assert_eq!(viewer.roi(), None);
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[test]
fn test_status_reports_cursor_value() {
    let mut viewer = unit_viewer();
    viewer.pointer_moved(25.5, 30.5);
    assert_eq!(
        viewer.status_text().unwrap(),
        "(25,10) = 1025 | [0-9999, Mean: 4999.5]"
    );
}

#[test]
fn test_status_shows_zoom_multiplier() {
    let mut viewer = unit_viewer();
    viewer.wheel(240.0, 50.0, 70.0);
    let status = viewer.status_text().unwrap();
    assert!(status.starts_with("4X "), "got: {status}");
}

#[test]
fn test_status_placeholders_off_image() {
    let mut viewer = viewer_with_ramp(100, 100, (200, 100));
    viewer.pointer_moved(5.0, 30.0);
    assert!(viewer.status_text().unwrap().starts_with("(-,-) = -- |"));
}

#[test]
fn test_no_status_without_image() {
    assert!(Viewer::new().status_text().is_none());
}

// ---------------------------------------------------------------------------
// Intensity scaling and colour
// ---------------------------------------------------------------------------

#[test]
fn test_manual_window_scales_and_clamps() {
    let mut viewer = Viewer::new();
    viewer.set_widget_size(30, 50);
    viewer.set_auto_scale(false);
    viewer.set_display_range(50.0, 100.0);
    viewer.set_mono_image(Array2::from_shape_vec((1, 3), vec![75u16, 0, 200]).unwrap().view());

    let display = viewer.display_buffer();
    assert_eq!(display.pixel(0, 0), Some([127, 127, 127, 255]));
    assert_eq!(display.pixel(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(display.pixel(2, 0), Some([255, 255, 255, 255]));
    assert_eq!(viewer.display_range(), (50.0, 100.0));
}

#[test]
fn test_autoscale_stretches_to_full_range() {
    let viewer = viewer_with_ramp(10, 10, (10, 10));
    let display = viewer.display_buffer();
    assert_eq!(display.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(display.pixel(9, 9), Some([255, 255, 255, 255]));
}

#[test]
fn test_constant_image_autoscale_and_manual_window() {
    let flat = Array2::<f64>::from_elem((100, 100), 128.0);
    let mut viewer = Viewer::new();
    viewer.set_widget_size(100, 140);
    viewer.set_mono_image(flat.view());
    assert!(viewer
        .display_buffer()
        .rgba()
        .chunks_exact(4)
        .all(|p| p == &[0, 0, 0, 255]));

    viewer.set_auto_scale(false);
    viewer.set_display_range(0.0, 255.0);
    assert!(viewer
        .display_buffer()
        .rgba()
        .chunks_exact(4)
        .all(|p| p == &[128, 128, 128, 255]));
}

#[test]
fn test_autoscale_is_idempotent() {
    let mut viewer = viewer_with_ramp(64, 48, (128, 96));
    let first = viewer.display_buffer().rgba().to_vec();
    viewer.set_mono_image(ramp(64, 48).view());
    assert_eq!(viewer.display_buffer().rgba(), first.as_slice());
}

#[test]
fn test_non_finite_display_range_is_ignored() {
    let mut viewer = Viewer::new();
    viewer.set_display_range(f64::NAN, 10.0);
    assert_eq!(viewer.display_range(), (0.0, 255.0));
}

#[test]
fn test_rgb_image_is_clamped_not_scaled() {
    let mut data = Array3::<f64>::zeros((1, 1, 3));
    data[[0, 0, 0]] = 300.0;
    data[[0, 0, 1]] = -5.0;
    data[[0, 0, 2]] = 128.0;

    let mut viewer = Viewer::new();
    viewer.set_widget_size(10, 50);
    viewer.set_rgb_image(data.view()).unwrap();

    assert_eq!(viewer.channel_mode(), Some(ChannelMode::Rgb));
    assert_eq!(viewer.display_buffer().pixel(0, 0), Some([255, 0, 128, 255]));
}

#[test]
fn test_colormap_applies_to_mono() {
    let mut viewer = viewer_with_ramp(10, 10, (10, 10));
    viewer.set_colormap(Some("hot"));
    assert_eq!(viewer.config().colormap.as_deref(), Some("hot"));
    assert_eq!(viewer.display_buffer().pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(viewer.display_buffer().pixel(9, 9), Some([255, 255, 255, 255]));

    viewer.set_colormap(Some("no-such-map"));
    assert_eq!(viewer.config().colormap.as_deref(), Some("hot"));

    viewer.set_colormap(None);
    assert_eq!(viewer.config().colormap, None);
}

#[test]
fn test_rejects_unsupported_shapes() {
    let mut viewer = Viewer::new();
    let flat = ArrayD::<f64>::zeros(IxDyn(&[5]));
    assert!(matches!(
        viewer.set_image(flat.view()),
        Err(ViewerError::UnsupportedShape { ndim: 1 })
    ));
    let two_channels = ArrayD::<f64>::zeros(IxDyn(&[4, 4, 2]));
    assert!(matches!(
        viewer.set_image(two_channels.view()),
        Err(ViewerError::TooFewChannels { channels: 2 })
    ));
    assert!(viewer.image().is_none());
}

#[test]
fn test_set_image_dispatches_on_dimensionality() {
    let mut viewer = Viewer::new();
    viewer.set_image(ArrayD::<u8>::zeros(IxDyn(&[4, 6])).view()).unwrap();
    assert_eq!(viewer.channel_mode(), Some(ChannelMode::Mono));
    assert_eq!(viewer.image_size(), Some((6, 4)));

    viewer.set_image(ArrayD::<f32>::zeros(IxDyn(&[4, 6, 4])).view()).unwrap();
    assert_eq!(viewer.channel_mode(), Some(ChannelMode::Rgb));
}

// ---------------------------------------------------------------------------
// Image replacement
// ---------------------------------------------------------------------------

#[test]
fn test_same_size_replacement_keeps_view() {
    let mut viewer = viewer_with_ramp(200, 100, (400, 200));
    viewer.wheel(120.0, 200.0, 120.0);
    drag(&mut viewer, (100.0, 60.0), (300.0, 180.0));
    let (vp, r) = (viewer.viewport(), viewer.roi());
    assert!(r.is_some());

    viewer.set_mono_image(Array2::<f64>::ones((100, 200)).view());
    assert_eq!(viewer.viewport(), vp);
    assert_eq!(viewer.roi(), r);
    assert_eq!(viewer.zoom_level(), 1.0);
}

#[test]
fn test_resized_image_rescales_roi_and_viewport() {
    let mut viewer = unit_viewer();
    drag(&mut viewer, (10.0, 30.0), (50.0, 80.0));
    viewer.set_mono_image(ramp(200, 200).view());
    assert_eq!(viewer.roi(), Some(roi(20, 20, 100, 120)));
    assert_eq!(viewer.viewport(), ViewportRect::full(200, 200));
}

#[test]
fn test_empty_image_is_harmless() {
    let mut viewer = Viewer::new();
    viewer.set_widget_size(100, 100);
    viewer.set_mono_image(Array2::<f64>::zeros((0, 0)).view());

    assert!(viewer.display_buffer().is_empty());
    assert!(viewer.geometry().is_none());
    assert_eq!(viewer.pointer_moved(10.0, 10.0), None);
    viewer.wheel(120.0, 10.0, 10.0);
    assert_eq!(viewer.zoom_level(), 0.0);

    let mut surface = RecordingSurface::new();
    viewer.paint(&mut surface);
    assert!(surface.commands.is_empty());
}

// ---------------------------------------------------------------------------
// Overlays, repaint requests and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_overlay_add_and_remove() {
    let mut viewer = unit_viewer();
    let a = viewer.add_overlay(Overlay::point(1.0, 1.0, PEN)).unwrap();
    let b = viewer
        .add_overlay(Overlay::ellipse(5.0, 5.0, 4.0, 2.0, PEN, None))
        .unwrap();
    assert_eq!(viewer.num_overlays(), 2);

    assert!(viewer.remove_overlay(a));
    assert!(!viewer.remove_overlay(a));
    assert!(viewer.overlay(b).is_some());

    viewer.clear_overlays();
    assert_eq!(viewer.num_overlays(), 0);
}

#[test]
fn test_malformed_overlay_is_rejected() {
    let mut viewer = unit_viewer();
    assert!(viewer
        .add_overlay(Overlay::rectangle(f64::INFINITY, 0.0, 1.0, 1.0, PEN, None))
        .is_none());
    assert_eq!(viewer.num_overlays(), 0);
}

#[test]
fn test_repaint_requested_once_per_change() {
    let mut viewer = unit_viewer();
    assert!(viewer.take_repaint_request());
    assert!(!viewer.take_repaint_request());

    viewer.add_overlay(Overlay::point(1.0, 1.0, PEN));
    assert!(viewer.take_repaint_request());

    viewer.wheel(120.0, 50.0, 70.0);
    assert!(viewer.take_repaint_request());
}

#[test]
fn test_with_config_applies_options() {
    let config = ViewerConfig {
        auto_scale: false,
        display_min: 10.0,
        display_max: 20.0,
        zoom_step_divider: 4.0,
        status_bar_visible: true,
        colormap: Some("viridis".into()),
        ..ViewerConfig::default()
    };
    let viewer = Viewer::with_config(config.clone());
    assert_eq!(viewer.config(), &config);
}

#[test]
fn test_with_config_skips_invalid_values() {
    let config = ViewerConfig {
        zoom_step_divider: 0.0,
        colormap: Some("unknown".into()),
        ..ViewerConfig::default()
    };
    let viewer = Viewer::with_config(config);
    assert_eq!(viewer.config().zoom_step_divider, 1.0);
    assert_eq!(viewer.config().colormap, None);
}
