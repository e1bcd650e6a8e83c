//! The viewer: owns the image, the view state and the interaction state, and
//! turns host events into state changes and paint calls.
//!
//! Everything is driven by the host: it forwards pointer, wheel and resize
//! events, calls [`Viewer::paint`] with its drawing surface when asked to
//! repaint, and polls [`Viewer::take_repaint_request`] to find out when.

use ndarray::{ArrayView2, ArrayView3, ArrayViewD};
use num_traits::AsPrimitive;
use tracing::{debug, info, trace, warn};

use crate::colormap::{BuiltinColormaps, ColormapResolver, Lut};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::image::{ChannelMode, ImageData, ImageStats};
use crate::interaction::{
    transition, DragRect, Effect, InteractionState, PointerButton, PointerContext, PointerEvent,
    Roi,
};
use crate::mapper::{fit_keep_aspect, ViewGeometry};
use crate::overlay::{Overlay, OverlayId, OverlayList};
use crate::render::{self, Scene, ZoomIndicator};
use crate::scaling::{render_display, DisplayBuffer, ScalePolicy};
use crate::status::{self, StatusInputs};
use crate::surface::{DrawSurface, ScreenRect};
use crate::viewport::{
    compute_viewport, floor_zoom_level, rescale_coord, step_zoom, ViewportRect,
};

pub struct Viewer {
    config: ViewerConfig,
    colormaps: Box<dyn ColormapResolver>,
    lut: Option<Lut>,

    image: Option<ImageData>,
    stats: Option<ImageStats>,
    /// Size of the previous image, for carrying view state across a resize.
    last_size: Option<(usize, usize)>,

    viewport: ViewportRect,
    zoom_level: f64,
    /// Image point the next zoom pass centres the viewport on.
    zoom_anchor: Option<(f64, f64)>,
    display: DisplayBuffer,
    /// Bumped every time `display` is rebuilt.
    display_generation: u64,
    pixmap_size: Option<(u32, u32)>,
    widget_size: (u32, u32),

    interaction: InteractionState,
    roi: Option<Roi>,
    cursor: Option<(i64, i64)>,
    overlays: OverlayList,
    repaint_requested: bool,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer {
    pub fn new() -> Self {
        Self {
            config: ViewerConfig::default(),
            colormaps: Box::new(BuiltinColormaps),
            lut: None,
            image: None,
            stats: None,
            last_size: None,
            viewport: ViewportRect::default(),
            zoom_level: 0.0,
            zoom_anchor: None,
            display: DisplayBuffer::default(),
            display_generation: 0,
            pixmap_size: None,
            widget_size: (0, 0),
            interaction: InteractionState::Idle,
            roi: None,
            cursor: None,
            overlays: OverlayList::new(),
            repaint_requested: false,
        }
    }

    /// Viewer with every option of `config` applied through the setters, so
    /// invalid values are ignored the same way.
    pub fn with_config(config: ViewerConfig) -> Self {
        let mut viewer = Self::new();
        viewer.apply_config(&config);
        viewer
    }

    /// Replace the colormap source. The current colormap name is resolved
    /// again against it.
    pub fn with_colormaps(mut self, resolver: impl ColormapResolver + 'static) -> Self {
        self.colormaps = Box::new(resolver);
        let name = self.config.colormap.take();
        self.lut = None;
        self.set_colormap(name.as_deref());
        self
    }

    pub fn apply_config(&mut self, config: &ViewerConfig) {
        self.set_auto_scale(config.auto_scale);
        self.set_display_range(config.display_min, config.display_max);
        self.set_zoom_step_divider(config.zoom_step_divider);
        self.set_zoom_enabled(config.zoom_enabled);
        self.set_zoom_indicator_enabled(config.zoom_indicator_enabled);
        self.set_roi_enabled(config.roi_enabled);
        self.set_status_bar(config.status_bar_visible);
        self.set_status_bar_reserve(config.status_bar_reserve);
        self.set_colormap(config.colormap.as_deref());
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Image
    // ------------------------------------------------------------------

    /// Replace the image with a 2-D (mono) or 3-D (colour, last axis the
    /// channels) buffer of any numeric type.
    pub fn set_image<T: AsPrimitive<f64>>(&mut self, buffer: ArrayViewD<'_, T>) -> Result<()> {
        let data = ImageData::from_dyn(buffer)?;
        self.set_image_data(data);
        Ok(())
    }

    pub fn set_mono_image<T: AsPrimitive<f64>>(&mut self, buffer: ArrayView2<'_, T>) {
        self.set_image_data(ImageData::mono(buffer));
    }

    pub fn set_rgb_image<T: AsPrimitive<f64>>(&mut self, buffer: ArrayView3<'_, T>) -> Result<()> {
        let data = ImageData::rgb(buffer)?;
        self.set_image_data(data);
        Ok(())
    }

    pub fn set_image_data(&mut self, data: ImageData) {
        let new_size = (data.width(), data.height());
        if let Some(old_size) = self.last_size {
            if old_size != new_size && !data.is_empty() && old_size.0 > 0 && old_size.1 > 0 {
                self.carry_over_view_state(old_size, new_size);
            }
        }

        self.stats = data.stats();
        info!(
            width = new_size.0,
            height = new_size.1,
            mode = %data.mode(),
            "Image replaced"
        );
        self.image = Some(data);
        self.last_size = Some(new_size);
        self.refresh();
    }

    /// Scale the viewport, ROI and drag to a new image size.
    fn carry_over_view_state(&mut self, old_size: (usize, usize), new_size: (usize, usize)) {
        self.viewport = self.viewport.rescaled(old_size, new_size);
        self.roi = self.roi.and_then(|roi| roi.rescaled(old_size, new_size));
        self.interaction = match self.interaction {
            InteractionState::DraggingRoi(drag) => {
                InteractionState::DraggingRoi(drag.rescaled(old_size, new_size))
            }
            InteractionState::Panning { anchor } => InteractionState::Panning {
                anchor: (
                    rescale_coord(anchor.0, old_size.0, new_size.0),
                    rescale_coord(anchor.1, old_size.1, new_size.1),
                ),
            },
            InteractionState::Idle => InteractionState::Idle,
        };
        self.cursor = None;
        debug!(?old_size, ?new_size, viewport = ?self.viewport, "View state rescaled");
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn image_size(&self) -> Option<(usize, usize)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }

    pub fn channel_mode(&self) -> Option<ChannelMode> {
        self.image.as_ref().map(ImageData::mode)
    }

    pub fn image_stats(&self) -> Option<ImageStats> {
        self.stats
    }

    // ------------------------------------------------------------------
    // Display options
    // ------------------------------------------------------------------

    pub fn set_auto_scale(&mut self, enabled: bool) {
        self.config.auto_scale = enabled;
        self.refresh();
    }

    /// Manual display window. Non-finite bounds are ignored.
    pub fn set_display_range(&mut self, lower: f64, upper: f64) {
        if !lower.is_finite() || !upper.is_finite() {
            warn!(lower, upper, "Ignoring non-finite display range");
            return;
        }
        self.config.display_min = lower;
        self.config.display_max = upper;
        self.refresh();
    }

    pub fn display_range(&self) -> (f64, f64) {
        (self.config.display_min, self.config.display_max)
    }

    /// Colormap for mono images by name, `None` for plain grayscale.
    /// Unknown names leave the current colormap in place.
    pub fn set_colormap(&mut self, name: Option<&str>) {
        match name {
            None => {
                self.config.colormap = None;
                self.lut = None;
            }
            Some(name) => match self.colormaps.resolve(name) {
                Some(lut) => {
                    self.config.colormap = Some(name.to_string());
                    self.lut = Some(lut);
                }
                None => {
                    warn!(name, "Unknown colormap, keeping the current one");
                    return;
                }
            },
        }
        self.refresh();
    }

    pub fn colormap_names(&self) -> Vec<String> {
        self.colormaps.names()
    }

    pub fn set_status_bar(&mut self, visible: bool) {
        self.config.status_bar_visible = visible;
        self.request_repaint();
    }

    /// Screen pixels kept free below the pixmap.
    pub fn set_status_bar_reserve(&mut self, pixels: u32) {
        self.config.status_bar_reserve = pixels;
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Disabling zoom also drops back to the fitted view.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.config.zoom_enabled = enabled;
        if !enabled {
            self.zoom_level = 0.0;
        }
        self.refresh();
    }

    pub fn set_zoom_indicator_enabled(&mut self, enabled: bool) {
        self.config.zoom_indicator_enabled = enabled;
        self.request_repaint();
    }

    /// Wheel notches per doubling. Values that are not positive are ignored.
    pub fn set_zoom_step_divider(&mut self, divider: f64) {
        if !(divider.is_finite() && divider > 0.0) {
            warn!(divider, "Ignoring non-positive zoom step divider");
            return;
        }
        self.config.zoom_step_divider = divider;
    }

    /// Jump to `level`, keeping the centre of the current view.
    pub fn set_zoom_level(&mut self, level: f64) {
        if !level.is_finite() || level < 0.0 {
            warn!(level, "Ignoring invalid zoom level");
            return;
        }
        if !self.config.zoom_enabled {
            return;
        }
        if self.image.is_some() && level > 0.0 {
            self.zoom_anchor = Some(self.viewport.center());
        }
        self.zoom_level = level;
        debug!(level, "Zoom level set");
        self.refresh();
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom_level(0.0);
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    /// Wheel input at widget position `(x, y)`. Only acts while the pointer
    /// is over the image; the new view is centred on the pixel under it.
    pub fn wheel(&mut self, delta: f64, x: f64, y: f64) {
        if !self.config.zoom_enabled {
            return;
        }
        let ctx = self.pointer_context(x, y);
        let Some((ix, iy)) = ctx.cursor() else {
            return;
        };
        let level = step_zoom(self.zoom_level, delta, self.config.zoom_step_divider);
        debug!(from = self.zoom_level, to = level, anchor = ?(ix, iy), "Wheel zoom");
        self.zoom_level = level;
        self.zoom_anchor = Some((ix as f64, iy as f64));
        self.refresh();
    }

    // ------------------------------------------------------------------
    // ROI and overlays
    // ------------------------------------------------------------------

    /// Disabling ROI selection drops the committed ROI and any drag.
    pub fn set_roi_enabled(&mut self, enabled: bool) {
        self.config.roi_enabled = enabled;
        if !enabled {
            self.roi = None;
            if matches!(self.interaction, InteractionState::DraggingRoi(_)) {
                self.interaction = InteractionState::Idle;
            }
        }
        self.request_repaint();
    }

    pub fn roi(&self) -> Option<Roi> {
        self.roi
    }

    pub fn clear_roi(&mut self) {
        if self.roi.take().is_some() {
            debug!("ROI cleared");
            self.request_repaint();
        }
    }

    /// Drag in progress, if any.
    pub fn drag_rect(&self) -> Option<DragRect> {
        match self.interaction {
            InteractionState::DraggingRoi(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    /// Add an overlay on top of the existing ones. Malformed overlays are
    /// dropped and yield `None`.
    pub fn add_overlay(&mut self, overlay: Overlay) -> Option<OverlayId> {
        let id = self.overlays.add(overlay);
        match id {
            Some(id) => {
                trace!(?id, "Overlay added");
                self.request_repaint();
            }
            None => warn!("Ignoring overlay with non-finite or negative geometry"),
        }
        id
    }

    /// `true` if the overlay was present.
    pub fn remove_overlay(&mut self, id: OverlayId) -> bool {
        let removed = self.overlays.remove(id).is_some();
        if removed {
            self.request_repaint();
        }
        removed
    }

    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
        self.request_repaint();
    }

    pub fn num_overlays(&self) -> usize {
        self.overlays.len()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id)
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> {
        self.overlays.iter()
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer moved to widget position `(x, y)`.
    ///
    /// Returns the image pixel under the pointer when it is over the image,
    /// which hosts use to react to cursor movement.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Option<(i64, i64)> {
        let ctx = self.pointer_context(x, y);
        self.cursor = ctx.cursor();
        if let Effect::Pan { .. } = self.dispatch(PointerEvent::Move, &ctx) {
            // The view moved under the pointer, so map it again.
            let ctx = self.pointer_context(x, y);
            self.cursor = ctx.cursor();
            if let (InteractionState::Panning { .. }, Some(anchor)) = (self.interaction, ctx.raw) {
                self.interaction = InteractionState::Panning { anchor };
            }
        }

        trace!(x, y, cursor = ?self.cursor, "Pointer moved");
        if self.config.status_bar_visible {
            self.request_repaint();
        }
        self.cursor
    }

    pub fn pointer_pressed(&mut self, button: PointerButton, x: f64, y: f64) {
        let ctx = self.pointer_context(x, y);
        self.dispatch(PointerEvent::Press(button), &ctx);
    }

    pub fn pointer_released(&mut self, button: PointerButton, x: f64, y: f64) {
        let ctx = self.pointer_context(x, y);
        self.dispatch(PointerEvent::Release(button), &ctx);
    }

    /// Pixel under the pointer as of the last move, `None` while off the image.
    pub fn cursor(&self) -> Option<(i64, i64)> {
        self.cursor
    }

    fn pointer_context(&self, x: f64, y: f64) -> PointerContext {
        let roi_enabled = self.config.roi_enabled;
        let Some(geo) = self.geometry() else {
            return PointerContext {
                roi_enabled,
                ..PointerContext::default()
            };
        };
        let raw = geo.screen_to_image(x, y);
        let over_image = self
            .image_size()
            .is_some_and(|(w, h)| raw.0 >= 0 && raw.1 >= 0 && raw.0 < w as i64 && raw.1 < h as i64);
        PointerContext {
            raw: Some(raw),
            nearest: over_image.then(|| geo.screen_to_image_nearest(x, y)),
            over_image,
            roi_enabled,
        }
    }

    /// Run one event through the state machine and apply its effect.
    fn dispatch(&mut self, event: PointerEvent, ctx: &PointerContext) -> Effect {
        let next = transition(self.interaction, event, ctx);
        if next.state != self.interaction {
            debug!(from = ?self.interaction, to = ?next.state, ?event, "Interaction state changed");
        }
        self.interaction = next.state;

        match next.effect {
            Effect::None => {}
            Effect::Pan { dx, dy } => {
                if let Some((w, h)) = self.image_size() {
                    let shifted = self.viewport.shifted(dx, dy, w, h);
                    if shifted != self.viewport {
                        debug!(dx, dy, viewport = ?shifted, "Pan");
                        self.viewport = shifted;
                        self.refresh();
                    }
                }
            }
            Effect::ClearRoi => {
                self.roi = None;
            }
            Effect::CommitRoi(roi) => {
                debug!(?roi, "ROI committed");
                self.roi = roi;
            }
        }
        if next.effect != Effect::None || matches!(self.interaction, InteractionState::DraggingRoi(_)) {
            self.request_repaint();
        }
        next.effect
    }

    // ------------------------------------------------------------------
    // Geometry and mapping
    // ------------------------------------------------------------------

    /// Host widget resized.
    pub fn set_widget_size(&mut self, width: u32, height: u32) {
        if self.widget_size == (width, height) {
            return;
        }
        trace!(width, height, "Widget resized");
        self.widget_size = (width, height);
        self.refresh();
    }

    pub fn widget_size(&self) -> (u32, u32) {
        self.widget_size
    }

    /// Current mapping between widget and image, `None` until something has
    /// been rendered into a non-empty pixmap.
    pub fn geometry(&self) -> Option<ViewGeometry> {
        ViewGeometry::new(
            self.viewport,
            (self.display.width(), self.display.height()),
            self.pixmap_size?,
            self.widget_size,
        )
    }

    pub fn pixmap_rect(&self) -> Option<ScreenRect> {
        self.geometry().map(|g| g.pixmap_rect())
    }

    pub fn display_buffer(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Changes whenever the display buffer is rebuilt, so hosts can cache
    /// the uploaded texture.
    pub fn display_generation(&self) -> u64 {
        self.display_generation
    }

    pub fn screen_to_image(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        self.geometry().map(|g| g.screen_to_image(x, y))
    }

    pub fn screen_to_image_nearest(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        self.geometry().map(|g| g.screen_to_image_nearest(x, y))
    }

    pub fn image_to_screen(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        self.geometry().map(|g| g.image_to_screen(x, y))
    }

    pub fn image_dims_to_screen(&self, w: f64, h: f64) -> Option<(i64, i64)> {
        self.geometry().map(|g| g.image_dims_to_screen(w, h))
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn pixmap_area(&self) -> (u32, u32) {
        (
            self.widget_size.0,
            self.widget_size.1.saturating_sub(self.config.status_bar_reserve),
        )
    }

    fn scale_policy(&self) -> ScalePolicy {
        let manual = ScalePolicy::Manual {
            lower: self.config.display_min,
            upper: self.config.display_max,
        };
        match (self.config.auto_scale, &self.stats) {
            (true, Some(stats)) => ScalePolicy::auto(stats),
            _ => manual,
        }
    }

    /// Recompute the zoom level, viewport, display buffer and pixmap size from
    /// the current state, then ask for a repaint.
    fn refresh(&mut self) {
        let Some(image) = self.image.as_ref().filter(|img| !img.is_empty()) else {
            self.display = DisplayBuffer::default();
            self.display_generation += 1;
            self.pixmap_size = None;
            self.request_repaint();
            return;
        };
        let (w, h) = (image.width(), image.height());

        let requested = if self.config.zoom_enabled { self.zoom_level } else { 0.0 };
        let level = floor_zoom_level(requested, w, h, self.config.zoom_step_divider);
        if level != requested {
            debug!(requested, level, "Zoom level limited by image size");
        }

        let area = self.pixmap_area();
        let viewport = compute_viewport(
            level,
            w,
            h,
            (area.0 as f64, area.1 as f64),
            self.viewport,
            self.zoom_anchor.take(),
        );
        let lut = match image.mode() {
            ChannelMode::Mono => self.lut.as_ref(),
            ChannelMode::Rgb => None,
        };
        let display = render_display(image, &viewport, &self.scale_policy(), lut);
        let pixmap_size = fit_keep_aspect((display.width(), display.height()), area);

        self.zoom_level = level;
        self.viewport = viewport;
        self.display = display;
        self.display_generation += 1;
        self.pixmap_size = pixmap_size;
        self.request_repaint();
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// `true` once after any change that needs a repaint.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Current status line, `None` without an image.
    pub fn status_text(&self) -> Option<String> {
        let image = self.image.as_ref()?;
        Some(status::compose(&StatusInputs {
            zoom_level: self.zoom_level,
            image: Some(image),
            stats: self.stats,
            cursor: self.cursor,
            roi: self.roi,
            drag: self.drag_rect(),
        }))
    }

    /// Paint the full layer stack onto `surface`.
    pub fn paint<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let zoom_indicator = match self.image_size() {
            Some(image_size) if self.config.zoom_indicator_enabled && self.zoom_level > 0.0 => {
                Some(ZoomIndicator {
                    image_size,
                    viewport: self.viewport,
                })
            }
            _ => None,
        };
        let status = if self.config.status_bar_visible {
            self.status_text()
        } else {
            None
        };
        let scene = Scene {
            geometry: self.geometry(),
            display: &self.display,
            overlays: &self.overlays,
            drag: self.drag_rect(),
            roi: self.roi,
            zoom_indicator,
            status,
        };
        render::paint(&scene, surface);
    }
}
