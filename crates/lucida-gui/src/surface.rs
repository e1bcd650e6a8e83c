use egui::{Align2, FontId, Painter, Pos2, Rect, Shape, StrokeKind, TextureHandle, TextureOptions};
use lucida_core::scaling::DisplayBuffer;
use lucida_core::surface::{DrawSurface, ScreenRect};
use lucida_core::{Color, Stroke};

use crate::convert::{color32, display_to_color_image, stroke};

const TEXT_SIZE: f32 = 12.0;

/// The viewer texture, uploaded again only when the display buffer changes.
#[derive(Default)]
pub struct TextureCache {
    handle: Option<TextureHandle>,
    generation: Option<u64>,
}

impl TextureCache {
    fn texture_id(
        &mut self,
        ctx: &egui::Context,
        buffer: &DisplayBuffer,
        generation: u64,
    ) -> egui::TextureId {
        if self.handle.is_none() || self.generation != Some(generation) {
            let image = display_to_color_image(buffer);
            match self.handle.as_mut() {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => {
                    self.handle = Some(ctx.load_texture("viewer", image, TextureOptions::NEAREST))
                }
            }
            self.generation = Some(generation);
        }
        self.handle
            .as_ref()
            .map_or(egui::TextureId::default(), |h| h.id())
    }
}

/// [`DrawSurface`] backed by an egui painter. Viewer coordinates are relative
/// to the widget's top-left corner.
pub struct EguiSurface<'a> {
    painter: Painter,
    widget: Rect,
    stroke: egui::Stroke,
    fill: Option<egui::Color32>,
    textures: &'a mut TextureCache,
    generation: u64,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: Painter, widget: Rect, textures: &'a mut TextureCache, generation: u64) -> Self {
        Self {
            painter,
            widget,
            stroke: stroke(Stroke::new(Color::BLACK, 1.0)),
            fill: None,
            textures,
            generation,
        }
    }

    fn rect(&self, r: ScreenRect) -> Rect {
        Rect::from_min_size(
            self.pos(r.x, r.y),
            egui::vec2(r.width.max(0.0), r.height.max(0.0)),
        )
    }

    fn pos(&self, x: f32, y: f32) -> Pos2 {
        self.widget.min + egui::vec2(x, y)
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn set_clip_rect(&mut self, rect: Option<ScreenRect>) {
        let clip = match rect {
            Some(r) => self.widget.intersect(self.rect(r)),
            None => self.widget,
        };
        self.painter.set_clip_rect(clip);
    }

    fn set_stroke(&mut self, s: Stroke) {
        self.stroke = stroke(s);
    }

    fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill.map(color32);
    }

    fn draw_image(&mut self, buffer: &DisplayBuffer, dest: ScreenRect) {
        let id = self
            .textures
            .texture_id(self.painter.ctx(), buffer, self.generation);
        self.painter.image(
            id,
            self.rect(dest),
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    fn draw_rect(&mut self, r: ScreenRect) {
        let rect = self.rect(r);
        if let Some(fill) = self.fill {
            self.painter.rect_filled(rect, 0.0, fill);
        }
        self.painter
            .rect_stroke(rect, 0.0, self.stroke, StrokeKind::Middle);
    }

    fn draw_ellipse(&mut self, r: ScreenRect) {
        let rect = self.rect(r);
        let radius = rect.size() / 2.0;
        if let Some(fill) = self.fill {
            self.painter
                .add(Shape::ellipse_filled(rect.center(), radius, fill));
        }
        self.painter
            .add(Shape::ellipse_stroke(rect.center(), radius, self.stroke));
    }

    fn draw_point(&mut self, x: f32, y: f32) {
        let radius = (self.stroke.width / 2.0).max(1.0);
        self.painter
            .circle_filled(self.pos(x, y), radius, self.stroke.color);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.painter
            .line_segment([self.pos(x1, y1), self.pos(x2, y2)], self.stroke);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.painter.text(
            self.pos(x, y),
            Align2::LEFT_BOTTOM,
            text,
            FontId::monospace(TEXT_SIZE),
            self.stroke.color,
        );
    }
}
