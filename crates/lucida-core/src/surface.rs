//! The 2-D drawing interface the viewer paints through.

use crate::scaling::DisplayBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Outline pen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Axis-aligned rectangle in widget pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners given in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Drawing primitives supplied by the host toolkit.
///
/// Geometry is in widget pixels. `set_stroke` and `set_fill` apply to every
/// following primitive until changed; shapes are filled only while a fill is
/// set.
pub trait DrawSurface {
    /// Restrict drawing to `rect`, or lift the restriction with `None`.
    fn set_clip_rect(&mut self, rect: Option<ScreenRect>);
    fn set_stroke(&mut self, stroke: Stroke);
    fn set_fill(&mut self, fill: Option<Color>);
    /// Draw `buffer` scaled into `dest`.
    fn draw_image(&mut self, buffer: &DisplayBuffer, dest: ScreenRect);
    fn draw_rect(&mut self, rect: ScreenRect);
    /// Ellipse inscribed in `rect`.
    fn draw_ellipse(&mut self, rect: ScreenRect);
    fn draw_point(&mut self, x: f32, y: f32);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Text with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clip(Option<ScreenRect>),
    Stroke(Stroke),
    Fill(Option<Color>),
    Image {
        width: usize,
        height: usize,
        dest: ScreenRect,
    },
    Rect(ScreenRect),
    Ellipse(ScreenRect),
    Point(f32, f32),
    Line(f32, f32, f32, f32),
    Text(f32, f32, String),
}

/// Surface that only records what was drawn. Used for headless rendering
/// summaries and for checking paint order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands that put pixels on screen (no state changes).
    pub fn primitives(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| {
            !matches!(
                c,
                DrawCommand::Clip(_) | DrawCommand::Stroke(_) | DrawCommand::Fill(_)
            )
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(_, _, t) => Some(t.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn set_clip_rect(&mut self, rect: Option<ScreenRect>) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.commands.push(DrawCommand::Stroke(stroke));
    }

    fn set_fill(&mut self, fill: Option<Color>) {
        self.commands.push(DrawCommand::Fill(fill));
    }

    fn draw_image(&mut self, buffer: &DisplayBuffer, dest: ScreenRect) {
        self.commands.push(DrawCommand::Image {
            width: buffer.width(),
            height: buffer.height(),
            dest,
        });
    }

    fn draw_rect(&mut self, rect: ScreenRect) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn draw_ellipse(&mut self, rect: ScreenRect) {
        self.commands.push(DrawCommand::Ellipse(rect));
    }

    fn draw_point(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Point(x, y));
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line(x1, y1, x2, y2));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.commands.push(DrawCommand::Text(x, y, text.to_string()));
    }
}
