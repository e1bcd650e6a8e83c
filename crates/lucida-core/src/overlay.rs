//! Annotations drawn over the image, in image coordinates.

use crate::surface::{Color, Stroke};

/// Handle returned by [`OverlayList::add`], used to remove the overlay again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    /// Ellipse inscribed in the rectangle at `(x, y)` of the given size.
    Ellipse { x: f64, y: f64, width: f64, height: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Point { x: f64, y: f64 },
    /// Segment from `(x, y)` to `(x + dx, y + dy)`.
    Line { x: f64, y: f64, dx: f64, dy: f64 },
    /// Text whose baseline starts at `(x, y)`.
    Text { x: f64, y: f64, text: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub shape: OverlayShape,
    pub stroke: Stroke,
    /// Interior colour for ellipses and rectangles.
    pub fill: Option<Color>,
}

impl Overlay {
    pub fn ellipse(x: f64, y: f64, width: f64, height: f64, stroke: Stroke, fill: Option<Color>) -> Self {
        Self {
            shape: OverlayShape::Ellipse { x, y, width, height },
            stroke,
            fill,
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, stroke: Stroke, fill: Option<Color>) -> Self {
        Self {
            shape: OverlayShape::Rectangle { x, y, width, height },
            stroke,
            fill,
        }
    }

    pub fn point(x: f64, y: f64, stroke: Stroke) -> Self {
        Self {
            shape: OverlayShape::Point { x, y },
            stroke,
            fill: None,
        }
    }

    pub fn line(x: f64, y: f64, dx: f64, dy: f64, stroke: Stroke) -> Self {
        Self {
            shape: OverlayShape::Line { x, y, dx, dy },
            stroke,
            fill: None,
        }
    }

    pub fn text(x: f64, y: f64, stroke: Stroke, text: impl Into<String>) -> Self {
        Self {
            shape: OverlayShape::Text {
                x,
                y,
                text: text.into(),
            },
            stroke,
            fill: None,
        }
    }

    /// All coordinates finite. Negative extents are allowed and span
    /// up/left from the anchor.
    pub fn is_well_formed(&self) -> bool {
        let coords: [f64; 4] = match &self.shape {
            OverlayShape::Ellipse { x, y, width, height }
            | OverlayShape::Rectangle { x, y, width, height } => [*x, *y, *width, *height],
            OverlayShape::Point { x, y } | OverlayShape::Text { x, y, .. } => [*x, *y, 0.0, 0.0],
            OverlayShape::Line { x, y, dx, dy } => [*x, *y, *dx, *dy],
        };
        coords.iter().all(|v| v.is_finite()) && self.stroke.width.is_finite()
    }
}

/// Overlays in draw order: later entries are painted on top.
#[derive(Clone, Debug, Default)]
pub struct OverlayList {
    next_id: u64,
    items: Vec<(OverlayId, Overlay)>,
}

impl OverlayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overlay. Malformed overlays are not stored and yield `None`.
    pub fn add(&mut self, overlay: Overlay) -> Option<OverlayId> {
        if !overlay.is_well_formed() {
            return None;
        }
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.items.push((id, overlay));
        Some(id)
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay> {
        let pos = self.items.iter().position(|(i, _)| *i == id)?;
        Some(self.items.remove(pos).1)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, o)| o)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> {
        self.items.iter().map(|(id, o)| (*id, o))
    }
}
