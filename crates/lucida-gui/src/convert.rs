use lucida_core::scaling::DisplayBuffer;
use lucida_core::{Color, Stroke};

/// Convert the viewer's RGBA display buffer to an egui ColorImage.
pub fn display_to_color_image(buffer: &DisplayBuffer) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([buffer.width(), buffer.height()], buffer.rgba())
}

pub fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, color32(stroke.color))
}
