use lucida_core::consts::WHEEL_NOTCH_DELTA;
use lucida_core::{InteractionState, PointerButton};

use crate::app::LucidaApp;
use crate::surface::EguiSurface;

const BUTTONS: [(egui::PointerButton, PointerButton); 3] = [
    (egui::PointerButton::Primary, PointerButton::Primary),
    (egui::PointerButton::Secondary, PointerButton::Secondary),
    (egui::PointerButton::Middle, PointerButton::Middle),
];

pub fn show(ctx: &egui::Context, app: &mut LucidaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        if app.viewer.image().is_none() {
            show_placeholder(ui);
            return;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        app.viewer
            .set_widget_size(rect.width().max(0.0) as u32, rect.height().max(0.0) as u32);

        forward_pointer(ui, &response, app, rect);
        forward_wheel(ui, &response, app, rect);

        let mut surface = EguiSurface::new(
            ui.painter_at(rect),
            rect,
            &mut app.texture,
            app.viewer.display_generation(),
        );
        app.viewer.paint(&mut surface);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Pointer position relative to the widget's top-left corner.
fn local(pos: egui::Pos2, rect: egui::Rect) -> (f64, f64) {
    ((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

fn forward_pointer(ui: &egui::Ui, response: &egui::Response, app: &mut LucidaApp, rect: egui::Rect) {
    let (pos, moved) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.delta() != egui::Vec2::ZERO));
    let Some(pos) = pos else {
        return;
    };
    let (x, y) = local(pos, rect);
    let busy = app.viewer.interaction_state() != InteractionState::Idle;

    if moved && (response.hovered() || busy) {
        app.viewer.pointer_moved(x, y);
    }

    for (egui_button, button) in BUTTONS {
        let (pressed, released) = ui.input(|i| {
            (
                i.pointer.button_pressed(egui_button),
                i.pointer.button_released(egui_button),
            )
        });
        if pressed && response.hovered() {
            app.viewer.pointer_pressed(button, x, y);
        }
        if released {
            app.viewer.pointer_released(button, x, y);
        }
    }
}

fn forward_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut LucidaApp, rect: egui::Rect) {
    if !response.hovered() {
        return;
    }
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll == 0.0 {
        return;
    }
    let notches = app.ui_state.take_scroll_notches(scroll);
    if notches == 0 {
        return;
    }
    if let Some(pos) = response.hover_pos() {
        let (x, y) = local(pos, rect);
        app.viewer
            .wheel(notches as f64 * WHEEL_NOTCH_DELTA, x, y);
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
