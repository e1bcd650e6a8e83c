use lucida_core::InteractionState;

use crate::app::LucidaApp;

pub fn show(ctx: &egui::Context, app: &mut LucidaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some((w, h)) = app.viewer.image_size() {
                ui.label(format!("{w}x{h}"));
                ui.separator();
            }
            if let Some(path) = &app.ui_state.file_path {
                ui.label(path.display().to_string());
                ui.separator();
            }
            let mode = match app.viewer.interaction_state() {
                InteractionState::Idle => "Idle",
                InteractionState::Panning { .. } => "Panning",
                InteractionState::DraggingRoi(_) => "Selecting",
            };
            ui.label(mode);
            if let Some((x, y)) = app.viewer.cursor() {
                ui.separator();
                ui.label(format!("({x},{y})"));
            }
        });

        ui.add_space(2.0);
    });
}
