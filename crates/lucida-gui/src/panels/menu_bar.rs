use lucida_core::{Color, Overlay, Stroke};

use crate::app::LucidaApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut LucidaApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Reset Zoom").clicked() {
                    ui.close();
                    app.viewer.reset_zoom();
                }
                if ui.button("Clear ROI").clicked() {
                    ui.close();
                    app.viewer.clear_roi();
                }

                ui.separator();

                let has_image = app.viewer.image_size().is_some();
                if ui.add_enabled(has_image, egui::Button::new("Add Demo Overlays")).clicked() {
                    ui.close();
                    add_demo_overlays(app);
                }
                if ui.button("Clear Overlays").clicked() {
                    ui.close();
                    app.viewer.clear_overlays();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &mut LucidaApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "tif", "tiff", "jpg", "jpeg", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

fn import_config(app: &mut LucidaApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        let msg = match result {
            Ok(config) => WorkerResult::ConfigImported { path, config },
            Err(e) => WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(msg);
    });
}

fn export_config(app: &mut LucidaApp) {
    let config = app.viewer.config().clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("lucida.toml")
            .save_file()
        {
            let written = toml::to_string_pretty(&config)
                .map_err(anyhow::Error::from)
                .and_then(|content| std::fs::write(&path, content).map_err(anyhow::Error::from));
            if let Err(e) = written {
                let _ = result_tx.send(WorkerResult::Error {
                    message: format!("Failed to export config: {e}"),
                });
            }
        }
    });
}

/// One overlay of each kind around the image centre.
fn add_demo_overlays(app: &mut LucidaApp) {
    let Some((w, h)) = app.viewer.image_size() else {
        return;
    };
    let (w, h) = (w as f64, h as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let pen = Stroke::new(Color::YELLOW, 2.0);
    let overlays = [
        Overlay::ellipse(cx - w / 8.0, cy - h / 8.0, w / 4.0, h / 4.0, pen, None),
        Overlay::rectangle(
            w / 10.0,
            h / 10.0,
            w / 5.0,
            h / 5.0,
            Stroke::new(Color::RED, 1.0),
            Some(Color::rgba(255, 0, 0, 60)),
        ),
        Overlay::line(0.0, h, w, -h, Stroke::new(Color::GREEN, 1.0)),
        Overlay::point(cx, cy, Stroke::new(Color::WHITE, 4.0)),
        Overlay::text(cx, cy - h / 6.0, pen, "centre"),
    ];
    let added = overlays
        .into_iter()
        .filter_map(|o| app.viewer.add_overlay(o))
        .count();
    app.ui_state.add_log(format!("Added {added} demo overlays"));
}
