use std::sync::mpsc;

use lucida_core::Viewer;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::UiState;
use crate::surface::TextureCache;
use crate::worker;

pub struct LucidaApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub viewer: Viewer,
    pub ui_state: UiState,
    pub texture: TextureCache,
}

impl LucidaApp {
    pub fn new(ctx: &egui::Context) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;

        let mut viewer = Viewer::new();
        viewer.set_status_bar(true);

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            viewer,
            ui_state: UiState::default(),
            texture: TextureCache::default(),
        })
    }

    /// Drain all pending results from the worker and dialog threads.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { path, image } => {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {})",
                        path.display(),
                        image.width(),
                        image.height(),
                        image.mode()
                    ));
                    self.viewer.set_image_data(image);
                    self.ui_state.file_path = Some(path);
                }
                WorkerResult::ConfigImported { path, config } => match config.validate() {
                    Ok(()) => {
                        self.viewer.apply_config(&config);
                        self.ui_state
                            .add_log(format!("Config imported: {}", path.display()));
                    }
                    Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
                },
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }
}

impl eframe::App for LucidaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.viewer.take_repaint_request() {
            ctx.request_repaint();
        }

        if self.ui_state.show_about {
            egui::Window::new("About Lucida")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Lucida");
                        ui.label("Scientific Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
