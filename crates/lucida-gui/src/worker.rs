use std::sync::mpsc;

use lucida_core::io::load_image;
use tracing::info;

use crate::messages::{WorkerCommand, WorkerResult};

/// Start the background thread that decodes images off the UI thread.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("lucida-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => match load_image(&path) {
                Ok(image) => {
                    info!(path = %path.display(), "Image decoded");
                    send(&result_tx, &ctx, WorkerResult::ImageLoaded { path, image });
                }
                Err(e) => send(
                    &result_tx,
                    &ctx,
                    WorkerResult::Error {
                        message: format!("Failed to open {}: {e}", path.display()),
                    },
                ),
            },
        }
    }
}
