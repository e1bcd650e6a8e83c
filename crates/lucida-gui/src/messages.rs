use std::path::PathBuf;

use lucida_core::{ImageData, ViewerConfig};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file.
    LoadImage { path: PathBuf },
}

/// Results sent back to the UI thread, by the worker or by dialog threads.
pub enum WorkerResult {
    ImageLoaded { path: PathBuf, image: ImageData },
    ConfigImported { path: PathBuf, config: ViewerConfig },
    Error { message: String },
}
