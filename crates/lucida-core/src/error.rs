use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image dimensionality: {ndim} (expected 2 or 3)")]
    UnsupportedShape { ndim: usize },

    #[error("Colour image needs at least 3 channels, got {channels}")]
    TooFewChannels { channels: usize },

    #[error("Display buffer is empty, nothing to write")]
    EmptyDisplay,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
