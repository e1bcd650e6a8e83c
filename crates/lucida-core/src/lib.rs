pub mod colormap;
pub mod config;
pub mod consts;
pub mod error;
pub mod image;
pub mod interaction;
pub mod io;
pub mod mapper;
pub mod overlay;
pub mod render;
pub mod scaling;
pub mod status;
pub mod surface;
pub mod viewer;
pub mod viewport;

pub use crate::config::ViewerConfig;
pub use crate::error::{Result, ViewerError};
pub use crate::image::{ChannelMode, ImageData, ImageStats};
pub use crate::interaction::{InteractionState, PointerButton, Roi};
pub use crate::overlay::{Overlay, OverlayId};
pub use crate::surface::{Color, DrawSurface, ScreenRect, Stroke};
pub use crate::viewer::Viewer;
