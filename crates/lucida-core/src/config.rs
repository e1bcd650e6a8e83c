use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STATUS_BAR_RESERVE;
use crate::error::{Result, ViewerError};

/// Interaction and display options recognised by the viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Stretch mono images so their min/max span 0..255.
    pub auto_scale: bool,
    /// Lower end of the manual display window (used when `auto_scale` is off).
    pub display_min: f64,
    /// Upper end of the manual display window (used when `auto_scale` is off).
    pub display_max: f64,
    pub zoom_enabled: bool,
    pub zoom_indicator_enabled: bool,
    /// Wheel notches needed to double the magnification.
    pub zoom_step_divider: f64,
    pub roi_enabled: bool,
    pub status_bar_visible: bool,
    /// Colormap name for mono images, `None` for grayscale.
    pub colormap: Option<String>,
    /// Screen pixels subtracted from the widget height when fitting the pixmap.
    pub status_bar_reserve: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_scale: true,
            display_min: 0.0,
            display_max: 255.0,
            zoom_enabled: true,
            zoom_indicator_enabled: false,
            zoom_step_divider: 1.0,
            roi_enabled: true,
            status_bar_visible: false,
            colormap: None,
            status_bar_reserve: DEFAULT_STATUS_BAR_RESERVE,
        }
    }
}

impl ViewerConfig {
    /// Check the numeric fields. The viewer itself never fails on these, it
    /// ignores bad values, but hosts loading a config file want to know.
    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_step_divider.is_finite() && self.zoom_step_divider > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "zoom_step_divider must be a positive number, got {}",
                self.zoom_step_divider
            )));
        }
        if !self.display_min.is_finite() || !self.display_max.is_finite() {
            return Err(ViewerError::InvalidConfig(format!(
                "display range must be finite, got [{}, {}]",
                self.display_min, self.display_max
            )));
        }
        Ok(())
    }
}
