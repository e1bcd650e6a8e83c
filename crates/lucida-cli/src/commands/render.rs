use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use lucida_core::colormap::{BuiltinColormaps, ColormapResolver};
use lucida_core::consts::WHEEL_NOTCH_DELTA;
use lucida_core::io::{load_image, save_display_png};
use lucida_core::surface::RecordingSurface;
use lucida_core::{PointerButton, Viewer, ViewerConfig};
use tracing::info;

use super::parse_numbers;
use crate::summary::{print_render_summary, RenderSummary};

#[derive(Args)]
pub struct RenderArgs {
    /// Input image file (PNG, TIFF, ...)
    pub file: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "view.png")]
    pub output: PathBuf,

    /// Viewer config file (TOML); command line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Widget width in screen pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Widget height in screen pixels (includes the status bar reserve)
    #[arg(long, default_value = "640")]
    pub height: u32,

    /// Zoom level (0 = whole image, each level doubles the magnification).
    /// Must be a whole number of wheel steps, i.e. a multiple of 1/divider
    #[arg(long, default_value = "0")]
    pub zoom: f64,

    /// Image point to zoom in on, as X,Y (default: image centre)
    #[arg(long)]
    pub center: Option<String>,

    /// Colormap for mono images (gray, gray_r, hot, green, viridis)
    #[arg(long)]
    pub colormap: Option<String>,

    /// Manual display window as MIN,MAX (disables autoscale)
    #[arg(long)]
    pub manual: Option<String>,

    /// Select a region of interest as X1,Y1,X2,Y2
    #[arg(long)]
    pub roi: Option<String>,

    /// Print the status bar text
    #[arg(long)]
    pub status: bool,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => super::config::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(ref name) = args.colormap {
        config.colormap = Some(name.clone());
    }
    if let Some(ref window) = args.manual {
        let [min, max] = parse_numbers::<2>(window, "display window")?;
        config.auto_scale = false;
        config.display_min = min;
        config.display_max = max;
    }
    if args.status {
        config.status_bar_visible = true;
    }

    if let Some(ref name) = config.colormap {
        if !BuiltinColormaps.names().contains(name) {
            bail!("Unknown colormap '{name}'");
        }
    }
    let mut viewer = Viewer::with_config(config);

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    viewer.set_widget_size(args.width, args.height);
    viewer.set_image_data(image);

    if args.zoom > 0.0 {
        zoom(&mut viewer, args)?;
    }
    if let Some(ref roi) = args.roi {
        let [x1, y1, x2, y2] = parse_numbers::<4>(roi, "ROI")?;
        select_roi(&mut viewer, (x1, y1), (x2, y2))?;
    }

    let mut surface = RecordingSurface::new();
    viewer.paint(&mut surface);

    save_display_png(viewer.display_buffer(), &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "View saved");

    let vp = viewer.viewport();
    print_render_summary(&RenderSummary {
        output: &args.output,
        config: viewer.config(),
        zoom_level: viewer.zoom_level(),
        viewport: (vp.x, vp.y, vp.width, vp.height),
        roi: viewer.roi(),
        draw_commands: surface.primitives().count(),
        status: if args.status { viewer.status_text() } else { None },
    });
    Ok(())
}

/// Zoom the way a user would: wheel notches with the pointer on the target.
fn zoom(viewer: &mut Viewer, args: &RenderArgs) -> Result<()> {
    let (cx, cy) = match args.center {
        Some(ref center) => {
            let [x, y] = parse_numbers::<2>(center, "centre")?;
            (x, y)
        }
        None => {
            let (w, h) = viewer.image_size().unwrap_or_default();
            (w as f64 / 2.0, h as f64 / 2.0)
        }
    };
    let Some((sx, sy)) = viewer.image_to_screen(cx, cy) else {
        bail!("Nothing to zoom: the image or the widget is empty");
    };
    let notches = zoom_notches(args.zoom, viewer.config().zoom_step_divider)?;
    viewer.wheel(notches * WHEEL_NOTCH_DELTA, sx as f64, sy as f64);
    if viewer.zoom_level() == 0.0 {
        bail!("Zoom centre ({cx},{cy}) is outside the image");
    }
    Ok(())
}

/// Whole wheel notches reaching `level`. Levels between wheel steps are
/// rejected rather than rounded.
fn zoom_notches(level: f64, divider: f64) -> Result<f64> {
    let notches = level * divider;
    if !notches.is_finite() || (notches - notches.round()).abs() > 1e-9 {
        bail!(
            "Zoom level {level} is not a multiple of the wheel step 1/{divider}; \
             use a zoom_step_divider that reaches it"
        );
    }
    Ok(notches.round())
}

/// Drag a selection between two image points.
fn select_roi(viewer: &mut Viewer, a: (f64, f64), b: (f64, f64)) -> Result<()> {
    let (Some(start), Some(end)) = (viewer.image_to_screen(a.0, a.1), viewer.image_to_screen(b.0, b.1))
    else {
        bail!("Nothing to select on: the image or the widget is empty");
    };
    viewer.pointer_pressed(PointerButton::Primary, start.0 as f64, start.1 as f64);
    viewer.pointer_moved(end.0 as f64, end.1 as f64);
    viewer.pointer_released(PointerButton::Primary, end.0 as f64, end.1 as f64);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_steps_become_notches() {
        assert_eq!(zoom_notches(2.0, 1.0).unwrap(), 2.0);
        assert_eq!(zoom_notches(1.5, 2.0).unwrap(), 3.0);
    }

    #[test]
    fn levels_between_steps_are_rejected() {
        assert!(zoom_notches(1.5, 1.0).is_err());
        assert!(zoom_notches(0.25, 2.0).is_err());
    }
}
