use std::path::Path;

use console::Style;
use lucida_core::status::format_value;
use lucida_core::{ImageData, Roi, ViewerConfig};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_image_info(path: &Path, image: &ImageData) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Image"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", image.width(), image.height()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.value.apply_to(image.mode())
    );
    match image.stats() {
        Some(stats) => println!(
            "  {:<14}{}",
            s.label.apply_to("Range"),
            s.value.apply_to(format!(
                "{} - {} (mean {:.1})",
                format_value(stats.min),
                format_value(stats.max),
                stats.mean
            ))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Range"),
            s.disabled.apply_to("empty image")
        ),
    }
    println!();
}

/// What a headless render produced.
pub struct RenderSummary<'a> {
    pub output: &'a Path,
    pub config: &'a ViewerConfig,
    pub zoom_level: f64,
    pub viewport: (i64, i64, i64, i64),
    pub roi: Option<Roi>,
    pub draw_commands: usize,
    pub status: Option<String>,
}

pub fn print_render_summary(summary: &RenderSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Render"));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(summary.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scaling"),
        s.value.apply_to(if summary.config.auto_scale {
            "auto".to_string()
        } else {
            format!(
                "manual [{}, {}]",
                format_value(summary.config.display_min),
                format_value(summary.config.display_max)
            )
        })
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Colormap"),
        s.value
            .apply_to(summary.config.colormap.as_deref().unwrap_or("gray"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("level {}", format_value(summary.zoom_level)))
    );
    let (x, y, w, h) = summary.viewport;
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{w}x{h} at ({x},{y})"))
    );
    match summary.roi {
        Some(roi) => println!(
            "  {:<14}{}",
            s.label.apply_to("ROI"),
            s.value.apply_to(format!(
                "({},{})-({},{})",
                roi.x1, roi.y1, roi.x2, roi.y2
            ))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("ROI"),
            s.disabled.apply_to("none")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Draw calls"),
        s.value.apply_to(summary.draw_commands)
    );
    if let Some(ref status) = summary.status {
        println!("  {:<14}{}", s.label.apply_to("Status"), status);
    }
    println!();
}
