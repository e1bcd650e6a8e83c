use lucida_core::status::format_value;

use crate::app::LucidaApp;
use crate::panels::section_header;

const LEFT_PANEL_WIDTH: f32 = 240.0;
const MAX_ZOOM_DIVIDER: f64 = 8.0;

pub fn show(ctx: &egui::Context, app: &mut LucidaApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                display_section(ui, app);
                ui.separator();
                zoom_section(ui, app);
                ui.separator();
                selection_section(ui, app);
            });
        });
}

fn display_section(ui: &mut egui::Ui, app: &mut LucidaApp) {
    let mode = app.viewer.channel_mode().map(|m| m.to_string());
    section_header(ui, "Display", mode.as_deref());
    ui.add_space(4.0);

    let mut auto_scale = app.viewer.config().auto_scale;
    if ui.checkbox(&mut auto_scale, "Autoscale").changed() {
        app.viewer.set_auto_scale(auto_scale);
    }

    let (mut lower, mut upper) = app.viewer.display_range();
    let mut changed = false;
    ui.add_enabled_ui(!auto_scale, |ui| {
        ui.horizontal(|ui| {
            ui.label("Min");
            changed |= ui.add(egui::DragValue::new(&mut lower).speed(1.0)).changed();
            ui.label("Max");
            changed |= ui.add(egui::DragValue::new(&mut upper).speed(1.0)).changed();
        });
    });
    if changed {
        app.viewer.set_display_range(lower, upper);
    }

    if let Some(stats) = app.viewer.image_stats() {
        ui.small(format!(
            "Data range {} - {}",
            format_value(stats.min),
            format_value(stats.max)
        ));
    }

    let current = app.viewer.config().colormap.clone();
    let mut selected = current.clone();
    egui::ComboBox::from_label("Colormap")
        .selected_text(selected.as_deref().unwrap_or("none"))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, "none");
            for name in app.viewer.colormap_names() {
                ui.selectable_value(&mut selected, Some(name.clone()), name);
            }
        });
    if selected != current {
        app.viewer.set_colormap(selected.as_deref());
    }

    let mut status_bar = app.viewer.config().status_bar_visible;
    if ui.checkbox(&mut status_bar, "Status bar").changed() {
        app.viewer.set_status_bar(status_bar);
    }
}

fn zoom_section(ui: &mut egui::Ui, app: &mut LucidaApp) {
    let level = format!("level {}", format_value(app.viewer.zoom_level()));
    section_header(ui, "Zoom", Some(&level));
    ui.add_space(4.0);

    let mut enabled = app.viewer.config().zoom_enabled;
    if ui.checkbox(&mut enabled, "Wheel zoom").changed() {
        app.viewer.set_zoom_enabled(enabled);
        app.ui_state.reset_scroll();
    }

    let mut indicator = app.viewer.config().zoom_indicator_enabled;
    if ui.checkbox(&mut indicator, "Zoom indicator").changed() {
        app.viewer.set_zoom_indicator_enabled(indicator);
    }

    let mut divider = app.viewer.config().zoom_step_divider;
    if ui
        .add(
            egui::Slider::new(&mut divider, 1.0..=MAX_ZOOM_DIVIDER)
                .step_by(1.0)
                .text("Notches per 2x"),
        )
        .changed()
    {
        app.viewer.set_zoom_step_divider(divider);
    }

    if ui
        .add_enabled(app.viewer.zoom_level() > 0.0, egui::Button::new("Reset Zoom"))
        .clicked()
    {
        app.viewer.reset_zoom();
    }
}

fn selection_section(ui: &mut egui::Ui, app: &mut LucidaApp) {
    let roi = app
        .viewer
        .roi()
        .map(|r| format!("({},{})-({},{})", r.x1, r.y1, r.x2, r.y2));
    section_header(ui, "Selection", roi.as_deref());
    ui.add_space(4.0);

    let mut roi_enabled = app.viewer.config().roi_enabled;
    if ui.checkbox(&mut roi_enabled, "ROI selection").changed() {
        app.viewer.set_roi_enabled(roi_enabled);
    }

    if ui
        .add_enabled(app.viewer.roi().is_some(), egui::Button::new("Clear ROI"))
        .clicked()
    {
        app.viewer.clear_roi();
    }

    ui.small(format!("{} overlay(s)", app.viewer.num_overlays()));
}
