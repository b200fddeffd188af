use egui_plot::{Line, Plot, PlotBounds};

use graph_core::geometry::{PlotGeometry, Segment};

/// Renders the scene produced by the synchronizer. The plot is pinned to
/// the geometry's viewport each frame; zooming and panning are not part
/// of this application.
pub struct PlotPanel {
    line_width: f32,
}

impl PlotPanel {
    pub fn new() -> Self {
        Self { line_width: 1.0 }
    }

    pub fn render(
        &mut self,
        geometry: Option<&PlotGeometry>,
        x_label: &str,
        y_label: &str,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
    ) {
        let axis_color = if ctx.theme() == egui::Theme::Light {
            egui::Color32::BLACK
        } else {
            egui::Color32::WHITE
        };

        Plot::new("Plot")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_axes(false)
            .show_grid(false)
            .x_axis_label(x_label.to_owned())
            .y_axis_label(y_label.to_owned())
            .show(ui, |plot_ui| {
                let Some(geometry) = geometry else {
                    // Empty plot state; nothing to draw.
                    return;
                };

                let bounds = geometry.bounds;
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [bounds.min_x, bounds.min_y],
                    [bounds.max_x, bounds.max_y],
                ));

                for segment in geometry.axes.iter() {
                    plot_ui.line(self.segment_line(segment, axis_color));
                }
                for segment in geometry.x_ticks.iter().chain(geometry.y_ticks.iter()) {
                    plot_ui.line(self.segment_line(segment, axis_color));
                }

                plot_ui.line(
                    Line::new(geometry.polyline.clone())
                        .color(egui::Color32::RED)
                        .width(self.line_width),
                );
            });
    }

    fn segment_line(&self, segment: &Segment, color: egui::Color32) -> Line {
        Line::new(vec![segment.start, segment.end])
            .color(color)
            .width(self.line_width)
    }
}

impl Default for PlotPanel {
    fn default() -> Self {
        Self::new()
    }
}
