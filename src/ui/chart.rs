use eframe::egui::{pos2, Align2, RichText, Stroke, Ui};
use egui_plot::{
    Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text,
};

use crate::scene::{Scene, AXIS_FONT_SIZE, LEGEND_FONT_SIZE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Beeswarm chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart and toggle the selection of a clicked marker.
pub fn swarm_chart(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view tweets  (File → Open…)");
        });
        return;
    }

    // Empty dataset: the chart area stays blank.
    let Some(scene) = state.scene() else {
        return;
    };

    // Uniform scale so the canvas keeps its aspect ratio.
    let available = ui.available_size();
    let scale = (available.x / scene.width)
        .min(available.y / scene.height)
        .max(0.1);

    let response = Plot::new("swarm_chart")
        .width(scene.width * scale)
        .height(scene.height * scale)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [0.0, -f64::from(scene.height)],
                [f64::from(scene.width), 0.0],
            ));
            draw_scene(plot_ui, &scene, scale);
        });

    if !response.response.clicked() {
        return;
    }
    let Some(pointer) = response.response.interact_pointer_pos() else {
        return;
    };
    let value = response.transform.value_from_position(pointer);
    if let Some(index) = scene.marker_at(pos2(value.x as f32, -value.y as f32)) {
        state.toggle_selection(index);
    }
}

/// Segments used to trace a selection ring.
const RING_SEGMENTS: usize = 48;

/// Scene coordinates have y pointing down; the plot's y points up.
fn plot_point(x: f32, y: f32) -> PlotPoint {
    PlotPoint::new(f64::from(x), -f64::from(y))
}

fn draw_scene(plot_ui: &mut PlotUi, scene: &Scene, scale: f32) {
    for marker in &scene.markers {
        let center = [f64::from(marker.center.x), -f64::from(marker.center.y)];
        plot_ui.points(
            Points::new(PlotPoints::new(vec![center]))
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(marker.radius * scale)
                .color(marker.fill),
        );

        // Unfilled plot markers draw a hairline outline, so the ring is a
        // closed line whose pixel width matches the stroke.
        let stroke = marker.stroke();
        if !stroke.is_empty() {
            plot_ui.line(
                Line::new(ring_points(center, marker.radius, RING_SEGMENTS))
                    .width(stroke.width * scale)
                    .color(stroke.color),
            );
        }
    }

    for label in &scene.axis {
        plot_ui.text(
            Text::new(
                plot_point(label.anchor.x, label.anchor.y),
                RichText::new(&label.text).strong().size(AXIS_FONT_SIZE * scale),
            )
            .anchor(Align2::RIGHT_CENTER),
        );
    }

    for (rect, color) in &scene.legend.swatches {
        let corners: PlotPoints = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
        .into_iter()
        .map(|p| [f64::from(p.x), -f64::from(p.y)])
        .collect();
        plot_ui.polygon(
            Polygon::new(corners)
                .fill_color(*color)
                .stroke(Stroke::new(1.0, *color)),
        );
    }

    for caption in [&scene.legend.top, &scene.legend.bottom] {
        plot_ui.text(
            Text::new(
                plot_point(caption.position.x, caption.position.y),
                RichText::new(&caption.text).size(LEGEND_FONT_SIZE * scale),
            )
            .anchor(Align2::LEFT_BOTTOM),
        );
    }
}

/// Closed polyline along the circle of `radius` around `center`, in plot units.
fn ring_points(center: [f64; 2], radius: f32, segments: usize) -> PlotPoints<'static> {
    let radius = f64::from(radius);
    (0..=segments)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            [
                center[0] + radius * angle.cos(),
                center[1] + radius * angle.sin(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_closed_and_follows_the_marker_edge() {
        let ring = ring_points([100.0, -50.0], 6.0, 16);
        let points = ring.points();
        assert_eq!(points.len(), 17);
        let (first, last) = (points[0], points[16]);
        assert!((first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9);
        for p in points {
            let r = ((p.x - 100.0).powi(2) + (p.y + 50.0).powi(2)).sqrt();
            assert!((r - 6.0).abs() < 1e-9, "radius {r}");
        }
    }
}
