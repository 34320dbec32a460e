use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::color;
use crate::data::filter::visible_indices;
use crate::data::model::{Dataset, Record};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn empty_message(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

/// Marker colour: gradient position of the drone payload for valid rows,
/// gray for invalid ones, a neutral colour when no payload exists.
fn record_color(record: &Record, valid: bool, drone_range: Option<(f64, f64)>) -> Color32 {
    if !valid {
        return color::INVALID_COLOR;
    }
    match (record.drone, drone_range) {
        (Some(p), Some((lo, hi))) => color::strength_color(color::normalized(p, lo, hi)),
        _ => color::NO_SIGNAL_COLOR,
    }
}

/// Marker radius scaled between the configured base and max size by the
/// normalized drone payload.
fn record_radius(
    record: &Record,
    drone_range: Option<(f64, f64)>,
    base: f32,
    max: f32,
) -> f32 {
    match (record.drone, drone_range) {
        (Some(p), Some((lo, hi))) => base + (max - base) * color::normalized(p, lo, hi),
        _ => base,
    }
}

/// Axis-aligned bounds of the drawn points in data space
/// (longitude, latitude, value).
struct SceneBounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl SceneBounds {
    fn of(dataset: &Dataset, indices: &[usize]) -> Option<SceneBounds> {
        let mut bounds: Option<SceneBounds> = None;
        for &i in indices {
            let r = &dataset.records[i];
            let p = [r.longitude, r.latitude, r.value];
            match &mut bounds {
                Some(b) => {
                    for axis in 0..3 {
                        b.min[axis] = b.min[axis].min(p[axis]);
                        b.max[axis] = b.max[axis].max(p[axis]);
                    }
                }
                None => bounds = Some(SceneBounds { min: p, max: p }),
            }
        }
        bounds
    }

    /// Map a record into `[-1, 1]^3`; a degenerate axis collapses to 0.
    fn normalize(&self, r: &Record) -> [f32; 3] {
        let p = [r.longitude, r.latitude, r.value];
        let mut out = [0.0f32; 3];
        for axis in 0..3 {
            let span = self.max[axis] - self.min[axis];
            if span > 0.0 {
                out[axis] = (2.0 * (p[axis] - self.min[axis]) / span - 1.0) as f32;
            }
        }
        out
    }
}

/// Drone range over the drawn points only, so colours re-normalize when
/// invalid points are hidden.
fn visible_drone_range(dataset: &Dataset, indices: &[usize]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for p in indices.iter().filter_map(|&i| dataset.records[i].drone) {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(p), hi.max(p)),
            None => (p, p),
        });
    }
    range
}

// ---------------------------------------------------------------------------
// Orbitable 3D scatter (central panel)
// ---------------------------------------------------------------------------

const AXIS_LABELS: [&str; 3] = ["Longitude", "Latitude", "Value"];

/// Draw the current dataset as a 3D scatter through the orbit camera.
/// Dragging rotates, scrolling zooms.
pub fn scatter_3d(ui: &mut Ui, state: &mut AppState) {
    // Split the borrows: input events mutate the camera while the dataset
    // stays borrowed for drawing.
    let AppState {
        dataset,
        camera,
        session,
        config,
        show_invalid,
        ..
    } = state;

    let Some(dataset) = dataset.as_ref() else {
        empty_message(ui, "Select a folder to view detections");
        return;
    };

    let indices = visible_indices(dataset, *show_invalid);
    if indices.is_empty() {
        empty_message(ui, "No points to draw");
        return;
    }

    let (response, painter) =
        ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;

    if response.dragged() {
        let delta = response.drag_delta();
        camera.rotate(delta.x, -delta.y);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom_by((scroll * 0.005).exp());
        }
    }

    let camera = *camera;
    let scale = rect.width().min(rect.height()) * 0.35;
    let center = rect.center();
    let to_screen = |scene: [f32; 3]| -> (Pos2, f32) {
        let ([x, y], depth) = camera.project(scene);
        (
            Pos2::new(center.x + x * scale, center.y - y * scale),
            depth,
        )
    };

    // Bounds come from the drawn points, matching the colour range.
    // `indices` is non-empty here, so bounds always exist.
    let Some(bounds) = SceneBounds::of(dataset, &indices) else {
        return;
    };
    let drone_range = visible_drone_range(dataset, &indices);

    // ---- Axis triad from the (-1,-1,-1) corner ----
    let origin = [-1.0f32, -1.0, -1.0];
    let axis_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());
    for (axis, label) in AXIS_LABELS.iter().enumerate() {
        let mut tip = origin;
        tip[axis] = 1.0;
        let (from, _) = to_screen(origin);
        let (to, _) = to_screen(tip);
        painter.line_segment([from, to], axis_stroke);
        painter.text(
            to,
            Align2::CENTER_BOTTOM,
            *label,
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
    }

    // ---- Points, far to near ----
    let mut markers: Vec<(f32, Pos2, f32, Color32)> = indices
        .iter()
        .map(|&i| {
            let record = &dataset.records[i];
            let (pos, depth) = to_screen(bounds.normalize(record));
            let radius = record_radius(
                record,
                drone_range,
                config.base_point_size,
                config.max_point_size,
            );
            let fill = record_color(record, dataset.validity[i], drone_range);
            (depth, pos, radius, fill)
        })
        .collect();
    markers.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, pos, radius, fill) in markers {
        painter.circle_filled(pos, radius, fill);
    }

    // ---- Overlays ----
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        format!(
            "{}   {} of {} points",
            dataset.file_name,
            indices.len(),
            dataset.len()
        ),
        FontId::proportional(13.0),
        ui.visuals().text_color(),
    );
    if let Some(session) = session {
        painter.text(
            rect.right_bottom() - egui::vec2(8.0, 8.0),
            Align2::RIGHT_BOTTOM,
            format!("Page {}/{}", session.index() + 1, session.file_count()),
            FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
    }
}

// ---------------------------------------------------------------------------
// Top-down map (longitude / latitude)
// ---------------------------------------------------------------------------

/// Draw the current dataset as a flat longitude/latitude scatter.
pub fn top_down(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        empty_message(ui, "Select a folder to view detections");
        return;
    };

    let indices = visible_indices(dataset, state.show_invalid);
    let drone_range = visible_drone_range(dataset, &indices);

    Plot::new("top_down")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            for &i in &indices {
                let record = &dataset.records[i];
                let points: PlotPoints =
                    vec![[record.longitude, record.latitude]].into();
                plot_ui.points(
                    Points::new(points)
                        .radius(record_radius(
                            record,
                            drone_range,
                            state.config.base_point_size,
                            state.config.max_point_size,
                        ))
                        .color(record_color(record, dataset.validity[i], drone_range)),
                );
            }
        });
}
