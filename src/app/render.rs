use crate::engine::{LayerDescriptor, geometry};
use crate::model;
use eframe::egui;

use super::View;

const AREA_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(40, 90, 60, 28);
const AREA_STROKE: egui::Color32 = egui::Color32::from_rgb(70, 160, 100);
const BOX_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(40, 90, 200, 40);
const BOX_BLOCKED_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(200, 40, 40, 40);
const BOX_STROKE: egui::Color32 = egui::Color32::from_rgb(90, 150, 240);
const BOX_BLOCKED_STROKE: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const HANDLE_FILL: egui::Color32 = egui::Color32::from_rgb(230, 230, 230);

/// Round a degree span down to a 1/2/5 x 10^n step.
fn nice_step(raw: f64) -> f64 {
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    if norm < 2.0 {
        mag
    } else if norm < 5.0 {
        2.0 * mag
    } else {
        5.0 * mag
    }
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, view: &View) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);

    let grid_color = egui::Color32::from_gray(60);
    // aim for roughly one graticule line per 80 screen pixels
    let step = nice_step(80.0 / view.zoom);
    let spacing_screen = (step * view.zoom) as f32;
    if spacing_screen < 12.0 {
        return;
    }

    let top_left = view.screen_to_world(rect, rect.min);
    let x0 = (top_left.x / step).floor() * step;
    let y0 = (top_left.y / step).ceil() * step;
    let cols = (rect.width() / spacing_screen) as i32 + 2;
    let rows = (rect.height() / spacing_screen) as i32 + 2;
    for i in 0..cols {
        let x = view
            .world_to_screen(rect, model::Coord::new(x0 + i as f64 * step, 0.0))
            .x;
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(1.0, grid_color),
        );
    }
    for j in 0..rows {
        let y = view
            .world_to_screen(rect, model::Coord::new(0.0, y0 - j as f64 * step))
            .y;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(1.0, grid_color),
        );
    }
}

fn to_screen(view: &View, rect: egui::Rect, points: &[model::Coord]) -> Vec<egui::Pos2> {
    points.iter().map(|p| view.world_to_screen(rect, *p)).collect()
}

pub(super) fn draw_area_layer(
    painter: &egui::Painter,
    rect: egui::Rect,
    view: &View,
    layer: &LayerDescriptor,
) {
    for ring in &layer.polygons {
        let screen = to_screen(view, rect, ring);
        painter.add(egui::Shape::convex_polygon(
            screen.clone(),
            AREA_FILL,
            egui::Stroke::NONE,
        ));
        for pair in screen.windows(2) {
            painter.line_segment(
                [pair[0], pair[1]],
                egui::Stroke::new(1.5, AREA_STROKE),
            );
        }
    }
}

pub(super) fn draw_bbox_layer(
    painter: &egui::Painter,
    rect: egui::Rect,
    view: &View,
    layer: &LayerDescriptor,
    area_km2: Option<f64>,
) {
    let (fill, stroke) = if layer.blocked {
        (BOX_BLOCKED_FILL, BOX_BLOCKED_STROKE)
    } else {
        (BOX_FILL, BOX_STROKE)
    };

    for ring in &layer.polygons {
        let screen = to_screen(view, rect, ring);
        painter.add(egui::Shape::convex_polygon(
            screen,
            fill,
            egui::Stroke::NONE,
        ));
    }
    for line in &layer.lines {
        painter.line_segment(
            [
                view.world_to_screen(rect, line[0]),
                view.world_to_screen(rect, line[1]),
            ],
            egui::Stroke::new(2.0, stroke),
        );
    }
    for point in &layer.points {
        let center = view.world_to_screen(rect, *point);
        painter.circle_filled(center, 4.0, HANDLE_FILL);
        painter.add(egui::Shape::circle_stroke(
            center,
            4.0,
            egui::Stroke::new(1.5, stroke),
        ));
    }

    if let (Some(area), Some(ring)) = (area_km2, layer.polygons.first()) {
        let (min, max) = geometry::bounds(ring);
        let center = view.world_to_screen(
            rect,
            model::Coord::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5),
        );
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            geometry::format_area(area),
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
    }
}
