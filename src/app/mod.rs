use crate::engine::{BboxEngine, geometry};
use crate::model;
use eframe::egui;

mod actions;
mod render;
mod settings;
mod update;

/// Pan/zoom between map coordinates and screen pixels. Latitude grows
/// upward, screen y grows downward. `zoom` is pixels per degree.
#[derive(Clone, Copy, Debug)]
struct View {
    center: model::Coord,
    zoom: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            center: model::Coord::new(0.0, 0.0),
            zoom: 48.0,
        }
    }
}

impl View {
    fn world_to_screen(&self, rect: egui::Rect, world: model::Coord) -> egui::Pos2 {
        let c = rect.center();
        egui::pos2(
            c.x + ((world.x - self.center.x) * self.zoom) as f32,
            c.y - ((world.y - self.center.y) * self.zoom) as f32,
        )
    }

    fn screen_to_world(&self, rect: egui::Rect, screen: egui::Pos2) -> model::Coord {
        let c = rect.center();
        model::Coord::new(
            self.center.x + (screen.x - c.x) as f64 / self.zoom,
            self.center.y - (screen.y - c.y) as f64 / self.zoom,
        )
    }

    fn zoom_about_screen_point(
        &mut self,
        rect: egui::Rect,
        screen_point: egui::Pos2,
        zoom_delta: f64,
    ) {
        let before = self.screen_to_world(rect, screen_point);
        self.zoom = (self.zoom * zoom_delta).clamp(2.0, 2_000_000.0);
        let after = self.screen_to_world(rect, screen_point);
        self.center.x += before.x - after.x;
        self.center.y += before.y - after.y;
    }

    /// Center on a point set with some breathing room.
    fn fit(&mut self, points: &[model::Coord], rect_size: f64) {
        if points.is_empty() {
            return;
        }
        let (min, max) = geometry::bounds(points);
        self.center = model::Coord::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5);
        let extent = (max.x - min.x).max(max.y - min.y);
        if extent > f64::EPSILON {
            self.zoom = (rect_size * 0.6 / extent).clamp(2.0, 2_000_000.0);
        }
    }
}

pub struct BboxApp {
    engine: BboxEngine,
    view: View,
    settings_path: String,
    file_path: String,
    status: Option<String>,
    /// True while a drag pans the map instead of feeding the engine.
    dragging_map: bool,
}

impl BboxApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("bboxdraw.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        let engine = BboxEngine::with_seed(settings.to_config(), &settings.seed_points);
        let mut view = View::default();
        if let Some(ring) = engine.envelope() {
            view.fit(ring, 800.0);
        } else if !settings.seed_points.is_empty() {
            view.fit(&settings.seed_points, 800.0);
        }

        Self {
            engine,
            view,
            settings_path,
            file_path: settings.file_path,
            status: None,
            dragging_map: false,
        }
    }

    /// Host-side picking: border segments first, then the box body.
    /// Only the committed box is a draggable object.
    fn pick(&self, world: model::Coord, threshold: f64) -> Option<model::Feature> {
        let corners = self.engine.active_points().corners()?;
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            if model::distance_to_segment(world, a, b) <= threshold {
                return Some(model::Feature {
                    name: model::FeatureName::BorderLines,
                    coordinates: vec![a, b],
                });
            }
        }
        let ring = geometry::close_ring(corners);
        if geometry::point_in_polygon(&ring, world) {
            return Some(model::Feature {
                name: model::FeatureName::BoxLayer,
                coordinates: ring,
            });
        }
        None
    }
}
