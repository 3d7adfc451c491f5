use crate::engine::{BboxEngine, Effect, geometry};
use crate::model;

use super::{BboxApp, settings};

impl BboxApp {
    pub(super) fn settings_snapshot(&self) -> settings::AppSettings {
        let config = self.engine.config();
        settings::AppSettings {
            file_path: self.file_path.clone(),
            min_border_range: config.min_border_range,
            min_bbox_area_km2: config.min_bbox_area_km2,
            max_bbox_area_km2: config.max_bbox_area_km2,
            follow_map_screen: config.follow_map_screen,
            available_area: config.available_area.clone(),
            seed_points: self.engine.active_points().to_vec(),
            disabled: config.disabled,
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }

    pub(super) fn reload_settings(&mut self) {
        let settings = settings::load_settings(&self.settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();
        self.file_path = settings.file_path.clone();
        self.engine = BboxEngine::with_seed(settings.to_config(), &settings.seed_points);
        self.status = Some("Settings reloaded".to_string());
    }

    fn export(&self) -> model::BboxExport {
        model::BboxExport {
            points: self.engine.active_points().to_vec(),
            area_km2: self.engine.area_km2(),
        }
    }

    pub(super) fn save_to_path(&mut self) {
        match serde_json::to_string_pretty(&self.export()) {
            Ok(json) => match std::fs::write(&self.file_path, json) {
                Ok(()) => self.status = Some(format!("Saved {}", self.file_path)),
                Err(e) => self.status = Some(format!("Save failed: {e}")),
            },
            Err(e) => self.status = Some(format!("Serialize failed: {e}")),
        }
    }

    pub(super) fn save_json_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("bbox.json")
            .add_filter("JSON", &["json"])
            .save_file()
        {
            let path_str = path.display().to_string();
            match serde_json::to_string_pretty(&self.export()) {
                Ok(json) => match std::fs::write(&path, json) {
                    Ok(()) => {
                        self.file_path = path_str.clone();
                        self.status = Some(format!("Saved {path_str}"));
                    }
                    Err(e) => self.status = Some(format!("Save failed: {e}")),
                },
                Err(e) => self.status = Some(format!("Serialize failed: {e}")),
            }
        }
    }

    pub(super) fn open_json_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<model::BboxExport>(&json) {
                    Ok(export) => {
                        self.engine =
                            BboxEngine::with_seed(self.engine.config().clone(), &export.points);
                        if let Some(corners) = self.engine.active_points().corners() {
                            self.view.fit(corners, 800.0);
                        }
                        self.file_path = path_str.clone();
                        self.status = Some(format!("Loaded {path_str}"));
                    }
                    Err(e) => self.status = Some(format!("Parse failed: {e}")),
                },
                Err(e) => self.status = Some(format!("Read failed: {e}")),
            }
        }
    }

    pub(super) fn clear_bbox(&mut self) {
        let effects = self.engine.clear();
        self.apply_effects(effects);
    }

    /// Turn engine effects into status-line feedback. Persisting the
    /// emitted points is this host's job, done on demand via save.
    pub(super) fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BboxChanged { points, area_km2 } => {
                    self.status = Some(match area_km2 {
                        Some(area) => format!(
                            "bbox updated: {} corner(s), {}",
                            points.len(),
                            geometry::format_area(area)
                        ),
                        None => format!("bbox updated: {} corner(s)", points.len()),
                    });
                }
                Effect::BboxCleared => {
                    self.status = Some("bbox cleared".to_string());
                }
            }
        }
    }
}
