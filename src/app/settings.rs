use crate::model;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub file_path: String,
    pub min_border_range: f64,
    pub min_bbox_area_km2: Option<f64>,
    pub max_bbox_area_km2: Option<f64>,
    pub follow_map_screen: bool,
    pub available_area: Option<model::AreaSpec>,
    /// Initial bbox: one anchor point or four corners.
    pub seed_points: Vec<model::Coord>,
    pub disabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            file_path: "bbox.json".to_string(),
            min_border_range: 0.0,
            min_bbox_area_km2: None,
            max_bbox_area_km2: None,
            follow_map_screen: false,
            available_area: None,
            seed_points: Vec::new(),
            disabled: false,
        }
    }
}

impl AppSettings {
    pub(super) fn to_config(&self) -> model::BboxConfig {
        model::BboxConfig {
            available_area: self.available_area.clone(),
            min_border_range: self.min_border_range,
            min_bbox_area_km2: self.min_bbox_area_km2,
            max_bbox_area_km2: self.max_bbox_area_km2,
            follow_map_screen: self.follow_map_screen,
            disabled: self.disabled,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
