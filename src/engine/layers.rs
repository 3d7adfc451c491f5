use crate::model::{ActivePoints, BoxCorners, Coord, HoverState};

use super::BboxEngine;
use super::geometry::close_ring;

/// What the host should draw for one layer, in map coordinates. The
/// engine never draws; these are recomputed from state each render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerDescriptor {
    pub id: &'static str,
    pub polygons: Vec<Vec<Coord>>,
    pub lines: Vec<[Coord; 2]>,
    pub points: Vec<Coord>,
    /// Render with the blocked tint (out-of-bounds or size-violating
    /// candidate).
    pub blocked: bool,
}

fn border_segments(corners: &BoxCorners) -> Vec<[Coord; 2]> {
    (0..4)
        .map(|i| [corners[i], corners[(i + 1) % 4]])
        .collect()
}

impl BboxEngine {
    /// Allowed-area polygon, when one is configured.
    pub fn area_layer(&self) -> Option<LayerDescriptor> {
        let ring = self.envelope()?.to_vec();
        Some(LayerDescriptor {
            id: "allowed-area",
            polygons: vec![ring],
            ..LayerDescriptor::default()
        })
    }

    /// Box fill, border lines and corner points for the committed box,
    /// or for the predicted preview while drafting.
    pub fn bbox_layer(&self) -> Option<LayerDescriptor> {
        let mut layer = LayerDescriptor {
            id: "bbox",
            blocked: self.hover() == HoverState::Blocked,
            ..LayerDescriptor::default()
        };
        match self.active_points() {
            ActivePoints::Empty => {
                let predicted = self.predicted()?;
                layer.polygons.push(close_ring(predicted));
                layer.lines = border_segments(predicted);
            }
            ActivePoints::Anchor(anchor) => {
                layer.points.push(*anchor);
                if let Some(predicted) = self.predicted() {
                    layer.polygons.push(close_ring(predicted));
                    layer.lines = border_segments(predicted);
                }
            }
            ActivePoints::Box(corners) => {
                layer.polygons.push(close_ring(corners));
                layer.lines = border_segments(corners);
                layer.points = corners.to_vec();
            }
        }
        Some(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::event::Event;
    use crate::engine::geometry::rect_from_diagonal;
    use crate::model::{AreaSpec, BboxConfig};

    #[test]
    fn empty_engine_has_no_layers() {
        let engine = BboxEngine::new(BboxConfig::default());
        assert!(engine.area_layer().is_none());
        assert!(engine.bbox_layer().is_none());
    }

    #[test]
    fn committed_box_layer_carries_ring_borders_and_corners() {
        let corners = rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0));
        let engine = BboxEngine::with_seed(BboxConfig::default(), &corners.to_vec());
        let layer = engine.bbox_layer().expect("layer for committed box");
        assert_eq!(layer.polygons.len(), 1);
        assert_eq!(layer.polygons[0].len(), 5);
        assert_eq!(layer.lines.len(), 4);
        assert_eq!(layer.points.len(), 4);
        assert!(!layer.blocked);
    }

    #[test]
    fn anchor_layer_shows_point_and_preview() {
        let mut engine = BboxEngine::new(BboxConfig::default());
        engine.set_edit_mode(true);
        engine.handle(Event::Click {
            coordinate: Coord::new(0.0, 0.0),
            feature: None,
        });
        let layer = engine.bbox_layer().expect("anchor layer");
        assert_eq!(layer.points.len(), 1);
        assert!(layer.polygons.is_empty());

        engine.handle(Event::Hover {
            coordinate: Coord::new(0.5, 0.5),
            feature: None,
        });
        let layer = engine.bbox_layer().expect("anchor + preview layer");
        assert_eq!(layer.points.len(), 1);
        assert_eq!(layer.polygons.len(), 1);
    }

    #[test]
    fn area_layer_reflects_configured_envelope() {
        let config = BboxConfig {
            available_area: Some(AreaSpec::Corners(rect_from_diagonal(
                Coord::new(0.0, 0.0),
                Coord::new(2.0, 2.0),
            ))),
            ..BboxConfig::default()
        };
        let engine = BboxEngine::new(config);
        let layer = engine.area_layer().expect("area layer");
        assert_eq!(layer.id, "allowed-area");
        assert_eq!(layer.polygons[0].len(), 5);
    }
}
