use crate::model::{
    ActivePoints, AreaSpec, BboxConfig, BoxCorners, Coord, DragInfo, HoverState,
};

mod cursor;
mod dispatch;
mod drag;
mod event;
pub mod geometry;
mod layers;

pub use event::{Effect, Event, InteractionState, ViewState};
pub use layers::LayerDescriptor;

/// The interactive bounding-box state machine. All mutation happens
/// through [`BboxEngine::handle`] (and [`BboxEngine::clear`]); the
/// host reads state back through the accessors and layer descriptors.
pub struct BboxEngine {
    config: BboxConfig,
    active: ActivePoints,
    /// Live preview rectangle while hovering with one committed
    /// corner. Never committed as-is.
    predicted: Option<BoxCorners>,
    /// Closed ring of the allowed drawing region.
    envelope: Option<Vec<Coord>>,
    drag: Option<DragInfo>,
    /// Visited endpoints of the border being resized; the last two
    /// entries identify the border across incremental drag ticks.
    border_trail: Vec<Coord>,
    hover: HoverState,
    edit_mode: bool,
    area_km2: Option<f64>,
}

impl BboxEngine {
    pub fn new(config: BboxConfig) -> Self {
        let envelope = config.available_area.as_ref().map(envelope_ring);
        Self {
            config,
            active: ActivePoints::Empty,
            predicted: None,
            envelope,
            drag: None,
            border_trail: Vec::new(),
            hover: HoverState::None,
            edit_mode: false,
            area_km2: None,
        }
    }

    /// Seed from caller-supplied corners: one point becomes the
    /// anchor, four become the box, anything else is ignored.
    pub fn with_seed(config: BboxConfig, points: &[Coord]) -> Self {
        let mut engine = Self::new(config);
        match points {
            [anchor] => engine.active = ActivePoints::Anchor(*anchor),
            [a, b, c, d] => engine.active = ActivePoints::Box([*a, *b, *c, *d]),
            _ => {}
        }
        engine.recompute_area();
        engine
    }

    /// Reset to empty. The only way state survives is through the
    /// effects already delivered to the host.
    pub fn clear(&mut self) -> Vec<Effect> {
        let had_points = !self.active.is_empty();
        self.active = ActivePoints::Empty;
        self.predicted = None;
        self.drag = None;
        self.border_trail.clear();
        self.hover = HoverState::None;
        self.edit_mode = false;
        self.area_km2 = None;
        if had_points {
            vec![Effect::BboxCleared]
        } else {
            Vec::new()
        }
    }

    /// Process one host event. Runs synchronously to completion; the
    /// returned effects are the only outward notifications.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.config.disabled {
            return Vec::new();
        }
        match event {
            Event::Click {
                coordinate,
                feature,
            } => self.on_click(coordinate, feature),
            Event::Hover {
                coordinate,
                feature,
            } => self.on_hover(coordinate, feature),
            Event::DragStart {
                coordinate,
                feature,
            } => self.on_drag_start(coordinate, feature),
            Event::Drag {
                coordinate,
                feature,
            } => self.on_drag(coordinate, feature),
            Event::DragStop => self.on_drag_stop(),
            Event::ViewStateChange {
                view,
                old_view,
                interaction,
            } => self.on_view_state_change(view, old_view, interaction),
        }
    }

    pub fn active_points(&self) -> &ActivePoints {
        &self.active
    }

    pub fn predicted(&self) -> Option<&BoxCorners> {
        self.predicted.as_ref()
    }

    pub fn envelope(&self) -> Option<&[Coord]> {
        self.envelope.as_deref()
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on && !self.config.disabled;
        if !self.edit_mode {
            self.predicted = None;
            self.drag = None;
            self.border_trail.clear();
            self.hover = HoverState::None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn area_km2(&self) -> Option<f64> {
        self.area_km2
    }

    pub fn config(&self) -> &BboxConfig {
        &self.config
    }

    /// Replace the configuration, rebuilding the envelope ring.
    pub fn set_config(&mut self, config: BboxConfig) {
        self.envelope = config.available_area.as_ref().map(envelope_ring);
        if config.disabled {
            self.set_edit_mode(false);
        }
        self.config = config;
    }

    pub(super) fn inside_allowed(&self, p: Coord) -> bool {
        match &self.envelope {
            Some(ring) => geometry::point_in_polygon(ring, p),
            // no envelope configured means unconstrained
            None => true,
        }
    }

    /// Commit or preview a corner. With no committed points the
    /// coordinate becomes the anchor; with an anchor, anchor and
    /// coordinate become opposite corners of the canonical rectangle.
    pub(super) fn add_point(&mut self, coordinate: Coord, draft: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.active {
            ActivePoints::Empty => {
                if !draft {
                    self.active = ActivePoints::Anchor(coordinate);
                    self.recompute_area();
                    effects.push(Effect::BboxChanged {
                        points: self.active.to_vec(),
                        area_km2: self.area_km2,
                    });
                }
            }
            ActivePoints::Anchor(anchor) => {
                let corners = geometry::rect_from_diagonal(anchor, coordinate);
                if draft {
                    self.predicted = Some(corners);
                } else {
                    self.active = ActivePoints::Box(corners);
                    self.predicted = None;
                    self.recompute_area();
                    effects.push(Effect::BboxChanged {
                        points: corners.to_vec(),
                        area_km2: self.area_km2,
                    });
                }
            }
            ActivePoints::Box(_) => {}
        }
        if draft {
            self.recompute_area();
        }
        effects
    }

    /// Area follows the committed box, or the predicted preview while
    /// drafting.
    pub(super) fn recompute_area(&mut self) {
        self.area_km2 = self
            .active
            .corners()
            .or(self.predicted.as_ref())
            .map(geometry::area_km2);
    }

    /// Size checks driving the blocked hover state: both edges at
    /// least `min_border_range`, area within the configured limits.
    pub(super) fn size_ok(&self, corners: &BoxCorners) -> bool {
        let (min, max) = geometry::bounds(corners);
        if (max.x - min.x) < self.config.min_border_range
            || (max.y - min.y) < self.config.min_border_range
        {
            return false;
        }
        let area = geometry::area_km2(corners);
        if let Some(min_area) = self.config.min_bbox_area_km2 {
            if area < min_area {
                return false;
            }
        }
        if let Some(max_area) = self.config.max_bbox_area_km2 {
            if area > max_area {
                return false;
            }
        }
        true
    }
}

fn envelope_ring(spec: &AreaSpec) -> Vec<Coord> {
    match spec {
        AreaSpec::Corners(corners) => geometry::close_ring(corners),
        AreaSpec::CenterSize {
            center,
            width_m,
            height_m,
        } => {
            let (dx, dy) = geometry::meters_to_degrees(*width_m, *height_m);
            let corners = geometry::rect_from_diagonal(
                center.offset(-dx * 0.5, -dy * 0.5),
                center.offset(dx * 0.5, dy * 0.5),
            );
            geometry::close_ring(&corners)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_accepts_one_or_four_points() {
        let one = BboxEngine::with_seed(BboxConfig::default(), &[Coord::new(1.0, 2.0)]);
        assert_eq!(one.active_points().len(), 1);
        assert_eq!(one.area_km2(), None);

        let corners =
            geometry::rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)).to_vec();
        let four = BboxEngine::with_seed(BboxConfig::default(), &corners);
        assert_eq!(four.active_points().len(), 4);
        assert!(four.area_km2().unwrap() > 0.0);

        let two = BboxEngine::with_seed(
            BboxConfig::default(),
            &[Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)],
        );
        assert!(two.active_points().is_empty());
    }

    #[test]
    fn clear_resets_everything_and_reports_once() {
        let corners =
            geometry::rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)).to_vec();
        let mut engine = BboxEngine::with_seed(BboxConfig::default(), &corners);
        engine.set_edit_mode(true);
        assert_eq!(engine.clear(), vec![Effect::BboxCleared]);
        assert!(engine.active_points().is_empty());
        assert!(!engine.edit_mode());
        assert_eq!(engine.area_km2(), None);
        // a second clear has nothing to report
        assert!(engine.clear().is_empty());
    }

    #[test]
    fn envelope_from_center_size_is_a_closed_ring() {
        let config = BboxConfig {
            available_area: Some(AreaSpec::CenterSize {
                center: Coord::new(10.0, 50.0),
                width_m: 20_000.0,
                height_m: 10_000.0,
            }),
            ..BboxConfig::default()
        };
        let engine = BboxEngine::new(config);
        let ring = engine.envelope().expect("envelope configured");
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert!(engine.inside_allowed(Coord::new(10.0, 50.0)));
        assert!(!engine.inside_allowed(Coord::new(11.0, 50.0)));
    }

    #[test]
    fn disabled_engine_ignores_events() {
        let config = BboxConfig {
            disabled: true,
            ..BboxConfig::default()
        };
        let mut engine = BboxEngine::new(config);
        engine.set_edit_mode(true);
        assert!(!engine.edit_mode());
        let fx = engine.handle(Event::Click {
            coordinate: Coord::new(1.0, 1.0),
            feature: None,
        });
        assert!(fx.is_empty());
        assert!(engine.active_points().is_empty());
    }

    #[test]
    fn size_ok_respects_area_limits() {
        let config = BboxConfig {
            max_bbox_area_km2: Some(1.0),
            ..BboxConfig::default()
        };
        let engine = BboxEngine::new(config);
        let big = geometry::rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0));
        assert!(!engine.size_ok(&big));
        let small =
            geometry::rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(0.001, 0.001));
        assert!(engine.size_ok(&small));
    }
}
