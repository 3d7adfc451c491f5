use crate::model::{
    ActivePoints, Coord, DragInfo, DragKind, Feature, FeatureName, HoverState,
};

use super::BboxEngine;
use super::drag;
use super::event::{Effect, InteractionState, ViewState};
use super::geometry::EPSILON;

/// Orientation of a hovered border from its two endpoints.
fn classify_border(coordinates: &[Coord]) -> HoverState {
    match coordinates {
        [a, b, ..] => {
            if (a.x - b.x).abs() <= EPSILON {
                HoverState::BorderVertical
            } else if (a.y - b.y).abs() <= EPSILON {
                HoverState::BorderHorizontal
            } else {
                HoverState::None
            }
        }
        _ => HoverState::None,
    }
}

impl BboxEngine {
    pub(super) fn on_click(&mut self, coordinate: Coord, feature: Option<Feature>) -> Vec<Effect> {
        if !self.edit_mode {
            if feature.is_some_and(|f| f.name == FeatureName::BoxLayer) {
                self.edit_mode = true;
            }
            return Vec::new();
        }
        if !self.inside_allowed(coordinate) {
            return Vec::new();
        }
        if let Some(predicted) = self.predicted {
            let mut effects = Vec::new();
            if self.hover != HoverState::Blocked {
                self.active = ActivePoints::Box(predicted);
                self.predicted = None;
                self.recompute_area();
                effects.push(Effect::BboxChanged {
                    points: predicted.to_vec(),
                    area_km2: self.area_km2,
                });
            }
            return effects;
        }
        if feature.is_some_and(|f| f.name == FeatureName::BoxLayer)
            && self.active.corners().is_some()
        {
            // clicking the committed box leaves edit mode
            self.set_edit_mode(false);
            return Vec::new();
        }
        if self.active.len() < 2 {
            let effects = self.add_point(coordinate, false);
            self.edit_mode = true;
            // the hover tick will lift this; until then a second
            // click on the same spot cannot commit by accident
            self.hover = HoverState::Blocked;
            return effects;
        }
        Vec::new()
    }

    pub(super) fn on_hover(&mut self, coordinate: Coord, feature: Option<Feature>) -> Vec<Effect> {
        if !self.edit_mode {
            self.hover = if feature.is_some_and(|f| f.name == FeatureName::BoxLayer) {
                HoverState::Layer
            } else {
                HoverState::None
            };
            return Vec::new();
        }
        // live preview rectangle while exactly one corner is committed
        if matches!(self.active, ActivePoints::Anchor(_)) {
            self.add_point(coordinate, true);
        }
        let mut hover = HoverState::None;
        if !self.inside_allowed(coordinate) {
            hover = HoverState::Blocked;
        } else if let Some(predicted) = self.predicted {
            if !self.size_ok(&predicted) {
                hover = HoverState::Blocked;
            }
        }
        if hover == HoverState::None {
            if let Some(f) = &feature {
                hover = match f.name {
                    FeatureName::BorderLines => classify_border(&f.coordinates),
                    FeatureName::BoxLayer => HoverState::Layer,
                };
            }
        }
        self.hover = hover;
        Vec::new()
    }

    pub(super) fn on_drag_start(
        &mut self,
        coordinate: Coord,
        feature: Option<Feature>,
    ) -> Vec<Effect> {
        if !self.edit_mode {
            return Vec::new();
        }
        // nothing to drag unless the host picked an object
        let Some(f) = feature else {
            return Vec::new();
        };
        self.drag = Some(DragInfo {
            kind: DragKind::Start,
            coords: [coordinate, coordinate],
            origin: coordinate,
        });
        self.border_trail = f.coordinates;
        Vec::new()
    }

    pub(super) fn on_drag(&mut self, coordinate: Coord, feature: Option<Feature>) -> Vec<Effect> {
        if !self.edit_mode {
            return Vec::new();
        }
        let Some(info) = self.drag else {
            return Vec::new();
        };
        // leaving the allowed area never aborts an in-flight drag,
        // but a drag may not start outside it
        let in_flight = info.kind != DragKind::Start;
        if !in_flight && !self.inside_allowed(coordinate) {
            return Vec::new();
        }
        let prev = info.coords[1];
        let Some(corners) = self.active.corners().copied() else {
            self.drag = Some(DragInfo {
                coords: [prev, coordinate],
                ..info
            });
            return Vec::new();
        };
        let is_border = match info.kind {
            DragKind::Border => true,
            DragKind::Layer => false,
            DragKind::Start => feature.as_ref().is_some_and(Feature::is_border),
        };
        if is_border {
            if let Some(edit) = drag::edit_layer_border(
                &corners,
                &self.border_trail,
                coordinate,
                self.envelope.as_deref(),
                self.config.min_border_range,
            ) {
                self.active = ActivePoints::Box(edit.corners);
                self.border_trail.extend(edit.endpoints);
                self.recompute_area();
            }
            self.drag = Some(DragInfo {
                kind: DragKind::Border,
                coords: [prev, coordinate],
                origin: info.origin,
            });
        } else {
            let moved = drag::drag_layer(
                &corners,
                prev,
                coordinate,
                self.envelope.as_deref(),
                self.config.min_border_range,
            );
            self.active = ActivePoints::Box(moved);
            self.recompute_area();
            self.drag = Some(DragInfo {
                kind: DragKind::Layer,
                coords: [prev, coordinate],
                origin: info.origin,
            });
        }
        Vec::new()
    }

    pub(super) fn on_drag_stop(&mut self) -> Vec<Effect> {
        let was_dragging = self.drag.take().is_some();
        self.border_trail.clear();
        if !was_dragging {
            return Vec::new();
        }
        match self.active {
            ActivePoints::Box(corners) => vec![Effect::BboxChanged {
                points: corners.to_vec(),
                area_km2: self.area_km2,
            }],
            _ => Vec::new(),
        }
    }

    pub(super) fn on_view_state_change(
        &mut self,
        view: ViewState,
        old_view: ViewState,
        interaction: InteractionState,
    ) -> Vec<Effect> {
        if !self.config.follow_map_screen || !interaction.any() {
            return Vec::new();
        }
        let dx = view.longitude - old_view.longitude;
        let dy = view.latitude - old_view.latitude;
        if dx.abs() <= EPSILON && dy.abs() <= EPSILON {
            return Vec::new();
        }
        match &mut self.active {
            ActivePoints::Empty => {}
            ActivePoints::Anchor(anchor) => *anchor = anchor.offset(dx, dy),
            ActivePoints::Box(corners) => {
                for c in corners.iter_mut() {
                    *c = c.offset(dx, dy);
                }
            }
        }
        if let Some(ring) = &mut self.envelope {
            for p in ring.iter_mut() {
                *p = p.offset(dx, dy);
            }
        }
        self.predicted = None;
        self.recompute_area();
        if self.active.is_empty() {
            return Vec::new();
        }
        vec![Effect::BboxChanged {
            points: self.active.to_vec(),
            area_km2: self.area_km2,
        }]
    }
}
