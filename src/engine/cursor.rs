use crate::model::{CursorStyle, HoverState};

use super::BboxEngine;

impl BboxEngine {
    /// Cursor token for the host's pointer-style resolver. Precedence:
    /// an active drag, then edit-mode hover states, then the box
    /// hover outside edit mode, then the plain map grab.
    pub fn cursor(&self) -> CursorStyle {
        if self.drag.is_some() {
            return CursorStyle::Grabbing;
        }
        if self.edit_mode {
            let placing = self.active.len() < 2;
            let hovered = self.hover != HoverState::None;
            if placing || hovered {
                return match self.hover {
                    HoverState::Blocked => CursorStyle::NotAllowed,
                    HoverState::BorderHorizontal => CursorStyle::ResizeVertical,
                    HoverState::BorderVertical => CursorStyle::ResizeHorizontal,
                    HoverState::Layer | HoverState::None => CursorStyle::Pointer,
                };
            }
        } else if self.hover == HoverState::Layer {
            return CursorStyle::Pointer;
        }
        CursorStyle::Grab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::event::Event;
    use crate::engine::geometry::rect_from_diagonal;
    use crate::model::{BboxConfig, Coord, Feature, FeatureName};

    fn seeded_engine() -> BboxEngine {
        let corners =
            rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0)).to_vec();
        BboxEngine::with_seed(BboxConfig::default(), &corners)
    }

    #[test]
    fn idle_map_shows_grab() {
        let engine = BboxEngine::new(BboxConfig::default());
        assert_eq!(engine.cursor(), CursorStyle::Grab);
    }

    #[test]
    fn placing_shows_pointer_until_blocked() {
        let mut engine = BboxEngine::new(BboxConfig::default());
        engine.set_edit_mode(true);
        assert_eq!(engine.cursor(), CursorStyle::Pointer);
        engine.handle(Event::Click {
            coordinate: Coord::new(0.0, 0.0),
            feature: None,
        });
        // the post-click guard state reads as not-allowed
        assert_eq!(engine.cursor(), CursorStyle::NotAllowed);
    }

    #[test]
    fn border_hover_maps_to_resize_cursors() {
        let mut engine = seeded_engine();
        engine.set_edit_mode(true);
        engine.handle(Event::Hover {
            coordinate: Coord::new(1.0, 0.5),
            feature: Some(Feature {
                name: FeatureName::BorderLines,
                coordinates: vec![Coord::new(1.0, 0.0), Coord::new(1.0, 1.0)],
            }),
        });
        assert_eq!(engine.cursor(), CursorStyle::ResizeHorizontal);
        engine.handle(Event::Hover {
            coordinate: Coord::new(0.5, 1.0),
            feature: Some(Feature {
                name: FeatureName::BorderLines,
                coordinates: vec![Coord::new(0.0, 1.0), Coord::new(1.0, 1.0)],
            }),
        });
        assert_eq!(engine.cursor(), CursorStyle::ResizeVertical);
    }

    #[test]
    fn dragging_wins_over_everything() {
        let mut engine = seeded_engine();
        engine.set_edit_mode(true);
        let ring = engine.active_points().to_vec();
        engine.handle(Event::DragStart {
            coordinate: Coord::new(0.5, 0.5),
            feature: Some(Feature {
                name: FeatureName::BoxLayer,
                coordinates: ring,
            }),
        });
        assert_eq!(engine.cursor(), CursorStyle::Grabbing);
    }

    #[test]
    fn hovering_the_box_outside_edit_mode_points() {
        let mut engine = seeded_engine();
        let ring = engine.active_points().to_vec();
        engine.handle(Event::Hover {
            coordinate: Coord::new(0.5, 0.5),
            feature: Some(Feature {
                name: FeatureName::BoxLayer,
                coordinates: ring,
            }),
        });
        assert_eq!(engine.cursor(), CursorStyle::Pointer);
    }
}
