use crate::model::{BoxCorners, Coord};

use super::geometry::{EPSILON, bounds, find_closest};

// Which corners sit on the max edge of each axis, given the canonical
// order from `rect_from_diagonal`.
fn on_max_edge_x(i: usize) -> bool {
    i == 0 || i == 1
}

fn on_max_edge_y(i: usize) -> bool {
    i == 0 || i == 3
}

/// Margin-clamp one axis value against the envelope bounds, then snap
/// onto the nearest bound if it still escapes them.
fn clamp_axis(value: f64, is_max_edge: bool, env_min: f64, env_max: f64, margin: f64) -> f64 {
    let clamped = if is_max_edge {
        value.min(env_max - margin)
    } else {
        value.max(env_min + margin)
    };
    if clamped < env_min || clamped > env_max {
        find_closest(&[env_min, env_max], clamped).unwrap_or(clamped)
    } else {
        clamped
    }
}

/// Whole-box translate by the pointer delta. With an enclosing ring,
/// each axis is clamped per corner so no edge ends within `margin` of
/// the envelope bounds.
pub fn drag_layer(
    corners: &BoxCorners,
    prev: Coord,
    cur: Coord,
    envelope: Option<&[Coord]>,
    margin: f64,
) -> BoxCorners {
    let dx = cur.x - prev.x;
    let dy = cur.y - prev.y;
    let mut out = *corners;
    for c in &mut out {
        c.x += dx;
        c.y += dy;
    }
    if let Some(ring) = envelope {
        let (emin, emax) = bounds(ring);
        for (i, c) in out.iter_mut().enumerate() {
            c.x = clamp_axis(c.x, on_max_edge_x(i), emin.x, emax.x, margin);
            c.y = clamp_axis(c.y, on_max_edge_y(i), emin.y, emax.y, margin);
        }
    }
    out
}

/// Result of one border-resize tick. `endpoints` is the border's
/// position after the tick, appended by the caller onto the visited
/// trail so the next tick can identify the moved border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderEdit {
    pub corners: BoxCorners,
    pub endpoints: [Coord; 2],
}

/// Single-edge resize. `trail` holds the visited endpoints of the
/// dragged border; the last two entries orient the edit. Returns
/// `None` when the edit is refused or the border is degenerate, in
/// which case the box is untouched.
pub fn edit_layer_border(
    corners: &BoxCorners,
    trail: &[Coord],
    target: Coord,
    envelope: Option<&[Coord]>,
    min_border_range: f64,
) -> Option<BorderEdit> {
    if trail.len() < 2 {
        return None;
    }
    let a = trail[trail.len() - 2];
    let b = trail[trail.len() - 1];
    let vertical = (a.x - b.x).abs() <= EPSILON;
    let horizontal = (a.y - b.y).abs() <= EPSILON;
    // coincident endpoints carry no orientation; treat as a no-op
    // rather than let a 0/0 slope poison the corners
    if vertical == horizontal {
        return None;
    }

    let env_bounds = envelope.map(bounds);
    let mut out = *corners;
    if vertical {
        let edge = b.x;
        let opposite = corners.iter().map(|c| c.x).find(|x| (x - edge).abs() > EPSILON)?;
        let is_max_edge = edge > opposite;
        // moving past min_border_range of the opposite edge is refused
        if is_max_edge && target.x < opposite + min_border_range {
            return None;
        }
        if !is_max_edge && target.x > opposite - min_border_range {
            return None;
        }
        let mut new_x = target.x;
        if let Some((emin, emax)) = env_bounds {
            new_x = clamp_axis(new_x, is_max_edge, emin.x, emax.x, min_border_range);
        }
        let mut moved = [Coord::default(); 2];
        let mut n = 0;
        for c in &mut out {
            if (c.x - edge).abs() <= EPSILON {
                c.x = new_x;
                if n < 2 {
                    moved[n] = *c;
                    n += 1;
                }
            }
        }
        if n < 2 {
            return None;
        }
        Some(BorderEdit {
            corners: out,
            endpoints: moved,
        })
    } else {
        let edge = b.y;
        let opposite = corners.iter().map(|c| c.y).find(|y| (y - edge).abs() > EPSILON)?;
        let is_max_edge = edge > opposite;
        if is_max_edge && target.y < opposite + min_border_range {
            return None;
        }
        if !is_max_edge && target.y > opposite - min_border_range {
            return None;
        }
        let mut new_y = target.y;
        if let Some((emin, emax)) = env_bounds {
            new_y = clamp_axis(new_y, is_max_edge, emin.y, emax.y, min_border_range);
        }
        let mut moved = [Coord::default(); 2];
        let mut n = 0;
        for c in &mut out {
            if (c.y - edge).abs() <= EPSILON {
                c.y = new_y;
                if n < 2 {
                    moved[n] = *c;
                    n += 1;
                }
            }
        }
        if n < 2 {
            return None;
        }
        Some(BorderEdit {
            corners: out,
            endpoints: moved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::{area_km2, close_ring, rect_from_diagonal};

    fn unit_box() -> BoxCorners {
        rect_from_diagonal(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0))
    }

    #[test]
    fn drag_without_envelope_translates_every_corner() {
        let corners = unit_box();
        let moved = drag_layer(
            &corners,
            Coord::new(0.0, 0.0),
            Coord::new(0.25, -0.5),
            None,
            0.0,
        );
        for (before, after) in corners.iter().zip(moved.iter()) {
            assert!((after.x - before.x - 0.25).abs() < 1e-12);
            assert!((after.y - before.y + 0.5).abs() < 1e-12);
        }
        assert!((area_km2(&corners) - area_km2(&moved)).abs() < 1e-6);
    }

    #[test]
    fn drag_clamps_at_envelope_margin() {
        let corners = unit_box();
        let env = close_ring(&rect_from_diagonal(
            Coord::new(-1.0, -1.0),
            Coord::new(2.0, 2.0),
        ));
        // push far right: max-x corners stop at 2.0 - 0.1
        let moved = drag_layer(
            &corners,
            Coord::new(0.0, 0.0),
            Coord::new(10.0, 0.0),
            Some(&env),
            0.1,
        );
        assert!((moved[0].x - 1.9).abs() < 1e-12);
        assert!((moved[1].x - 1.9).abs() < 1e-12);
        // min-x corners escape the bounds and snap onto the near bound
        assert!((moved[2].x - 2.0).abs() < 1e-12);
        assert!((moved[3].x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn drag_snaps_onto_envelope_bound_when_margin_overshoots() {
        let corners = unit_box();
        let env = close_ring(&rect_from_diagonal(
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 1.0),
        ));
        // margin wider than the envelope forces the clamp below the
        // lower bound; the find_closest snap pulls it back on
        let moved = drag_layer(
            &corners,
            Coord::new(0.0, 0.0),
            Coord::new(5.0, 0.0),
            Some(&env),
            2.0,
        );
        assert!(moved[0].x >= 0.0 && moved[0].x <= 1.0);
    }

    #[test]
    fn border_edit_moves_exactly_two_corners() {
        let corners = unit_box();
        // right border: corners 0 and 1 at x = 1
        let trail = vec![Coord::new(1.0, 0.0), Coord::new(1.0, 1.0)];
        let edit = edit_layer_border(&corners, &trail, Coord::new(1.5, 0.7), None, 0.0)
            .expect("edit allowed");
        assert!((edit.corners[0].x - 1.5).abs() < 1e-12);
        assert!((edit.corners[1].x - 1.5).abs() < 1e-12);
        assert_eq!(edit.corners[2], corners[2]);
        assert_eq!(edit.corners[3], corners[3]);
        for e in edit.endpoints {
            assert!((e.x - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn border_edit_below_min_range_is_refused() {
        let corners = unit_box();
        let trail = vec![Coord::new(1.0, 0.0), Coord::new(1.0, 1.0)];
        // dragging the right border within 0.4 of the left edge
        assert_eq!(
            edit_layer_border(&corners, &trail, Coord::new(0.3, 0.5), None, 0.4),
            None
        );
    }

    #[test]
    fn border_edit_horizontal_axis() {
        let corners = unit_box();
        // bottom border: corners 1 and 2 at y = 0
        let trail = vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)];
        let edit = edit_layer_border(&corners, &trail, Coord::new(0.5, -0.25), None, 0.0)
            .expect("edit allowed");
        assert!((edit.corners[1].y + 0.25).abs() < 1e-12);
        assert!((edit.corners[2].y + 0.25).abs() < 1e-12);
        assert_eq!(edit.corners[0], corners[0]);
        assert_eq!(edit.corners[3], corners[3]);
    }

    #[test]
    fn coincident_trail_endpoints_are_a_noop() {
        let corners = unit_box();
        let p = Coord::new(1.0, 1.0);
        assert_eq!(
            edit_layer_border(&corners, &[p, p], Coord::new(2.0, 2.0), None, 0.0),
            None
        );
    }

    #[test]
    fn border_edit_clamped_by_envelope() {
        let corners = unit_box();
        let env = close_ring(&rect_from_diagonal(
            Coord::new(-0.5, -0.5),
            Coord::new(1.5, 1.5),
        ));
        let trail = vec![Coord::new(1.0, 0.0), Coord::new(1.0, 1.0)];
        let edit = edit_layer_border(&corners, &trail, Coord::new(9.0, 0.5), Some(&env), 0.1)
            .expect("edit allowed");
        assert!((edit.corners[0].x - 1.4).abs() < 1e-12);
    }
}
