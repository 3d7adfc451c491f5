use serde::{Deserialize, Serialize};

/// Planar 2-vector in map space. When the host feeds geographic
/// coordinates, `x` carries longitude and `y` latitude.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Canonical corner order: 0 = (max x, max y), 1 = (max x, min y),
/// 2 = (min x, min y), 3 = (min x, max y). Consecutive corners are
/// adjacent, so the ring is simple.
pub type BoxCorners = [Coord; 4];

/// The committed corner set. Two or three corners never occur; the
/// in-between preview lives in the engine's predicted set instead.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum ActivePoints {
    #[default]
    Empty,
    Anchor(Coord),
    Box(BoxCorners),
}

impl ActivePoints {
    pub fn len(&self) -> usize {
        match self {
            ActivePoints::Empty => 0,
            ActivePoints::Anchor(_) => 1,
            ActivePoints::Box(_) => 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ActivePoints::Empty)
    }

    pub fn corners(&self) -> Option<&BoxCorners> {
        match self {
            ActivePoints::Box(corners) => Some(corners),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<Coord> {
        match self {
            ActivePoints::Empty => Vec::new(),
            ActivePoints::Anchor(anchor) => vec![*anchor],
            ActivePoints::Box(corners) => corners.to_vec(),
        }
    }
}

/// What is being dragged. `Start` is the state between mouse-down and
/// the first movement tick, before the target kind is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Start,
    Layer,
    Border,
}

/// Previous/current pointer positions of an in-flight drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragInfo {
    pub kind: DragKind,
    pub coords: [Coord; 2],
    pub origin: Coord,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    None,
    /// Pointer over the box body.
    Layer,
    /// Outside the allowed area, or the candidate box violates the
    /// size limits. Clicks in this state never commit.
    Blocked,
    /// Over a horizontal border (resizes vertically).
    BorderHorizontal,
    /// Over a vertical border (resizes horizontally).
    BorderVertical,
}

/// Cursor token handed to the host; the host maps it onto whatever
/// its windowing layer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Grab,
    Grabbing,
    Pointer,
    NotAllowed,
    ResizeHorizontal,
    ResizeVertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureName {
    BoxLayer,
    BorderLines,
}

/// A picked object under the pointer, reported by the host with each
/// click/hover/drag event.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub name: FeatureName,
    pub coordinates: Vec<Coord>,
}

impl Feature {
    pub fn is_border(&self) -> bool {
        self.name == FeatureName::BorderLines
    }
}

/// Where drawing is allowed: a meters-based rectangle around a center
/// point, or four literal corner coordinates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AreaSpec {
    CenterSize {
        center: Coord,
        width_m: f64,
        height_m: f64,
    },
    Corners(BoxCorners),
}

/// Engine configuration. Validated by default-substitution only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BboxConfig {
    pub available_area: Option<AreaSpec>,
    /// Minimum edge length (degrees) a resize may leave, and the
    /// margin kept from the enclosing envelope while dragging.
    pub min_border_range: f64,
    pub min_bbox_area_km2: Option<f64>,
    pub max_bbox_area_km2: Option<f64>,
    /// Keep the box anchored to the map while the view pans or zooms.
    pub follow_map_screen: bool,
    pub disabled: bool,
}

impl Default for BboxConfig {
    fn default() -> Self {
        Self {
            available_area: None,
            min_border_range: 0.0,
            min_bbox_area_km2: None,
            max_bbox_area_km2: None,
            follow_map_screen: false,
            disabled: false,
        }
    }
}

/// On-disk form of an exported bbox.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BboxExport {
    pub points: Vec<Coord>,
    pub area_km2: Option<f64>,
}

pub fn distance_to_segment(p: Coord, a: Coord, b: Coord) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let ab_len2 = abx * abx + aby * aby;
    if ab_len2 <= f64::EPSILON {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / ab_len2).clamp(0.0, 1.0);
    let cx = a.x + abx * t;
    let cy = a.y + aby * t;
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_points_lengths() {
        assert_eq!(ActivePoints::Empty.len(), 0);
        assert_eq!(ActivePoints::Anchor(Coord::new(1.0, 2.0)).len(), 1);
        let b = [
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
        ];
        assert_eq!(ActivePoints::Box(b).len(), 4);
    }

    #[test]
    fn distance_to_segment_perpendicular_and_past_end() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(10.0, 0.0);
        assert!((distance_to_segment(Coord::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((distance_to_segment(Coord::new(-4.0, 0.0), a, b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn distance_to_degenerate_segment_is_point_distance() {
        let a = Coord::new(1.0, 1.0);
        assert!((distance_to_segment(Coord::new(4.0, 5.0), a, a) - 5.0).abs() < 1e-12);
    }
}
