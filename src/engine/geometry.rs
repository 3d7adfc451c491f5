use crate::model::{BoxCorners, Coord};

pub(crate) const EPSILON: f64 = 1e-9;

/// Meters per degree on both axes. The coordinate space is treated as
/// a plane with linear offsets, so area stays translation invariant.
pub(crate) const METERS_PER_DEGREE: f64 = 111_320.0;

/// Ray-casting parity test over a closed ring. The last point does
/// not need to repeat the first; indexing wraps.
pub fn point_in_polygon(polygon: &[Coord], point: Coord) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Element of `values` closest to `target`. Ties keep the later
/// element (the scan compares with `<=`); envelope snapping depends
/// on that, so keep it when touching this.
pub fn find_closest(values: &[f64], target: f64) -> Option<f64> {
    let mut best: Option<f64> = None;
    for &v in values {
        match best {
            Some(b) if (v - target).abs() > (b - target).abs() => {}
            _ => best = Some(v),
        }
    }
    best
}

/// Index of the coordinate with the largest x + y sum. A cheap
/// diagonal-corner heuristic, only meaningful for axis-aligned boxes.
pub fn max_sum_index(points: &[Coord]) -> usize {
    let mut idx = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x + p.y > points[idx].x + points[idx].y {
            idx = i;
        }
    }
    idx
}

/// Index of the coordinate with the smallest x + y sum.
pub fn min_sum_index(points: &[Coord]) -> usize {
    let mut idx = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x + p.y < points[idx].x + points[idx].y {
            idx = i;
        }
    }
    idx
}

/// Builds the canonical 4-corner rectangle with `a` and `b` as
/// opposite corners (see `model::BoxCorners` for the order). The four
/// axis-aligned candidates are rotated so the max-sum corner lands at
/// index 0, then the winding is flipped if index 1 does not share
/// corner 0's x edge. Axis-aligned boxes only.
pub fn rect_from_diagonal(a: Coord, b: Coord) -> BoxCorners {
    let candidates = [a, Coord::new(b.x, a.y), b, Coord::new(a.x, b.y)];
    let hi = max_sum_index(&candidates);
    let lo = min_sum_index(&candidates);
    let mut out = if (hi, lo) == (0, 2) {
        candidates
    } else {
        [
            candidates[hi],
            candidates[(hi + 1) % 4],
            candidates[(hi + 2) % 4],
            candidates[(hi + 3) % 4],
        ]
    };
    if (out[1].x - out[0].x).abs() > EPSILON {
        out.swap(1, 3);
    }
    out
}

/// Min/max corner of an arbitrary point set.
pub fn bounds(points: &[Coord]) -> (Coord, Coord) {
    let mut min = Coord::new(f64::INFINITY, f64::INFINITY);
    let mut max = Coord::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Enclosed area in km². Both axes use the same meters-per-degree
/// factor, so translating the box never changes the result.
pub fn area_km2(corners: &BoxCorners) -> f64 {
    let (min, max) = bounds(corners);
    let width_m = (max.x - min.x) * METERS_PER_DEGREE;
    let height_m = (max.y - min.y) * METERS_PER_DEGREE;
    (width_m * height_m).abs() / 1.0e6
}

/// Degree offsets covering `width_m` x `height_m` meters.
pub fn meters_to_degrees(width_m: f64, height_m: f64) -> (f64, f64) {
    (width_m / METERS_PER_DEGREE, height_m / METERS_PER_DEGREE)
}

/// Corners plus a repeated first point, the 5-point closed ring the
/// layer contract uses.
pub fn close_ring(corners: &BoxCorners) -> Vec<Coord> {
    let mut ring = corners.to_vec();
    ring.push(corners[0]);
    ring
}

/// Status-bar label for an area readout.
pub fn format_area(km2: f64) -> String {
    if km2 >= 100.0 {
        format!("{km2:.0} km²")
    } else if km2 >= 1.0 {
        format!("{km2:.1} km²")
    } else {
        format!("{km2:.3} km²")
    }
}
