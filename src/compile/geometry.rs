use kurbo::{ParamCurve, ParamCurveArclen, Shape};

use crate::foundation::core::{Affine, BezPath, Point};

const ARCLEN_ACCURACY: f64 = 1e-3;
/// Flattening tolerance for curves and stroke expansion, in pixels.
pub(crate) const PX_TOLERANCE: f64 = 0.1;

/// Polygon through `points`, optionally closed.
pub(crate) fn polyline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        if closed {
            path.close_path();
        }
    }
    path
}

/// A circle as cubic segments, starting at angle zero and running counterclockwise on
/// screen.
pub(crate) fn disc(center: Point, radius: f64) -> BezPath {
    // Pixel space has +y down; mirror so the outline starts at the rightmost point and
    // travels upward first, like in world space.
    let mut path = kurbo::Circle::new(Point::ZERO, radius).to_path(PX_TOLERANCE);
    path.apply_affine(Affine::translate(center.to_vec2()) * Affine::FLIP_Y);
    path
}

/// Total arc length of `path`.
pub(crate) fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
}

/// The leading `alpha` fraction of `path`, measured by arc length.
///
/// `alpha <= 0` yields an empty path and `alpha >= 1` the full path, closure included.
pub(crate) fn partial_path(path: &BezPath, alpha: f64) -> BezPath {
    if alpha >= 1.0 {
        return path.clone();
    }
    if alpha <= 0.0 {
        return BezPath::new();
    }
    let mut remaining = alpha * path_length(path);
    let mut segments = Vec::new();
    for seg in path.segments() {
        let len = seg.arclen(ARCLEN_ACCURACY);
        if len <= remaining {
            segments.push(seg);
            remaining -= len;
            continue;
        }
        if remaining > 0.0 {
            let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
            segments.push(seg.subsegment(0.0..t));
        }
        break;
    }
    BezPath::from_path_segments(segments.into_iter())
}

/// Expand a centerline into a fillable outline with round caps and joins.
pub(crate) fn stroke_outline(path: &BezPath, width: f64) -> BezPath {
    let style = kurbo::Stroke::new(width)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    kurbo::stroke(
        path.iter(),
        &style,
        &kurbo::StrokeOpts::default(),
        PX_TOLERANCE,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/compile/geometry.rs"]
mod tests;
