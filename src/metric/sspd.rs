use geo::{Distance, Euclidean, LineString, Point};

/// Projection parameters below this are treated as falling on the first endpoint.
const PROJECTION_EPSILON: f64 = 1e-5;

/// Distance from `point` to the segment `start -> end`.
///
/// The perpendicular distance is used when the projection of `point` falls
/// within the segment, the nearer endpoint distance otherwise. Zero-length
/// segments use the endpoint distance directly.
pub fn point_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let segment = end - start;
    let squared_length = segment.x() * segment.x() + segment.y() * segment.y();

    if squared_length == 0.0 {
        return Euclidean.distance(point, start);
    }

    let offset = point - start;
    let u = (offset.x() * segment.x() + offset.y() * segment.y()) / squared_length;

    if !(PROJECTION_EPSILON..=1.0).contains(&u) {
        return Euclidean
            .distance(point, start)
            .min(Euclidean.distance(point, end));
    }

    let cross = offset.x() * segment.y() - offset.y() * segment.x();
    cross.abs() / squared_length.sqrt()
}

/// Minimum distance from `point` to any segment of `trajectory`.
///
/// A single-point trajectory is a degenerate segment onto itself, an
/// empty one is infinitely far away.
pub fn point_to_trajectory(point: Point, trajectory: &LineString) -> f64 {
    match trajectory.0.as_slice() {
        [] => f64::INFINITY,
        [only] => Euclidean.distance(point, Point(*only)),
        _ => trajectory
            .lines()
            .map(|line| point_to_segment(point, line.start_point(), line.end_point()))
            .fold(f64::INFINITY, f64::min),
    }
}

/// The mean distance from each point of `from` to the trajectory `to`.
pub fn directed_mean_distance(from: &LineString, to: &LineString) -> f64 {
    if from.0.is_empty() {
        return f64::INFINITY;
    }

    let total = from
        .points()
        .map(|point| point_to_trajectory(point, to))
        .sum::<f64>();

    total / from.0.len() as f64
}

/// Symmetric Segment-Path Distance between two trajectories.
///
/// The average of both [directed mean distances](directed_mean_distance).
/// Symmetric by construction, zero for identical trajectories and infinite
/// when either trajectory is empty.
///
/// ### Example
/// ```rust
/// use geo::wkt;
/// use waymatch::metric::sspd;
///
/// let path = wkt! { LINESTRING(0.0 0.0,10.0 0.0) };
/// let trajectory = wkt! { LINESTRING(0.0 1.0,5.0 1.0,10.0 1.0) };
///
/// assert!((sspd(&trajectory, &path) - 1.0).abs() < 1e-9);
/// ```
pub fn sspd(a: &LineString, b: &LineString) -> f64 {
    (directed_mean_distance(a, b) + directed_mean_distance(b, a)) / 2.0
}
