//! Unsafe-Region Geometry
//!
//! Approximates each selected obstacle's safety region as a regular polygon
//! around its current position and, for encounters with a positive finite
//! TCPA, around its predicted position at the moment of closest approach.
//! The unsafe region is the convex hull of the union of all those vertices.
//!
//! The hull is computed with the Andrew monotone chain algorithm. Output
//! vertices are counter-clockwise starting from the lexicographically
//! smallest point; callers must not rely on winding or starting point, only
//! on the vertex set.

use log::debug;
use nalgebra::Point2;

use crate::error::UnsafeSetError;
use crate::objects::ObstacleWithMetrics;
use crate::predictor::predict_position;

/// Number of vertices used to approximate one safety circle.
pub const CIRCLE_VERTEX_COUNT: usize = 10;

/// Vertices of a regular polygon approximating a circle in the XY plane.
///
/// Angles are spaced `2*pi*k / count`, first vertex on the +x axis.
pub fn circle_vertices(center: &Point2<f64>, radius: f64, count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / count as f64;
            Point2::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

/// Convex hull of a planar point set (Andrew monotone chain).
///
/// # Errors
///
/// [`UnsafeSetError::DegenerateGeometry`] when fewer than three distinct
/// points remain after deduplication, or when all points are collinear - no
/// two-dimensional hull exists in either case.
pub fn convex_hull(points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>, UnsafeSetError> {
    let mut sorted: Vec<Point2<f64>> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return Err(UnsafeSetError::DegenerateGeometry(format!(
            "{} distinct point(s) cannot span a planar hull",
            sorted.len()
        )));
    }

    fn cross(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    fn chain<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Vec<Point2<f64>> {
        let mut half: Vec<Point2<f64>> = Vec::new();
        for point in points {
            while half.len() >= 2
                && cross(&half[half.len() - 2], &half[half.len() - 1], point) <= 0.0
            {
                half.pop();
            }
            half.push(*point);
        }
        // The chain ends on the other extreme point, which opens the
        // opposite chain; drop it to avoid the duplicate.
        half.pop();
        half
    }

    let mut hull = chain(sorted.iter());
    hull.extend(chain(sorted.iter().rev()));

    if hull.len() < 3 {
        return Err(UnsafeSetError::DegenerateGeometry(
            "all points are collinear".to_string(),
        ));
    }
    Ok(hull)
}

/// Build the unsafe region for the selected obstacles.
///
/// Every obstacle contributes its current safety circle; obstacles with a
/// positive finite TCPA additionally contribute the safety circle at their
/// predicted closest-approach position. Returns the convex hull of all
/// contributed vertices, or an empty polygon when there is nothing to hull
/// or the vertex set degenerates (e.g. a single zero-radius circle).
pub fn synthesize_unsafe_region(obstacles: &[ObstacleWithMetrics]) -> Vec<Point2<f64>> {
    let mut vertices: Vec<Point2<f64>> = Vec::new();

    for entry in obstacles {
        let obstacle = &entry.obstacle;
        let center = Point2::new(obstacle.position.x, obstacle.position.y);
        vertices.extend(circle_vertices(
            &center,
            obstacle.safety_radius,
            CIRCLE_VERTEX_COUNT,
        ));

        if let Some(t) = entry.tcpa.positive() {
            match predict_position(
                &obstacle.position,
                &obstacle.orientation,
                obstacle.velocity,
                obstacle.yaw_rate,
                t,
            ) {
                Ok(predicted) => {
                    vertices.extend(circle_vertices(
                        &Point2::new(predicted.x, predicted.y),
                        obstacle.safety_radius,
                        CIRCLE_VERTEX_COUNT,
                    ));
                }
                // Unreachable for a positive finite TCPA; keep the region
                // conservative rather than failing the pipeline.
                Err(err) => debug!(
                    "skipping predicted region for obstacle '{}': {err}",
                    obstacle.tag
                ),
            }
        }
    }

    if vertices.is_empty() {
        return Vec::new();
    }

    match convex_hull(&vertices) {
        Ok(hull) => hull,
        Err(err) => {
            debug!("unsafe region degenerates to empty: {err}");
            Vec::new()
        }
    }
}
