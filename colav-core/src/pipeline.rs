//! Unsafe-Set Pipeline
//!
//! Sequences the full computation for one snapshot: annotate every obstacle
//! with its closest-approach metrics, select the obstacles of interest,
//! union the selections, and synthesize the convex unsafe region. Stateless
//! and idempotent; nothing is retained between calls.

use log::debug;
use nalgebra::Point2;

use crate::cpa::annotate_obstacles;
use crate::error::UnsafeSetError;
use crate::hull::synthesize_unsafe_region;
use crate::interest::{calc_i1, calc_i2, calc_i3, unionise, DEFAULT_TIME_OF_INTEREST};
use crate::objects::{Agent, DynamicObstacle};

/// Compute the unsafe set for one snapshot with the default 15 s
/// time-of-interest horizon.
///
/// Returns the vertices of a convex polygon in the agent's planning frame,
/// or an empty vector when nothing is unsafe. Vertex order is an artifact of
/// the hull algorithm and not part of the contract.
///
/// # Errors
///
/// [`UnsafeSetError::InvalidArgument`] if `dsf` or any safety radius is
/// negative or non-finite.
pub fn create_unsafe_set(
    agent: &Agent,
    obstacles: &[DynamicObstacle],
    dsf: f64,
) -> Result<Vec<Point2<f64>>, UnsafeSetError> {
    create_unsafe_set_with_horizon(agent, obstacles, dsf, DEFAULT_TIME_OF_INTEREST)
}

/// [`create_unsafe_set`] with a caller-chosen time-of-interest horizon for
/// the closest-approach selection rule.
pub fn create_unsafe_set_with_horizon(
    agent: &Agent,
    obstacles: &[DynamicObstacle],
    dsf: f64,
    time_of_interest: f64,
) -> Result<Vec<Point2<f64>>, UnsafeSetError> {
    validate_arguments(agent, obstacles, dsf)?;

    let annotated = annotate_obstacles(agent, obstacles);

    let i1 = calc_i1(agent, &annotated, dsf);
    let i2 = calc_i2(&i1, &annotated, dsf)?;
    let i3 = calc_i3(&annotated, dsf, time_of_interest);
    debug!(
        "indices of interest: I1 = {}, I2 = {}, I3 = {} (of {} obstacles)",
        i1.len(),
        i2.len(),
        i3.len(),
        obstacles.len()
    );

    let union = unionise(&i1, &i2, &i3);
    if union.is_empty() {
        debug!("no obstacles of interest; unsafe set is empty");
        return Ok(Vec::new());
    }

    Ok(synthesize_unsafe_region(&union))
}

fn validate_arguments(
    agent: &Agent,
    obstacles: &[DynamicObstacle],
    dsf: f64,
) -> Result<(), UnsafeSetError> {
    if !dsf.is_finite() || dsf < 0.0 {
        return Err(UnsafeSetError::InvalidArgument(format!(
            "distance safety factor must be finite and non-negative, got {dsf}"
        )));
    }
    if !agent.safety_radius.is_finite() || agent.safety_radius < 0.0 {
        return Err(UnsafeSetError::InvalidArgument(format!(
            "agent safety radius must be finite and non-negative, got {}",
            agent.safety_radius
        )));
    }
    for obstacle in obstacles {
        if !obstacle.safety_radius.is_finite() || obstacle.safety_radius < 0.0 {
            return Err(UnsafeSetError::InvalidArgument(format!(
                "safety radius of obstacle '{}' must be finite and non-negative, got {}",
                obstacle.tag, obstacle.safety_radius
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Quaternion};

    fn agent() -> Agent {
        Agent::new(
            Point3::new(10.0, 10.0, 10.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            15.0,
            0.0,
            5.0,
        )
    }

    fn obstacle(tag: &str, x: f64, y: f64, velocity: f64, safety_radius: f64) -> DynamicObstacle {
        DynamicObstacle::new(
            tag,
            Point3::new(x, y, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            velocity,
            0.0,
            safety_radius,
        )
    }

    #[test]
    fn test_no_obstacles_yields_empty_set() {
        let region = create_unsafe_set(&agent(), &[], 10.0).unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn test_distant_obstacle_yields_empty_set() {
        let region = create_unsafe_set(
            &agent(),
            &[obstacle("far-off", 5000.0, 5000.0, 0.0, 1.0)],
            10.0,
        )
        .unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn test_negative_dsf_rejected() {
        let result = create_unsafe_set(&agent(), &[], -1.0);
        assert!(matches!(result, Err(UnsafeSetError::InvalidArgument(_))));
    }

    #[test]
    fn test_negative_safety_radius_rejected() {
        let mut bad_agent = agent();
        bad_agent.safety_radius = -5.0;
        let result = create_unsafe_set(&bad_agent, &[], 10.0);
        assert!(matches!(result, Err(UnsafeSetError::InvalidArgument(_))));

        let result = create_unsafe_set(
            &agent(),
            &[obstacle("bad", 0.0, 0.0, 0.0, -1.0)],
            10.0,
        );
        assert!(matches!(result, Err(UnsafeSetError::InvalidArgument(_))));
    }

    #[test]
    fn test_single_near_obstacle_produces_its_circle_hull() {
        // Gap to the agent: sqrt(20^2 + 10^2) - 15 ~ 7.36 <= 10, so I1
        // selects it. Its closest approach lies in the past (it outruns the
        // agent), so only the current-position circle contributes.
        let region = create_unsafe_set(
            &agent(),
            &[obstacle("crossing", 30.0, 20.0, 20.0, 10.0)],
            10.0,
        )
        .unwrap();

        assert_eq!(region.len(), crate::hull::CIRCLE_VERTEX_COUNT);
        for vertex in &region {
            let d = ((vertex.x - 30.0).powi(2) + (vertex.y - 20.0).powi(2)).sqrt();
            assert!(
                (d - 10.0).abs() < 1.0e-9,
                "hull vertex should lie on the obstacle safety circle"
            );
        }
    }

    #[test]
    fn test_idempotent_for_same_snapshot() {
        let obstacles = vec![
            obstacle("one", 30.0, 20.0, 20.0, 10.0),
            obstacle("two", 5.0, 7.0, 10.0, 7.0),
        ];
        let first = create_unsafe_set(&agent(), &obstacles, 10.0).unwrap();
        let second = create_unsafe_set(&agent(), &obstacles, 10.0).unwrap();
        assert_eq!(first, second);
    }
}
