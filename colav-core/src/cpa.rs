//! Closest Point of Approach
//!
//! DCPA/TCPA computation between the agent vessel and each dynamic obstacle,
//! using the planar relative-motion model: both entities move with constant
//! velocity along their current heading, and the closest approach is found
//! analytically from the relative position and relative velocity.
//!
//! Degenerate configurations are values, not errors:
//!
//! - coincident and co-moving: no meaningful separation, DCPA is
//!   [`Undefined`](CpaMetric::Undefined) and TCPA
//!   [`Unbounded`](CpaMetric::Unbounded);
//! - co-moving at a distance: the separation never changes, so DCPA is the
//!   current separation;
//! - closest approach in the past: no actionable future risk, both metrics
//!   [`Undefined`](CpaMetric::Undefined).

use nalgebra::Vector2;

use crate::objects::{Agent, CpaMetric, DynamicObstacle, ObstacleWithMetrics};

/// Squared relative speed below which two entities count as co-moving.
const RELATIVE_MOTION_EPSILON: f64 = 1.0e-9;

/// Squared separation below which two entities count as coincident.
const COINCIDENT_EPSILON: f64 = 1.0e-9;

/// DCPA/TCPA pair for one agent/obstacle encounter.
///
/// The two metrics are always produced together; a consumer must never pair a
/// DCPA with a TCPA from a different computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpaResult {
    /// Distance at the closest point of approach, meters.
    pub dcpa: CpaMetric,
    /// Time to the closest point of approach, seconds.
    pub tcpa: CpaMetric,
}

/// Compute DCPA and TCPA between the agent and one obstacle.
///
/// Pure and deterministic; never fails. All degenerate geometry maps to
/// [`CpaMetric::Undefined`] / [`CpaMetric::Unbounded`].
pub fn closest_approach(agent: &Agent, obstacle: &DynamicObstacle) -> CpaResult {
    let v_agent = planar_velocity(agent.heading(), agent.velocity);
    let v_obstacle = planar_velocity(obstacle.heading(), obstacle.velocity);

    let p_rel = Vector2::new(
        agent.position.x - obstacle.position.x,
        agent.position.y - obstacle.position.y,
    );
    let v_rel = v_agent - v_obstacle;

    if v_rel.norm_squared() < RELATIVE_MOTION_EPSILON {
        // Co-moving: the separation never changes.
        if p_rel.norm_squared() < COINCIDENT_EPSILON {
            return CpaResult {
                dcpa: CpaMetric::Undefined,
                tcpa: CpaMetric::Unbounded,
            };
        }
        let separation = p_rel.norm();
        let tcpa = if agent.velocity.abs() > 0.0 {
            CpaMetric::Finite(separation / agent.velocity.abs())
        } else {
            CpaMetric::Unbounded
        };
        return CpaResult {
            dcpa: CpaMetric::Finite(separation),
            tcpa,
        };
    }

    let t = -p_rel.dot(&v_rel) / v_rel.norm_squared();
    if t > 0.0 {
        CpaResult {
            dcpa: CpaMetric::Finite((p_rel + v_rel * t).norm()),
            tcpa: CpaMetric::Finite(t),
        }
    } else {
        // Closest approach already happened; no future risk to report.
        CpaResult {
            dcpa: CpaMetric::Undefined,
            tcpa: CpaMetric::Undefined,
        }
    }
}

/// Annotate every obstacle with its DCPA/TCPA relative to the agent,
/// preserving input order.
pub fn annotate_obstacles(
    agent: &Agent,
    obstacles: &[DynamicObstacle],
) -> Vec<ObstacleWithMetrics> {
    obstacles
        .iter()
        .map(|obstacle| {
            let cpa = closest_approach(agent, obstacle);
            ObstacleWithMetrics {
                obstacle: obstacle.clone(),
                dcpa: cpa.dcpa,
                tcpa: cpa.tcpa,
            }
        })
        .collect()
}

fn planar_velocity(heading: f64, speed: f64) -> Vector2<f64> {
    Vector2::new(speed * heading.cos(), speed * heading.sin())
}
