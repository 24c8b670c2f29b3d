//! Obstacle Selection: Indices of Interest
//!
//! Three independent selection rules over the annotated obstacle set, plus a
//! deduplicating union. All distance thresholds are non-strict: an obstacle
//! exactly at the threshold is selected.
//!
//! - **I1** - agent proximity: the surface-to-surface gap between the agent
//!   and the obstacle is within the distance safety factor.
//! - **I2** - cluster proximity: an I1 member that has at least one *other*
//!   obstacle within the distance safety factor of itself. Every I1 member
//!   handed to this rule must come from the full annotated list.
//! - **I3** - closest-approach risk: DCPA within the distance safety factor
//!   and a finite TCPA inside the time-of-interest horizon. Encounters whose
//!   closest approach lies in the past carry undefined metrics and never
//!   qualify.
//!
//! Distances are planar (x/y only); the safety radii of both parties are
//! subtracted so the gap is surface to surface, not center to center.

use log::trace;
use nalgebra::{Point3, Vector2};

use crate::error::UnsafeSetError;
use crate::objects::{Agent, ObstacleWithMetrics};

/// Default time-of-interest horizon for the I3 rule, seconds.
pub const DEFAULT_TIME_OF_INTEREST: f64 = 15.0;

fn planar_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    Vector2::new(a.x - b.x, a.y - b.y).norm()
}

/// Surface-to-surface gap between the agent and an obstacle, meters.
///
/// Negative when the safety regions already overlap.
pub fn agent_obstacle_distance(agent: &Agent, obstacle: &ObstacleWithMetrics) -> f64 {
    planar_distance(&agent.position, &obstacle.obstacle.position)
        - (agent.safety_radius + obstacle.obstacle.safety_radius)
}

/// Surface-to-surface gap between two obstacles, meters.
pub fn obstacle_obstacle_distance(a: &ObstacleWithMetrics, b: &ObstacleWithMetrics) -> f64 {
    planar_distance(&a.obstacle.position, &b.obstacle.position)
        - (a.obstacle.safety_radius + b.obstacle.safety_radius)
}

/// I1: obstacles whose gap to the agent is within `dsf`.
pub fn calc_i1(
    agent: &Agent,
    obstacles: &[ObstacleWithMetrics],
    dsf: f64,
) -> Vec<ObstacleWithMetrics> {
    obstacles
        .iter()
        .filter(|obstacle| agent_obstacle_distance(agent, obstacle) <= dsf)
        .cloned()
        .collect()
}

/// I2: I1 members with at least one other obstacle within `dsf` of
/// themselves.
///
/// Each member is selected at most once; the neighbor scan stops at the first
/// qualifying obstacle. The candidate obstacle itself is excluded from its
/// own neighbor scan by value equality.
///
/// # Errors
///
/// [`UnsafeSetError::ContractViolation`] if an `i1` member is not present in
/// `obstacles`.
pub fn calc_i2(
    i1: &[ObstacleWithMetrics],
    obstacles: &[ObstacleWithMetrics],
    dsf: f64,
) -> Result<Vec<ObstacleWithMetrics>, UnsafeSetError> {
    let mut i2 = Vec::new();
    for operand in i1 {
        if !obstacles.contains(operand) {
            return Err(UnsafeSetError::ContractViolation(format!(
                "obstacle '{}' is not a member of the annotated obstacle list",
                operand.obstacle.tag
            )));
        }
        let has_neighbor = obstacles
            .iter()
            .filter(|candidate| *candidate != operand)
            .any(|candidate| obstacle_obstacle_distance(operand, candidate) <= dsf);
        if has_neighbor {
            i2.push(operand.clone());
        }
    }
    Ok(i2)
}

/// I3: obstacles whose DCPA is within `dsf` and whose TCPA is finite and
/// within `time_of_interest`.
pub fn calc_i3(
    obstacles: &[ObstacleWithMetrics],
    dsf: f64,
    time_of_interest: f64,
) -> Vec<ObstacleWithMetrics> {
    obstacles
        .iter()
        .filter(|obstacle| obstacle.dcpa.at_most(dsf) && obstacle.tcpa.at_most(time_of_interest))
        .cloned()
        .collect()
}

/// Merge the three index lists, deduplicating by value equality of the whole
/// annotated obstacle. Insertion order follows first occurrence and carries
/// no meaning.
///
/// Deduplication is deliberately not keyed on the tag: tags are opaque to
/// this library and distinct obstacles may share one.
pub fn unionise(
    i1: &[ObstacleWithMetrics],
    i2: &[ObstacleWithMetrics],
    i3: &[ObstacleWithMetrics],
) -> Vec<ObstacleWithMetrics> {
    let mut union: Vec<ObstacleWithMetrics> = Vec::with_capacity(i1.len() + i2.len() + i3.len());
    for candidate in i1.iter().chain(i2).chain(i3) {
        if !union.contains(candidate) {
            union.push(candidate.clone());
        }
    }
    trace!(
        "unionised indices of interest: {} + {} + {} -> {}",
        i1.len(),
        i2.len(),
        i3.len(),
        union.len()
    );
    union
}
