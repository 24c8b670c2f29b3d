//! COLAV Unsafe-Set Computation
//!
//! This crate computes, for a moving agent vessel and a set of moving
//! obstacles, a single planar convex region (the "unsafe set") the vessel
//! should avoid over a short planning horizon. It is a building block for a
//! collision-avoidance planner: the planner asks "which area is unsafe right
//! now and in the near future?" and this library answers with a polygon.
//!
//! The crate is platform-independent with minimal dependencies: no I/O, no
//! async, no platform-specific code. Scenario loading, plotting and command
//! interfaces belong to the applications that embed it.
//!
//! # Architecture
//!
//! The pipeline is split into several modules, leaves first:
//!
//! - **objects**: value types for agent/obstacle state and derived metrics
//! - **cpa**: DCPA/TCPA closest-approach calculations
//! - **predictor**: constant-speed, constant-yaw-rate position extrapolation
//! - **interest**: the I1/I2/I3 selection rules and their deduplicating union
//! - **hull**: safety-circle approximation and convex-hull synthesis
//! - **pipeline**: the orchestrated `create_unsafe_set` entry point
//! - **error**: the crate error taxonomy
//!
//! # Usage
//!
//! ```rust,ignore
//! use colav_core::{create_unsafe_set, Agent, DynamicObstacle};
//! use nalgebra::{Point3, Quaternion};
//!
//! let vessel = Agent::new(
//!     Point3::new(10.0, 10.0, 0.0),
//!     Quaternion::new(1.0, 0.0, 0.0, 0.0),
//!     15.0, // m/s along heading
//!     0.0,  // rad/s
//!     5.0,  // safety radius, m
//! );
//!
//! let traffic = vec![DynamicObstacle::new(
//!     "southbound ferry",
//!     Point3::new(30.0, 20.0, 0.0),
//!     Quaternion::new(1.0, 0.0, 0.0, 0.0),
//!     20.0,
//!     0.0,
//!     10.0,
//! )];
//!
//! let region = create_unsafe_set(&vessel, &traffic, 10.0)?;
//! if region.is_empty() {
//!     // nothing to avoid
//! }
//! ```
//!
//! Degenerate relative motion (coincident entities, co-moving pairs, closest
//! approach in the past) never raises an error; it flows through the
//! pipeline as [`CpaMetric`] values and drops out of the selection rules.
//! Only contract violations - negative radii, non-positive prediction steps,
//! selection-rule preconditions - surface as [`UnsafeSetError`].

pub mod cpa;
pub mod error;
pub mod hull;
pub mod interest;
pub mod objects;
pub mod pipeline;
pub mod predictor;

pub use cpa::{annotate_obstacles, closest_approach, CpaResult};
pub use error::UnsafeSetError;
pub use hull::{
    circle_vertices, convex_hull, synthesize_unsafe_region, CIRCLE_VERTEX_COUNT,
};
pub use interest::{
    agent_obstacle_distance, calc_i1, calc_i2, calc_i3, obstacle_obstacle_distance, unionise,
    DEFAULT_TIME_OF_INTEREST,
};
pub use objects::{Agent, CpaMetric, DynamicObstacle, ObstacleWithMetrics};
pub use pipeline::{create_unsafe_set, create_unsafe_set_with_horizon};
pub use predictor::predict_position;
