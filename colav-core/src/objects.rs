//! Kinematic Entity Types
//!
//! Value types describing the agent vessel and the dynamic obstacles around
//! it. All types are immutable snapshots with structural equality: entities
//! are built per pipeline invocation from caller-supplied state, used for one
//! run, and discarded.
//!
//! Orientations are stored as [`UnitQuaternion`]; the constructors accept a
//! raw [`Quaternion`] and normalize it, so a non-unit orientation can never
//! reach the heading extraction.

use nalgebra::{Point3, Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Minimum quaternion norm accepted for normalization. Below this the
/// orientation is taken as the identity (heading along +x).
const MIN_QUATERNION_NORM: f64 = 1.0e-9;

/// Normalize a raw quaternion for use as an orientation.
///
/// Degenerate (near-zero) quaternions map to the identity rather than
/// producing non-finite components.
pub fn normalize_orientation(raw: Quaternion<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::try_new(raw, MIN_QUATERNION_NORM).unwrap_or_else(UnitQuaternion::identity)
}

/// Extract the heading (yaw about +z) of an orientation, in (-pi, pi].
pub fn heading_of(orientation: &UnitQuaternion<f64>) -> f64 {
    orientation.euler_angles().2
}

/// The vessel the unsafe set is computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Cartesian position in meters. Only x/y participate in the planar
    /// computation; z is carried through untouched.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub orientation: UnitQuaternion<f64>,
    /// Scalar speed along the current heading, m/s.
    pub velocity: f64,
    /// Heading change rate, rad/s.
    pub yaw_rate: f64,
    /// Safety buffer radius around the vessel, meters (>= 0).
    pub safety_radius: f64,
}

impl Agent {
    /// Create an agent from a raw (possibly non-unit) orientation quaternion.
    pub fn new(
        position: Point3<f64>,
        orientation: Quaternion<f64>,
        velocity: f64,
        yaw_rate: f64,
        safety_radius: f64,
    ) -> Self {
        Agent {
            position,
            orientation: normalize_orientation(orientation),
            velocity,
            yaw_rate,
            safety_radius,
        }
    }

    /// Heading (yaw) in radians, (-pi, pi].
    pub fn heading(&self) -> f64 {
        heading_of(&self.orientation)
    }
}

/// A moving obstacle near the agent.
///
/// Kinematically identical to [`Agent`], plus an opaque caller-supplied tag.
/// Tags are carried through for the caller's benefit and are not assumed
/// unique; identity is the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicObstacle {
    /// Opaque identifier supplied by the caller.
    pub tag: String,
    /// Cartesian position in meters.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub orientation: UnitQuaternion<f64>,
    /// Scalar speed along the current heading, m/s.
    pub velocity: f64,
    /// Heading change rate, rad/s.
    pub yaw_rate: f64,
    /// Safety buffer radius, meters (>= 0).
    pub safety_radius: f64,
}

impl DynamicObstacle {
    /// Create an obstacle from a raw (possibly non-unit) orientation
    /// quaternion.
    pub fn new(
        tag: impl Into<String>,
        position: Point3<f64>,
        orientation: Quaternion<f64>,
        velocity: f64,
        yaw_rate: f64,
        safety_radius: f64,
    ) -> Self {
        DynamicObstacle {
            tag: tag.into(),
            position,
            orientation: normalize_orientation(orientation),
            velocity,
            yaw_rate,
            safety_radius,
        }
    }

    /// Heading (yaw) in radians, (-pi, pi].
    pub fn heading(&self) -> f64 {
        heading_of(&self.orientation)
    }
}

/// A closest-approach metric (DCPA or TCPA).
///
/// Replaces raw NaN/infinity sentinels with an explicit tagged value so that
/// threshold comparisons are total and degenerate geometry cannot leak into
/// numeric comparisons unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpaMetric {
    /// A meaningful finite value (meters for DCPA, seconds for TCPA).
    Finite(f64),
    /// No bound exists (e.g. co-moving entities never change separation).
    Unbounded,
    /// No meaningful value exists (coincident entities, or the closest
    /// approach already lies in the past).
    Undefined,
}

impl CpaMetric {
    /// True if the metric carries a finite value.
    pub fn is_finite(&self) -> bool {
        matches!(self, CpaMetric::Finite(_))
    }

    /// The finite value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            CpaMetric::Finite(v) => Some(*v),
            _ => None,
        }
    }

    /// Total threshold comparison: true only for a finite value `<= limit`.
    ///
    /// `Unbounded` and `Undefined` never satisfy a threshold, which is how
    /// degenerate geometry drops out of the selection rules.
    pub fn at_most(&self, limit: f64) -> bool {
        match self {
            CpaMetric::Finite(v) => *v <= limit,
            _ => false,
        }
    }

    /// The finite value if it is strictly positive.
    pub fn positive(&self) -> Option<f64> {
        match self {
            CpaMetric::Finite(v) if *v > 0.0 => Some(*v),
            _ => None,
        }
    }
}

/// A dynamic obstacle annotated with its closest-approach metrics relative
/// to the agent.
///
/// `dcpa` and `tcpa` are always produced together by
/// [`closest_approach`](crate::closest_approach). Equality is structural over
/// the obstacle and both metrics, which is what the union step deduplicates
/// on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleWithMetrics {
    /// The underlying obstacle snapshot.
    pub obstacle: DynamicObstacle,
    /// Distance at closest point of approach, meters.
    pub dcpa: CpaMetric,
    /// Time to closest point of approach, seconds.
    pub tcpa: CpaMetric,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_constructor_normalizes_orientation() {
        // Twice the identity quaternion must normalize to identity.
        let agent = Agent::new(
            Point3::new(0.0, 0.0, 0.0),
            Quaternion::new(2.0, 0.0, 0.0, 0.0),
            0.0,
            0.0,
            1.0,
        );
        assert!((agent.orientation.norm() - 1.0).abs() < 1.0e-12);
        assert!(agent.heading().abs() < 1.0e-12);
    }

    #[test]
    fn test_zero_quaternion_becomes_identity() {
        let obstacle = DynamicObstacle::new(
            "degenerate",
            Point3::new(1.0, 2.0, 3.0),
            Quaternion::new(0.0, 0.0, 0.0, 0.0),
            5.0,
            0.0,
            1.0,
        );
        assert!(obstacle.heading().abs() < 1.0e-12);
    }

    #[test]
    fn test_heading_extraction() {
        // Quaternion for a +90 degree rotation about z: w = cos(45), z = sin(45).
        let half = FRAC_PI_2 / 2.0;
        let agent = Agent::new(
            Point3::new(0.0, 0.0, 0.0),
            Quaternion::new(half.cos(), 0.0, 0.0, half.sin()),
            1.0,
            0.0,
            1.0,
        );
        assert!((agent.heading() - FRAC_PI_2).abs() < 1.0e-9);
    }

    #[test]
    fn test_metric_threshold_is_total() {
        assert!(CpaMetric::Finite(3.0).at_most(3.0));
        assert!(CpaMetric::Finite(2.9).at_most(3.0));
        assert!(!CpaMetric::Finite(3.1).at_most(3.0));
        assert!(!CpaMetric::Unbounded.at_most(f64::MAX));
        assert!(!CpaMetric::Undefined.at_most(f64::MAX));
    }

    #[test]
    fn test_metric_positive() {
        assert_eq!(CpaMetric::Finite(5.0).positive(), Some(5.0));
        assert_eq!(CpaMetric::Finite(0.0).positive(), None);
        assert_eq!(CpaMetric::Finite(-1.0).positive(), None);
        assert_eq!(CpaMetric::Unbounded.positive(), None);
        assert_eq!(CpaMetric::Undefined.positive(), None);
    }

    #[test]
    fn test_structural_equality() {
        let make = || {
            ObstacleWithMetrics {
                obstacle: DynamicObstacle::new(
                    "same-tag",
                    Point3::new(1.0, 1.0, 0.0),
                    Quaternion::new(1.0, 0.0, 0.0, 0.0),
                    2.0,
                    0.0,
                    3.0,
                ),
                dcpa: CpaMetric::Finite(1.0),
                tcpa: CpaMetric::Finite(2.0),
            }
        };
        assert_eq!(make(), make());

        // Same tag, different kinematics: distinct values.
        let mut other = make();
        other.obstacle.velocity = 9.0;
        assert_ne!(make(), other);
    }
}
