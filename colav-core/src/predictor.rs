//! Kinematic Position Prediction
//!
//! Short-horizon extrapolation of an entity's position under a constant
//! speed, constant yaw-rate model. The heading advances by `yaw_rate * dt`
//! and the displacement is taken along the advanced heading; no acceleration,
//! no curvature beyond the constant yaw rate. Extrapolation is planar: the z
//! coordinate passes through unchanged.

use nalgebra::{Point3, UnitQuaternion};

use crate::error::UnsafeSetError;
use crate::objects::heading_of;

/// Predict an entity's position `dt` seconds ahead.
///
/// The orientation is a unit quaternion by construction (see
/// [`Agent::new`](crate::Agent::new)), so the extracted yaw is well defined.
///
/// # Errors
///
/// [`UnsafeSetError::InvalidArgument`] if `dt` is not a finite, strictly
/// positive number.
pub fn predict_position(
    position: &Point3<f64>,
    orientation: &UnitQuaternion<f64>,
    velocity: f64,
    yaw_rate: f64,
    dt: f64,
) -> Result<Point3<f64>, UnsafeSetError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(UnsafeSetError::InvalidArgument(format!(
            "prediction time step must be finite and positive, got {dt}"
        )));
    }

    let yaw = heading_of(orientation) + yaw_rate * dt;
    Ok(Point3::new(
        position.x + velocity * yaw.cos() * dt,
        position.y + velocity * yaw.sin() * dt,
        position.z,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Quaternion;
    use crate::objects::normalize_orientation;
    use std::f64::consts::FRAC_PI_4;

    fn identity() -> UnitQuaternion<f64> {
        normalize_orientation(Quaternion::new(1.0, 0.0, 0.0, 0.0))
    }

    #[test]
    fn test_straight_line_prediction() {
        let predicted =
            predict_position(&Point3::new(0.0, 0.0, 0.0), &identity(), 10.0, 0.0, 2.0).unwrap();
        assert!((predicted.x - 20.0).abs() < 1.0e-9);
        assert!(predicted.y.abs() < 1.0e-9);
    }

    #[test]
    fn test_turning_prediction() {
        // Yaw advances to +90 degrees over 2 s, so the full displacement is
        // along +y under this model.
        let predicted =
            predict_position(&Point3::new(0.0, 0.0, 0.0), &identity(), 10.0, FRAC_PI_4, 2.0)
                .unwrap();
        assert!(predicted.x.abs() < 1.0e-9);
        assert!((predicted.y - 20.0).abs() < 1.0e-9);
    }

    #[test]
    fn test_z_passes_through() {
        let predicted =
            predict_position(&Point3::new(1.0, 2.0, 7.5), &identity(), 5.0, 0.0, 1.0).unwrap();
        assert!((predicted.z - 7.5).abs() < 1.0e-12);
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let position = Point3::new(0.0, 0.0, 0.0);
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = predict_position(&position, &identity(), 10.0, 0.0, dt);
            assert!(
                matches!(result, Err(UnsafeSetError::InvalidArgument(_))),
                "dt = {dt} should be rejected"
            );
        }
    }
}
