//! Velocity ramp calculation.
//!
//! Provides asymmetric trapezoidal (or triangular) velocity ramps with
//! independent acceleration and deceleration rates.

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward increasing location (positive millimetres).
    Forward,
    /// Toward decreasing location (negative millimetres).
    Backward,
}

impl Direction {
    /// Get direction from a signed displacement.
    #[inline]
    pub fn from_delta(delta_mm: f64) -> Self {
        if delta_mm >= 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Get the sign multiplier as an integer.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Get the sign multiplier as a float.
    #[inline]
    pub fn sign_f64(self) -> f64 {
        self.sign() as f64
    }
}

/// Computed velocity ramp for a move (asymmetric trapezoidal).
///
/// Describes three phases over the move distance `D`:
/// accelerate over `[0, accel_distance]`, cruise over
/// `[accel_distance, decel_start]`, decelerate over `[decel_start, D]`.
/// For a short move that never reaches the cruise velocity,
/// `accel_distance == decel_start` and `cruise_velocity` is the reduced
/// peak actually attained.
///
/// Sign convention: `acceleration` is positive away from rest and
/// `deceleration` is the signed deceleration rate, opposite in sign to
/// `acceleration`. For a negative move distance the whole description is
/// mirrored (distances and velocities come out negative).
#[derive(Debug, Clone, PartialEq)]
pub struct RampProfile {
    /// Distance over which the move accelerates.
    pub accel_distance: f64,

    /// Distance into the move at which deceleration begins.
    pub decel_start: f64,

    /// Velocity held during the cruise phase (the attained peak for a
    /// triangular ramp).
    pub cruise_velocity: f64,

    /// Acceleration rate used for the ramp-up phase.
    pub acceleration: f64,

    /// Signed deceleration rate used for the ramp-down phase.
    pub deceleration: f64,
}

impl RampProfile {
    /// Compute a velocity ramp for a signed move distance.
    ///
    /// # Arguments
    ///
    /// * `max_velocity` - Peak velocity to ramp toward (mm/sec)
    /// * `acceleration` - Acceleration rate (mm/sec², positive)
    /// * `deceleration` - Deceleration rate (mm/sec², opposite sign)
    /// * `distance` - Signed move distance (mm)
    ///
    /// Returns the zero sentinel when either rate is zero; callers
    /// attempting ramped motion must check [`RampProfile::is_zero`].
    pub fn compute(
        max_velocity: f64,
        acceleration: f64,
        deceleration: f64,
        distance: f64,
    ) -> Self {
        if acceleration == 0.0 || deceleration == 0.0 {
            return Self::zero();
        }

        // Express the computation for a nominally positive direction: a
        // negative move swaps the roles of the two rates and mirrors the
        // peak velocity.
        let (v_max, accel, decel) = if distance < 0.0 {
            (-max_velocity, deceleration, acceleration)
        } else {
            (max_velocity, acceleration, deceleration)
        };

        // Distance a full trapezoid (reach and hold v_max) would need.
        let d_lim = v_max * v_max * (1.0 / (2.0 * accel) - 1.0 / (2.0 * decel));

        if distance.abs() < d_lim.abs() {
            // Short move: v_max is unreachable, recompute the attained peak.
            let peak_magnitude =
                (distance * 2.0 * accel * decel / (decel - accel)).abs().sqrt();
            let peak = if distance < 0.0 {
                -peak_magnitude
            } else {
                peak_magnitude
            };
            let accel_distance = peak * peak / (2.0 * accel);

            Self {
                accel_distance,
                decel_start: accel_distance,
                cruise_velocity: peak,
                acceleration: accel,
                deceleration: decel,
            }
        } else {
            Self {
                accel_distance: v_max * v_max / (2.0 * accel),
                decel_start: distance + v_max * v_max / (2.0 * decel),
                cruise_velocity: v_max,
                acceleration: accel,
                deceleration: decel,
            }
        }
    }

    /// Create the degenerate "no ramp" sentinel.
    pub fn zero() -> Self {
        Self {
            accel_distance: 0.0,
            decel_start: 0.0,
            cruise_velocity: 0.0,
            acceleration: 0.0,
            deceleration: 0.0,
        }
    }

    /// Check if this is the degenerate sentinel.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.acceleration == 0.0 && self.deceleration == 0.0
    }

    /// Instantaneous speed at distance `s` into a positive-direction move.
    ///
    /// Evaluates the kinematic equation of whichever phase `s` falls in.
    /// Callers stepping a mirrored (negative) move should compute the
    /// profile on the magnitude and apply direction separately.
    pub fn velocity_at(&self, s: f64) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        let v = self.cruise_velocity;
        if s < self.accel_distance {
            (2.0 * self.acceleration * s).abs().sqrt()
        } else if s < self.decel_start {
            v.abs()
        } else {
            let remaining = v * v + 2.0 * self.deceleration * (s - self.decel_start);
            remaining.max(0.0).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_line_profile() {
        let profile = RampProfile::compute(10.0, 2.0, -4.0, 100.0);

        // d1 = 10^2 / (2*2) = 25
        assert!((profile.accel_distance - 25.0).abs() < 1e-9);
        // d2 = 100 + 10^2 / (2*-4) = 87.5
        assert!((profile.decel_start - 87.5).abs() < 1e-9);
        assert!((profile.cruise_velocity - 10.0).abs() < 1e-9);
        assert!(profile.accel_distance < profile.decel_start);
        assert!(profile.decel_start < 100.0);
    }

    #[test]
    fn test_short_line_profile() {
        let profile = RampProfile::compute(10.0, 2.0, -4.0, 5.0);

        // Too short to reach 10 mm/s
        assert!(profile.cruise_velocity < 10.0);
        assert!(profile.cruise_velocity > 0.0);
        // No cruise phase
        assert!((profile.accel_distance - profile.decel_start).abs() < 1e-9);
        // peak = sqrt(|5 * 2 * 2 * -4 / (-4 - 2)|) = sqrt(80/6)
        let expected = (80.0f64 / 6.0).sqrt();
        assert!((profile.cruise_velocity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_negative_distance_mirrors() {
        let profile = RampProfile::compute(10.0, 2.0, -4.0, -100.0);

        // Rates swap roles and the peak mirrors
        assert!((profile.cruise_velocity + 10.0).abs() < 1e-9);
        assert!(profile.accel_distance < 0.0);
        assert!(profile.decel_start < profile.accel_distance);
        // d2 = -100 + 100/(2*2) = -75
        assert!((profile.decel_start + 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_negative_distance() {
        let profile = RampProfile::compute(10.0, 2.0, -4.0, -5.0);

        let expected = (80.0f64 / 6.0).sqrt();
        assert!((profile.cruise_velocity + expected).abs() < 1e-9);
        assert!((profile.accel_distance - profile.decel_start).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rates_are_degenerate() {
        assert!(RampProfile::compute(10.0, 0.0, -4.0, 100.0).is_zero());
        assert!(RampProfile::compute(10.0, 2.0, 0.0, 100.0).is_zero());
        assert!(!RampProfile::compute(10.0, 2.0, -4.0, 100.0).is_zero());
    }

    #[test]
    fn test_velocity_at_phases() {
        let profile = RampProfile::compute(10.0, 2.0, -4.0, 100.0);

        // From rest
        assert!(profile.velocity_at(0.0).abs() < 1e-9);
        // Mid-acceleration: v = sqrt(2*2*12.5) = sqrt(50)
        assert!((profile.velocity_at(12.5) - 50.0f64.sqrt()).abs() < 1e-9);
        // Cruise
        assert!((profile.velocity_at(50.0) - 10.0).abs() < 1e-9);
        // End of decel: v = sqrt(100 + 2*-4*12.5) = 0
        assert!(profile.velocity_at(100.0).abs() < 1e-9);
        // Never negative under rounding past the end
        assert!(profile.velocity_at(101.0) >= 0.0);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_delta(3.0), Direction::Forward);
        assert_eq!(Direction::from_delta(-0.1), Direction::Backward);
        assert_eq!(Direction::Forward.opposite(), Direction::Backward);
        assert_eq!(Direction::Backward.sign(), -1);
    }
}
