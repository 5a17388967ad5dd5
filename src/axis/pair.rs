//! Coordinated two-axis motion.

use std::time::{Duration, Instant};

use embedded_hal::digital::OutputPin;

use crate::config::AxisGeometry;
use crate::curve::{Curve, Point};
use crate::error::{MotionError, Result};
use crate::motion::{sleep_until, Direction, LineInterleaver, StepAxis};

use super::driver::Axis;
use super::switch::LimitSwitch;

/// Software travel boundaries for both axes.
///
/// Unbounded until [`AxisPair::home`] tightens them from the switch
/// locations it measured.
#[derive(Debug, Clone)]
pub struct SoftLimitBox {
    x_lower: f64,
    x_upper: f64,
    y_lower: f64,
    y_upper: f64,
}

impl SoftLimitBox {
    /// A box that admits every point.
    pub fn unbounded() -> Self {
        Self {
            x_lower: f64::NEG_INFINITY,
            x_upper: f64::INFINITY,
            y_lower: f64::NEG_INFINITY,
            y_upper: f64::INFINITY,
        }
    }

    /// Derive limits from each axis's home location and measured secondary
    /// boundary, pulled in by half a step so motion near a boundary does
    /// not immediately re-trigger the switch.
    fn from_homing(
        x_geometry: &AxisGeometry,
        x_secondary: f64,
        y_geometry: &AxisGeometry,
        y_secondary: f64,
    ) -> Self {
        let (x_lower, x_upper) = Self::axis_bounds(x_geometry, x_secondary);
        let (y_lower, y_upper) = Self::axis_bounds(y_geometry, y_secondary);
        Self {
            x_lower,
            x_upper,
            y_lower,
            y_upper,
        }
    }

    fn axis_bounds(geometry: &AxisGeometry, secondary: f64) -> (f64, f64) {
        let half_step = 0.5 * geometry.mm_per_step;
        if geometry.home_toward_max {
            (secondary + half_step, geometry.home_location_mm - half_step)
        } else {
            (geometry.home_location_mm + half_step, secondary - half_step)
        }
    }

    /// Clamp a point into the box. Returns the clamped point and whether
    /// any coordinate was moved.
    pub fn clamp(&self, point: Point) -> (Point, bool) {
        let clamped = Point::new(
            point.x.max(self.x_lower).min(self.x_upper),
            point.y.max(self.y_lower).min(self.y_upper),
        );
        let moved = clamped != point;
        (clamped, moved)
    }

    /// Lower X bound in millimetres.
    #[inline]
    pub fn x_lower(&self) -> f64 {
        self.x_lower
    }

    /// Upper X bound in millimetres.
    #[inline]
    pub fn x_upper(&self) -> f64 {
        self.x_upper
    }

    /// Lower Y bound in millimetres.
    #[inline]
    pub fn y_lower(&self) -> f64 {
        self.y_lower
    }

    /// Upper Y bound in millimetres.
    #[inline]
    pub fn y_upper(&self) -> f64 {
        self.y_upper
    }
}

/// Options for [`AxisPair::follow`].
#[derive(Debug, Clone)]
pub struct FollowOptions {
    /// Clamp curve targets into the soft-limit box.
    pub use_soft_limits: bool,

    /// Suppress the aggregated warning emitted when targets were clamped.
    pub suppress_limit_warnings: bool,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            use_soft_limits: true,
            suppress_limit_warnings: false,
        }
    }
}

/// Two axes coordinated to approximate motion along a curve.
pub struct AxisPair<PX, LX, PY, LY>
where
    PX: OutputPin,
    LX: LimitSwitch,
    PY: OutputPin,
    LY: LimitSwitch,
{
    x: Axis<PX, LX>,
    y: Axis<PY, LY>,
    soft_limits: SoftLimitBox,
}

impl<PX, LX, PY, LY> AxisPair<PX, LX, PY, LY>
where
    PX: OutputPin,
    LX: LimitSwitch,
    PY: OutputPin,
    LY: LimitSwitch,
{
    /// Couple two axes. Soft limits start unbounded; [`AxisPair::home`]
    /// tightens them.
    pub fn new(x: Axis<PX, LX>, y: Axis<PY, LY>) -> Self {
        Self {
            x,
            y,
            soft_limits: SoftLimitBox::unbounded(),
        }
    }

    /// The X axis.
    #[inline]
    pub fn x(&self) -> &Axis<PX, LX> {
        &self.x
    }

    /// The Y axis.
    #[inline]
    pub fn y(&self) -> &Axis<PY, LY> {
        &self.y
    }

    /// Mutable access to the X axis.
    #[inline]
    pub fn x_mut(&mut self) -> &mut Axis<PX, LX> {
        &mut self.x
    }

    /// Mutable access to the Y axis.
    #[inline]
    pub fn y_mut(&mut self) -> &mut Axis<PY, LY> {
        &mut self.y
    }

    /// Current soft limits.
    #[inline]
    pub fn soft_limits(&self) -> &SoftLimitBox {
        &self.soft_limits
    }

    /// Whether both axes have been homed.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.x.is_homed() && self.y.is_homed()
    }

    /// The pair's current location.
    #[inline]
    pub fn current_location(&self) -> Point {
        Point::new(self.x.current_location(), self.y.current_location())
    }

    /// Home both axes and derive soft limits.
    ///
    /// Homes X then Y, tightens the soft-limit box from the measured
    /// secondary boundaries, and parks both axes at their configured home
    /// locations.
    pub fn home(&mut self) -> Result<()> {
        let x_secondary = self.x.home()?;
        let y_secondary = self.y.home()?;

        self.soft_limits = SoftLimitBox::from_homing(
            self.x.geometry(),
            x_secondary,
            self.y.geometry(),
            y_secondary,
        );

        // Park at the home position, at the maximum step rate.
        let home = Point::new(
            self.x.geometry().home_location_mm,
            self.y.geometry().home_location_mm,
        );
        self.move_linearly(home, Instant::now())?;

        log::debug!(
            "axis pair homed; soft limits x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
            self.soft_limits.x_lower,
            self.soft_limits.x_upper,
            self.soft_limits.y_lower,
            self.soft_limits.y_upper
        );
        Ok(())
    }

    /// Follow a curve at a requested pen speed.
    ///
    /// Samples the curve every `resolution` millimetres of arc length
    /// (always including the endpoint), derives an absolute deadline for
    /// each sample from the cumulative point-to-point distance at
    /// `pen_speed`, and moves linearly through the samples. Targets are
    /// clamped into the soft-limit box when enabled; if anything was
    /// clamped, one aggregated warning is emitted after the whole curve.
    ///
    /// # Errors
    ///
    /// - [`MotionError::NonPositiveSpeed`] / [`MotionError::NonPositiveResolution`]
    ///   on invalid pacing arguments.
    /// - Limit-switch errors propagate from the guarded stepping.
    pub fn follow<C>(
        &mut self,
        curve: &C,
        pen_speed: f64,
        resolution: f64,
        options: &FollowOptions,
    ) -> Result<()>
    where
        C: Curve + ?Sized,
    {
        if pen_speed <= 0.0 {
            return Err(MotionError::NonPositiveSpeed(pen_speed).into());
        }
        if resolution <= 0.0 {
            return Err(MotionError::NonPositiveResolution(resolution).into());
        }
        if !self.is_homed() {
            log::warn!("following a curve before homing; axis locations are untrusted");
        }

        let total_length = curve.total_length();
        let mut arc_lengths = Vec::new();
        let mut s = 0.0;
        while s < total_length {
            arc_lengths.push(s);
            s += resolution;
        }
        arc_lengths.push(total_length);

        let points = curve.evaluate_at(&arc_lengths);

        // Cumulative Euclidean distance between consecutive samples.
        let mut cumulative = Vec::with_capacity(points.len());
        let mut distance = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                distance += points[i - 1].distance_to(point);
            }
            cumulative.push(distance);
        }

        let start = Instant::now();
        let mut limit_exceeded = false;

        // The first sample is the current pen location.
        for (i, point) in points.iter().enumerate().skip(1) {
            let target = if options.use_soft_limits {
                let (clamped, moved) = self.soft_limits.clamp(*point);
                limit_exceeded |= moved;
                clamped
            } else {
                *point
            };

            let deadline = start + Duration::from_secs_f64(cumulative[i] / pen_speed);
            self.move_linearly(target, deadline)?;
        }

        if limit_exceeded && !options.suppress_limit_warnings {
            log::warn!(
                "curve exceeded soft limits; targets were clamped to x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
                self.soft_limits.x_lower,
                self.soft_limits.x_upper,
                self.soft_limits.y_lower,
                self.soft_limits.y_upper
            );
        }
        Ok(())
    }

    /// Move both axes to a target point, completing at the deadline.
    ///
    /// Single steps are interleaved with a Bresenham tie-break so the pen
    /// tracks a straight line within one step of either axis. After each
    /// step the move sleeps until the elapsed fraction of the deadline
    /// matches the fraction of combined distance covered, so both axes
    /// finish together at the requested average speed. A deadline already
    /// in the past degrades every sleep to zero and the move runs at the
    /// maximum step rate. Pacing is best-effort: overruns are not
    /// compensated.
    pub fn move_linearly(&mut self, target: Point, deadline: Instant) -> Result<()> {
        let start = Instant::now();
        let total_duration = deadline.saturating_duration_since(start);

        let target_x = self.x.nearest_reachable_location(target.x);
        let target_y = self.y.nearest_reachable_location(target.y);
        let delta_x = target_x - self.x.current_location();
        let delta_y = target_y - self.y.current_location();

        let x_step_mm = self.x.geometry().mm_per_step;
        let y_step_mm = self.y.geometry().mm_per_step;
        let dx = (delta_x.abs() / x_step_mm).round() as u64;
        let dy = (delta_y.abs() / y_step_mm).round() as u64;
        if dx == 0 && dy == 0 {
            return Ok(());
        }

        self.x.set_direction(Direction::from_delta(delta_x));
        self.y.set_direction(Direction::from_delta(delta_y));

        let total_mm = dx as f64 * x_step_mm + dy as f64 * y_step_mm;
        let mut interleaver = LineInterleaver::new(dx, dy);

        while let Some(axis) = interleaver.next() {
            match axis {
                StepAxis::X => self.x.step()?,
                StepAxis::Y => self.y.step()?,
            }
            interleaver.record(axis);

            let covered_mm = interleaver.x_done() as f64 * x_step_mm
                + interleaver.y_done() as f64 * y_step_mm;
            sleep_until(start + total_duration.mul_f64(covered_mm / total_mm));
        }
        Ok(())
    }

    /// De-energize both motors.
    pub fn release(&mut self) -> Result<()> {
        self.x.release()?;
        self.y.release()
    }
}
