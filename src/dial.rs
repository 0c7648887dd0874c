#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use libm::F32Ext;

use crate::utils::Clamp;

/// Maps readings on a gauge's scale (km/h, RPM, degrees, ...) onto absolute
/// step positions.
///
/// The lowest reading sits at step `0` and the highest at
/// `step_count - 1`. Readings outside the scale are pinned to whichever end
/// they fall off.
///
/// # Examples
///
/// ```rust
/// use switec_stepper::Dial;
///
/// let speedo = Dial::new(0.0, 240.0, 945);
///
/// assert_eq!(speedo.position(0.0), 0);
/// assert_eq!(speedo.position(120.0), 472);
/// assert_eq!(speedo.position(300.0), 944);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dial {
    min: f32,
    max: f32,
    step_count: u32,
}

impl Dial {
    /// Number of steps per degree of needle travel on an X25.
    pub const X25_STEPS_PER_DEGREE: u32 = 3;
    /// Total needle sweep of an X25, in degrees.
    pub const X25_SWEEP_DEGREES: u32 = 315;

    pub fn new(min: f32, max: f32, step_count: u32) -> Dial {
        debug_assert!(max > min, "The scale must have a non-zero span");
        debug_assert!(step_count > 0);

        Dial {
            min,
            max,
            step_count,
        }
    }

    /// A dial reading the needle angle in degrees across the full sweep of
    /// an X25.
    pub fn x25() -> Dial {
        Dial::new(
            0.0,
            Dial::X25_SWEEP_DEGREES as f32,
            Dial::X25_SWEEP_DEGREES * Dial::X25_STEPS_PER_DEGREE,
        )
    }

    pub fn min(&self) -> f32 { self.min }

    pub fn max(&self) -> f32 { self.max }

    pub fn step_count(&self) -> u32 { self.step_count }

    /// The step position closest to `value`.
    ///
    /// `NaN` maps to step `0`.
    pub fn position(&self, value: f32) -> u32 {
        if value.is_nan() {
            return 0;
        }

        let fraction = Clamp::clamp(
            (value - self.min) / (self.max - self.min),
            0.0,
            1.0,
        );
        let last_step = self.step_count.saturating_sub(1);

        (fraction * last_step as f32).round() as u32
    }

    /// The reading shown when the needle is at `position`.
    pub fn value(&self, position: u32) -> f32 {
        let last_step = self.step_count.saturating_sub(1);

        if last_step == 0 {
            return self.min;
        }

        let position = Clamp::clamp(position, 0, last_step);
        self.min + (self.max - self.min) * position as f32 / last_step as f32
    }
}
