use core::fmt::{self, Display, Formatter};

/// Reasons an [`AccelerationProfile`](crate::AccelerationProfile) may be
/// rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The profile has no entries.
    Empty,
    /// Thresholds must be at least `1`.
    ZeroThreshold { index: usize },
    /// The threshold at `index` isn't larger than the one before it.
    NotAscending { index: usize },
    /// The profile won't fit in the fixed-capacity storage used without the
    /// `std` feature.
    TooManyEntries { max: usize },
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ProfileError::Empty => {
                write!(f, "The acceleration profile is empty")
            },
            ProfileError::ZeroThreshold { index } => {
                write!(f, "Entry {} has a threshold of zero", index)
            },
            ProfileError::NotAscending { index } => write!(
                f,
                "Entry {} has a threshold which isn't larger than the previous entry's",
                index
            ),
            ProfileError::TooManyEntries { max } => write!(
                f,
                "Acceleration profiles may contain at most {} entries",
                max
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

/// An internal invariant was broken while the needle was moving.
///
/// The [`Switec`](crate::Switec) halts in place when this happens. Re-home
/// with [`Switec::calibrate()`](crate::Switec::calibrate) before trusting the
/// reported position again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The velocity counter has no matching entry in the acceleration
    /// profile.
    VelocityOverflow { velocity: u32, max_velocity: u32 },
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Fault::VelocityOverflow {
                velocity,
                max_velocity,
            } => write!(
                f,
                "No acceleration profile entry for a velocity of {} (max {})",
                velocity, max_velocity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Fault {}
