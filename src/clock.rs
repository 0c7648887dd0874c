use core::{cell::Cell, time::Duration};

/// Something which records the elapsed real time.
///
/// This uses shared references because it may be shared between multiple
/// components at any one time.
///
/// Readings must never go backwards. The [`Switec`](crate::Switec) treats a
/// reading earlier than its last step as "no time has passed".
pub trait SystemClock {
    /// The amount of time that has passed since a clock-specific reference
    /// point (e.g. device startup or the unix epoch).
    fn elapsed(&self) -> Duration;
}

impl<'a, C: SystemClock> SystemClock for &'a C {
    fn elapsed(&self) -> Duration { (*self).elapsed() }
}

/// A clock which only moves when it is told to.
///
/// Useful for driving a [`Switec`](crate::Switec) deterministically in tests
/// and simulations. An auto-advancing clock also moves forward by a fixed
/// amount every time it is read, which lets blocking helpers like
/// [`Switec::run_to_completion()`](crate::Switec::run_to_completion) make
/// progress without a second thread.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimulatedClock {
    now: Cell<Duration>,
    auto_advance: Duration,
}

impl SimulatedClock {
    pub fn new() -> SimulatedClock { SimulatedClock::default() }

    /// Create a clock which moves forward by `step` after every read.
    pub fn auto_advancing(step: Duration) -> SimulatedClock {
        SimulatedClock {
            now: Cell::new(Duration::new(0, 0)),
            auto_advance: step,
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, amount: Duration) {
        self.now.set(self.now.get() + amount);
    }

    /// Jump to an absolute reading.
    pub fn set(&self, now: Duration) { self.now.set(now); }

    /// Peek at the current reading without triggering an auto-advance.
    pub fn now(&self) -> Duration { self.now.get() }
}

impl SystemClock for SimulatedClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.auto_advance);
        now
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingSystemClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl OperatingSystemClock {
    pub fn new() -> OperatingSystemClock { OperatingSystemClock::default() }
}

#[cfg(feature = "std")]
impl SystemClock for OperatingSystemClock {
    fn elapsed(&self) -> Duration { self.created_at.elapsed() }
}

#[cfg(feature = "std")]
impl Default for OperatingSystemClock {
    fn default() -> OperatingSystemClock {
        OperatingSystemClock {
            created_at: std::time::Instant::now(),
        }
    }
}
