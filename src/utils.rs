use core::time::Duration;

pub(crate) trait Clamp {
    fn clamp(self, lower: Self, upper: Self) -> Self;
}

impl<C: PartialOrd> Clamp for C {
    fn clamp(self, lower: Self, upper: Self) -> Self {
        if self < lower {
            lower
        } else if upper < self {
            upper
        } else {
            self
        }
    }
}

/// How long it has been since `earlier`, treating a clock which went
/// backwards as no time passing at all.
pub(crate) fn elapsed_since(now: Duration, earlier: Duration) -> Duration {
    now.checked_sub(earlier).unwrap_or_else(|| Duration::new(0, 0))
}
