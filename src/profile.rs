use crate::ProfileError;
#[allow(unused_imports)]
use arrayvec::ArrayVec;
use core::time::Duration;

/// One row of an [`AccelerationProfile`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The largest velocity counter value this row applies to.
    pub threshold: u32,
    /// How long to wait before taking the next step.
    pub delay: Duration,
}

impl Entry {
    pub const fn new(threshold: u32, delay: Duration) -> Entry {
        Entry { threshold, delay }
    }
}

const ENTRY_CAPACITY: usize = 16;

/// The stock Switec X25 acceleration curve, as `(threshold, microseconds)`.
const DEFAULT_TABLE: [(u32, u64); 5] =
    [(20, 3000), (50, 1500), (100, 1000), (150, 800), (300, 600)];

/// A step function mapping the scheduler's velocity counter onto the delay
/// before the next step.
///
/// The velocity counter roughly tracks how many steps have been taken since
/// the needle started moving, so early entries should have long delays and
/// later entries progressively shorter ones. The threshold of the last entry
/// is the fastest the needle is allowed to go.
///
/// Profiles are checked when they are created, so a scheduler can never be
/// handed one which is empty or out of order.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationProfile {
    #[cfg(feature = "std")]
    entries: Vec<Entry>,
    #[cfg(not(feature = "std"))]
    entries: ArrayVec<[Entry; ENTRY_CAPACITY]>,
}

impl AccelerationProfile {
    /// The maximum number of entries a profile can hold when compiled
    /// without the `std` feature.
    pub const MAX_ENTRIES: usize = ENTRY_CAPACITY;

    /// Create a new profile, making sure thresholds are non-zero and strictly
    /// increasing.
    pub fn new(entries: &[Entry]) -> Result<AccelerationProfile, ProfileError> {
        if entries.is_empty() {
            return Err(ProfileError::Empty);
        }

        #[cfg(not(feature = "std"))]
        {
            if entries.len() > AccelerationProfile::MAX_ENTRIES {
                return Err(ProfileError::TooManyEntries {
                    max: AccelerationProfile::MAX_ENTRIES,
                });
            }
        }

        let mut previous = 0;

        for (index, entry) in entries.iter().enumerate() {
            if entry.threshold == 0 {
                return Err(ProfileError::ZeroThreshold { index });
            }
            if entry.threshold <= previous {
                return Err(ProfileError::NotAscending { index });
            }

            previous = entry.threshold;
        }

        Ok(AccelerationProfile::from_checked(entries.iter().copied()))
    }

    /// Create a profile from `(threshold, microseconds)` pairs.
    pub fn from_micros(
        table: &[(u32, u64)],
    ) -> Result<AccelerationProfile, ProfileError> {
        #[cfg(feature = "std")]
        let entries: Vec<Entry> = table.iter().map(to_entry).collect();

        #[cfg(not(feature = "std"))]
        let entries = {
            let mut entries: ArrayVec<[Entry; ENTRY_CAPACITY]> =
                ArrayVec::new();

            for row in table {
                entries.try_push(to_entry(row)).map_err(|_| {
                    ProfileError::TooManyEntries {
                        max: AccelerationProfile::MAX_ENTRIES,
                    }
                })?;
            }

            entries
        };

        AccelerationProfile::new(&entries)
    }

    fn from_checked<I>(entries: I) -> AccelerationProfile
    where
        I: IntoIterator<Item = Entry>,
    {
        AccelerationProfile {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[Entry] { &self.entries }

    /// The fastest velocity this profile has a delay for (the last entry's
    /// threshold).
    pub fn max_velocity(&self) -> u32 {
        self.entries.last().map(|e| e.threshold).unwrap_or(0)
    }

    /// Find the delay for the smallest threshold which is at least
    /// `velocity`.
    ///
    /// Returns `None` if `velocity` is larger than every threshold.
    pub fn delay_for(&self, velocity: u32) -> Option<Duration> {
        let ix = self
            .entries
            .binary_search_by_key(&velocity, |e| e.threshold)
            .unwrap_or_else(|insert_at| insert_at);

        self.entries.get(ix).map(|e| e.delay)
    }

    /// The shortest delay in the profile.
    ///
    /// [`Switec::tick()`](crate::Switec::tick) should be called at least this
    /// often to keep up with the needle at full speed.
    pub fn min_delay(&self) -> Duration {
        self.entries
            .iter()
            .map(|e| e.delay)
            .min()
            .unwrap_or_else(|| Duration::new(0, 0))
    }
}

impl Default for AccelerationProfile {
    fn default() -> AccelerationProfile {
        AccelerationProfile::from_checked(DEFAULT_TABLE.iter().map(to_entry))
    }
}

fn to_entry(&(threshold, micros): &(u32, u64)) -> Entry {
    Entry::new(threshold, Duration::from_micros(micros))
}
