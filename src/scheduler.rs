use crate::{
    utils::{elapsed_since, Clamp},
    AccelerationProfile, CoilDriver, Fault, Phase, SystemClock,
};
use core::{cmp, time::Duration};

/// The fixed delay between steps while homing with [`Switec::calibrate()`].
pub const DEFAULT_RESET_STEP_INTERVAL: Duration = Duration::from_micros(800);

/// What the needle is currently doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Resting on the target position. Ticking does nothing.
    Idle,
    /// Stepping towards higher positions.
    Forward,
    /// Stepping towards position `0`.
    Backward,
}

impl Default for Motion {
    fn default() -> Motion { Motion::Idle }
}

/// A step scheduler for a Switec X25 style gauge stepper.
///
/// The scheduler owns the [`CoilDriver`] for its needle. Time is read from
/// whichever [`SystemClock`] is passed to [`Switec::tick()`] and friends.
///
/// # Note
///
/// Stepper motors are an open-loop system, so the scheduler has no idea where
/// the needle physically is after a power cycle. Use [`Switec::calibrate()`]
/// to drive it against the zero stop before setting any targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Switec<D> {
    coils: D,
    step_count: u32,
    profile: AccelerationProfile,
    /// The velocity counter ceiling, never above `profile.max_velocity()`.
    max_velocity: u32,
    reset_step_interval: Duration,

    current_position: u32,
    target_position: u32,
    phase: Phase,
    /// Steps travelled under acceleration, used to index into the profile.
    velocity: u32,
    motion: Motion,
    last_step_time: Duration,
    step_interval: Duration,
}

impl<D> Switec<D> {
    /// Create a scheduler for a stepper with `step_count` addressable
    /// positions, using the default [`AccelerationProfile`].
    ///
    /// The needle is assumed to be resting at position `0`.
    ///
    /// # Panics
    ///
    /// The stepper must have at least one position.
    pub fn new(step_count: u32, coils: D) -> Switec<D> {
        assert!(step_count > 0, "A stepper needs at least one position");

        let profile = AccelerationProfile::default();

        Switec {
            coils,
            step_count,
            max_velocity: profile.max_velocity(),
            profile,
            reset_step_interval: DEFAULT_RESET_STEP_INTERVAL,
            current_position: 0,
            target_position: 0,
            phase: Phase::default(),
            velocity: 0,
            motion: Motion::Idle,
            last_step_time: Duration::new(0, 0),
            step_interval: Duration::new(0, 0),
        }
    }

    /// Use a different [`AccelerationProfile`].
    pub fn with_profile(mut self, profile: AccelerationProfile) -> Switec<D> {
        self.set_profile(profile);
        self
    }

    /// Replace the [`AccelerationProfile`].
    ///
    /// This also resets [`Switec::max_velocity()`] to the new profile's
    /// fastest entry. Swapping profiles mid-move is allowed, although the
    /// needle will jump straight to the new profile's speed for its current
    /// velocity.
    pub fn set_profile(&mut self, profile: AccelerationProfile) {
        log::debug!(
            "Switching to a {}-entry acceleration profile (max velocity {})",
            profile.entries().len(),
            profile.max_velocity()
        );

        self.max_velocity = profile.max_velocity();
        self.velocity = cmp::min(self.velocity, self.max_velocity);
        self.profile = profile;
    }

    pub fn profile(&self) -> &AccelerationProfile { &self.profile }

    /// Limit how far up the [`AccelerationProfile`] the needle may
    /// accelerate.
    ///
    /// The limit is kept within `1..=profile.max_velocity()`.
    pub fn set_max_velocity(&mut self, max_velocity: u32) {
        self.max_velocity =
            Clamp::clamp(max_velocity, 1, self.profile.max_velocity());
        self.velocity = cmp::min(self.velocity, self.max_velocity);
    }

    /// Get the velocity counter's ceiling.
    pub fn max_velocity(&self) -> u32 { self.max_velocity }

    /// Set the delay between steps used by [`Switec::calibrate()`].
    pub fn set_reset_step_interval(&mut self, interval: Duration) {
        self.reset_step_interval = interval;
    }

    pub fn reset_step_interval(&self) -> Duration { self.reset_step_interval }

    /// Move to the specified position, clamped to the stepper's range.
    ///
    /// Out-of-range positions aren't an error. Asking for "full scale" (i.e.
    /// [`Switec::step_count()`]) is common and sends the needle to the last
    /// position.
    ///
    /// When the needle is at rest it will start moving on the very next call
    /// to [`Switec::tick()`]. When it is already moving, the new target is
    /// picked up as the needle goes, decelerating and turning around if
    /// necessary.
    pub fn set_target(&mut self, position: u32) {
        let position = Clamp::clamp(position, 0, self.last_position());

        if position != self.target_position {
            log::debug!(
                "Retargeting from {} to {} (currently at {})",
                self.target_position,
                position,
                self.current_position
            );
        }

        self.target_position = position;

        if self.motion == Motion::Idle
            && self.target_position != self.current_position
        {
            self.motion = self.direction_to_target();
            // the last step may have been a long time ago, make sure we
            // start immediately
            self.step_interval = Duration::new(0, 0);
        }
    }

    /// Get the most recently set target position.
    pub fn target_position(&self) -> u32 { self.target_position }

    /// Get the current needle position, as measured by counting the number of
    /// steps taken.
    pub fn current_position(&self) -> u32 { self.current_position }

    /// Get the number of steps to go until reaching the target position.
    pub fn distance_to_go(&self) -> i64 {
        i64::from(self.target_position) - i64::from(self.current_position)
    }

    /// Is the needle resting at its target?
    pub fn is_stopped(&self) -> bool { self.motion == Motion::Idle }

    pub fn motion(&self) -> Motion { self.motion }

    /// The velocity counter, i.e. how far up the [`AccelerationProfile`] the
    /// needle currently is.
    pub fn velocity(&self) -> u32 { self.velocity }

    /// How long after the previous step the next one is due.
    pub fn pending_delay(&self) -> Duration { self.step_interval }

    /// The coil state most recently written.
    pub fn phase(&self) -> Phase { self.phase }

    /// The number of addressable positions.
    pub fn step_count(&self) -> u32 { self.step_count }

    pub fn inner(&self) -> &D { &self.coils }

    pub fn inner_mut(&mut self) -> &mut D { &mut self.coils }

    pub fn into_inner(self) -> D { self.coils }

    fn last_position(&self) -> u32 { self.step_count - 1 }

    fn direction_to_target(&self) -> Motion {
        if self.target_position > self.current_position {
            Motion::Forward
        } else {
            Motion::Backward
        }
    }

    /// Stop dead wherever the needle happens to be.
    fn halt(&mut self, now: Duration) {
        self.velocity = 0;
        self.motion = Motion::Idle;
        self.target_position = self.current_position;
        self.step_interval = Duration::new(0, 0);
        self.last_step_time = now;
    }
}

impl<D: CoilDriver> Switec<D> {
    /// Poll the scheduler and step the needle if a step is due.
    ///
    /// This function must called as frequently as possible, but at least once
    /// per [`AccelerationProfile::min_delay()`], preferably as part of the
    /// main loop. It never blocks.
    ///
    /// Note that each call to [`Switec::tick()`] will make at most one step,
    /// and then only when a step is due. Calling it late just delays that
    /// step, it never makes the needle skip one.
    ///
    /// # Warning
    ///
    /// For correctness, the same [`SystemClock`] should be used every time
    /// [`Switec::tick()`] is called. Failing to do so may mess up internal
    /// timing calculations.
    pub fn tick<C>(&mut self, clock: C) -> Result<(), Fault>
    where
        C: SystemClock,
    {
        if self.is_stopped() {
            return Ok(());
        }

        let now = clock.elapsed();

        if elapsed_since(now, self.last_step_time) >= self.step_interval {
            self.advance(now)?;
        }

        Ok(())
    }

    /// Keep calling [`Switec::tick()`] until the needle comes to rest.
    ///
    /// This busy-waits on the `clock`, so make sure it actually moves.
    pub fn run_to_completion<C>(&mut self, clock: C) -> Result<(), Fault>
    where
        C: SystemClock,
    {
        while !self.is_stopped() {
            self.tick(&clock)?;
            core::hint::spin_loop();
        }

        Ok(())
    }

    /// Zero the needle by driving it backwards against its end stop.
    ///
    /// The needle is assumed to be anywhere up to the last position, so this
    /// sweeps backwards over the full range at a fixed
    /// [`Switec::reset_step_interval()`], ignoring the acceleration profile.
    /// Afterwards the needle is at rest on position `0`.
    ///
    /// This busy-waits on the `clock` between steps, so make sure it
    /// actually moves.
    pub fn calibrate<C>(&mut self, clock: C)
    where
        C: SystemClock,
    {
        log::debug!(
            "Homing the needle with {} steps at {:?} intervals",
            self.step_count,
            self.reset_step_interval
        );

        self.current_position = self.last_position();

        for _ in 0..self.step_count {
            self.step_down();
            spin_for(&clock, self.reset_step_interval);
        }

        self.current_position = 0;
        self.target_position = 0;
        self.velocity = 0;
        self.motion = Motion::Idle;
        self.step_interval = Duration::new(0, 0);
        self.last_step_time = clock.elapsed();
    }

    /// Step the needle one position forward, returning `false` if it is
    /// already on the last position.
    ///
    /// When the needle is at rest the target moves with it, so it stays
    /// where it's been put.
    pub fn step_forward(&mut self) -> bool {
        let stepped = self.step_up();

        if stepped && self.is_stopped() {
            self.target_position = self.current_position;
        }

        stepped
    }

    /// Step the needle one position backward, returning `false` if it is
    /// already on position `0`.
    ///
    /// When the needle is at rest the target moves with it, so it stays
    /// where it's been put.
    pub fn step_backward(&mut self) -> bool {
        let stepped = self.step_down();

        if stepped && self.is_stopped() {
            self.target_position = self.current_position;
        }

        stepped
    }

    fn step_up(&mut self) -> bool {
        if self.current_position >= self.last_position() {
            return false;
        }

        self.current_position += 1;
        self.phase = self.phase.forward();
        self.write_coils();

        true
    }

    fn step_down(&mut self) -> bool {
        if self.current_position == 0 {
            return false;
        }

        self.current_position -= 1;
        self.phase = self.phase.backward();
        self.write_coils();

        true
    }

    fn write_coils(&mut self) {
        log::trace!(
            "Step to {} (phase {}, pattern {:#06b})",
            self.current_position,
            self.phase.index(),
            self.phase.pattern()
        );

        self.coils.write(self.phase.pattern());
    }

    /// Take a single step towards the target and work out when the next one
    /// is due.
    fn advance(&mut self, now: Duration) -> Result<(), Fault> {
        if self.current_position == self.target_position && self.velocity == 0
        {
            log::debug!("Needle settled at {}", self.current_position);
            self.motion = Motion::Idle;
            self.last_step_time = now;
            return Ok(());
        }

        if self.velocity == 0 {
            // starting from rest. A velocity of 1 means the "slow down" branch
            // below can never underflow.
            self.motion = self.direction_to_target();
            self.velocity = 1;
        }

        let stepped = match self.motion {
            Motion::Forward => self.step_up(),
            Motion::Backward => self.step_down(),
            Motion::Idle => return Ok(()),
        };

        // steps left to go in the current direction, negative when we're
        // heading away from the target
        let target = i64::from(self.target_position);
        let current = i64::from(self.current_position);
        let delta = if self.motion == Motion::Forward {
            target - current
        } else {
            current - target
        };

        if !stepped {
            // pinned against an end stop, there's no momentum to bleed off
            self.velocity = 0;
        } else if delta > 0 {
            if delta < i64::from(self.velocity) {
                // time to decelerate
                self.velocity -= 1;
            } else if self.velocity < self.max_velocity {
                self.velocity += 1;
            }
        } else {
            self.velocity = self.velocity.saturating_sub(1);
        }

        self.velocity = cmp::min(self.velocity, self.max_velocity);

        match self.profile.delay_for(self.velocity) {
            Some(delay) => {
                self.step_interval = delay;
                self.last_step_time = now;
                Ok(())
            },
            None => {
                let fault = Fault::VelocityOverflow {
                    velocity: self.velocity,
                    max_velocity: self.profile.max_velocity(),
                };
                log::warn!("Halting at {}: {}", self.current_position, fault);
                self.halt(now);

                Err(fault)
            },
        }
    }
}

fn spin_for<C: SystemClock>(clock: &C, duration: Duration) {
    let start = clock.elapsed();

    while elapsed_since(clock.elapsed(), start) < duration {
        core::hint::spin_loop();
    }
}
