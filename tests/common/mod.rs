#![allow(dead_code)]

use std::time::Duration;
use switec_stepper::{CoilDriver, SimulatedClock, Switec};

/// A coil driver which remembers every pattern written to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recorder {
    pub patterns: Vec<u8>,
}

impl CoilDriver for Recorder {
    fn write(&mut self, pattern: u8) { self.patterns.push(pattern); }
}

pub fn needle(step_count: u32) -> Switec<Recorder> {
    Switec::new(step_count, Recorder::default())
}

/// What the needle looked like straight after a step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub position: u32,
    pub velocity: u32,
    pub delay: Duration,
}

/// Advance the clock by exactly the pending delay, then tick.
///
/// Returns a [`Sample`] if the needle stepped.
pub fn tick_once(
    needle: &mut Switec<Recorder>,
    clock: &SimulatedClock,
) -> Option<Sample> {
    let pulses = needle.inner().patterns.len();

    clock.advance(needle.pending_delay());
    needle.tick(clock).unwrap();

    if needle.inner().patterns.len() > pulses {
        Some(Sample {
            position: needle.current_position(),
            velocity: needle.velocity(),
            delay: needle.pending_delay(),
        })
    } else {
        None
    }
}

/// Tick until the needle comes to rest, recording every step along the way.
///
/// # Panics
///
/// If the needle is still moving after `max_ticks`.
pub fn settle(
    needle: &mut Switec<Recorder>,
    clock: &SimulatedClock,
    max_ticks: usize,
) -> Vec<Sample> {
    let mut samples = Vec::new();

    for _ in 0..max_ticks {
        if needle.is_stopped() {
            return samples;
        }

        samples.extend(tick_once(needle, clock));
    }

    panic!("The needle didn't settle within {} ticks", max_ticks);
}

/// Put a fresh needle at `position` without going through the scheduler.
pub fn needle_at(step_count: u32, position: u32) -> Switec<Recorder> {
    let mut needle = needle(step_count);

    for _ in 0..position {
        needle.step_forward();
    }
    needle.inner_mut().patterns.clear();

    needle
}
