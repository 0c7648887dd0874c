//! Make sure the scheduler steps exactly like the classic SwitecX25 algorithm
//! (signed direction, stopped flag, linear table scan).

mod common;

use crate::common::needle_at;
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use rand::Rng;
use std::time::Duration;
use switec_stepper::{Phase, SimulatedClock};

#[quickcheck]
fn both_versions_are_identical(input: Input) -> TestResult {
    let clock = SimulatedClock::new();
    let mut rust = needle_at(input.step_count, input.start);
    let mut classic = Classic::new(input.step_count, input.start);
    let mut micros = 0;

    for &(target, iterations) in &input.moves {
        rust.set_target(target);
        classic.set_position(target, micros);

        for _ in 0..iterations {
            // update the "time"
            micros += 100;
            clock.set(Duration::from_micros(micros));

            rust.tick(&clock).unwrap();
            classic.update(micros);

            assert_eq!(
                (
                    rust.current_position(),
                    rust.velocity(),
                    rust.phase().index(),
                    rust.inner().patterns.len()
                ),
                (
                    classic.current_step as u32,
                    classic.vel as u32,
                    classic.state,
                    classic.pulses
                ),
                "{:?} vs {:?}",
                rust,
                classic
            );
        }
    }

    TestResult::passed()
}

#[derive(Debug, Clone, PartialEq)]
struct Input {
    step_count: u32,
    start: u32,
    moves: Vec<(u32, u32)>,
}

impl Arbitrary for Input {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let step_count = g.gen_range(2, 500);
        let move_count = g.gen_range(1, 5);

        Input {
            step_count,
            start: g.gen_range(0, step_count),
            moves: (0..move_count)
                .map(|_| {
                    (g.gen_range(0, step_count + 20), g.gen_range(0, 3000))
                })
                .collect(),
        }
    }
}

const ACCEL_TABLE: [(i64, u64); 5] =
    [(20, 3000), (50, 1500), (100, 1000), (150, 800), (300, 600)];
const STATE_COUNT: usize = 6;

/// A literal rendition of the classic Arduino SwitecX25 driver, signed
/// direction and all.
#[derive(Debug)]
struct Classic {
    steps: i64,
    current_step: i64,
    target_step: i64,
    vel: i64,
    dir: i64,
    stopped: bool,
    max_vel: i64,
    state: usize,
    time0: u64,
    micro_delay: u64,
    pulses: usize,
}

impl Classic {
    fn new(steps: u32, start: u32) -> Classic {
        Classic {
            steps: i64::from(steps),
            current_step: i64::from(start),
            target_step: i64::from(start),
            vel: 0,
            dir: 0,
            stopped: true,
            max_vel: ACCEL_TABLE[ACCEL_TABLE.len() - 1].0,
            state: start as usize % STATE_COUNT,
            time0: 0,
            micro_delay: 0,
            pulses: 0,
        }
    }

    fn step_up(&mut self) {
        if self.current_step < self.steps - 1 {
            self.current_step += 1;
            self.state = (self.state + 1) % STATE_COUNT;
            self.pulses += 1;
        }
    }

    fn step_down(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
            self.state = (self.state + 5) % STATE_COUNT;
            self.pulses += 1;
        }
    }

    fn set_position(&mut self, pos: u32, now: u64) {
        let mut pos = i64::from(pos);
        if pos >= self.steps {
            pos = self.steps - 1;
        }
        self.target_step = pos;
        if self.stopped {
            self.stopped = false;
            self.time0 = now;
            self.micro_delay = 0;
        }
    }

    fn update(&mut self, now: u64) {
        if !self.stopped && now - self.time0 >= self.micro_delay {
            self.advance(now);
        }
    }

    fn advance(&mut self, now: u64) {
        if self.current_step == self.target_step && self.vel == 0 {
            self.stopped = true;
            self.dir = 0;
            self.time0 = now;
            return;
        }

        if self.vel == 0 {
            self.dir = if self.current_step < self.target_step { 1 } else { -1 };
            self.vel = 1;
        }

        if self.dir > 0 {
            self.step_up();
        } else {
            self.step_down();
        }

        let delta = if self.dir > 0 {
            self.target_step - self.current_step
        } else {
            self.current_step - self.target_step
        };

        if delta > 0 {
            if delta < self.vel {
                self.vel -= 1;
            } else if self.vel < self.max_vel {
                self.vel += 1;
            }
        } else {
            self.vel -= 1;
        }

        let mut i = 0;
        while ACCEL_TABLE[i].0 < self.vel {
            i += 1;
        }
        self.micro_delay = ACCEL_TABLE[i].1;
        self.time0 = now;
    }
}

#[test]
fn the_classic_model_starts_in_phase() {
    let classic = Classic::new(315, 13);

    assert_eq!(classic.state, Phase::from_index(13).index());
}
