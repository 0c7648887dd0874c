//! A step scheduler for Switec X25 style "air-core" gauge steppers.
//!
//! These tiny motors are driven directly from four output lines using a
//! 6-state excitation cycle. The [`Switec`] scheduler turns an absolute target
//! position into a stream of coil patterns, ramping the step rate up and down
//! according to an [`AccelerationProfile`] so the needle doesn't stall.
//!
//! The scheduler never sleeps and never reads the time on its own. You give
//! it a [`CoilDriver`] when it is created, and pass a [`SystemClock`] to every
//! call which needs to know the time.
//!
//! # Examples
//!
//! ```rust
//! use switec_stepper::{func_coils, SimulatedClock, Switec};
//! use core::time::Duration;
//!
//! let mut patterns = Vec::new();
//! let clock = SimulatedClock::new();
//!
//! {
//!     let mut needle = Switec::new(315, func_coils(|p| patterns.push(p)));
//!     needle.set_target(12);
//!
//!     while !needle.is_stopped() {
//!         needle.tick(&clock).unwrap();
//!         clock.advance(Duration::from_micros(100));
//!     }
//!
//!     assert_eq!(needle.current_position(), 12);
//! }
//!
//! // one coil pattern per step, possibly with a step of overshoot
//! assert!(patterns.len() >= 12);
//! ```
//!
//! # Feature Flags
//!
//! - `std`: heap-allocated acceleration profiles, an [`OperatingSystemClock`]
//!   and [`std::error::Error`] impls
//! - `hal`: a [`FourWire`] coil driver for `embedded-hal` output pins

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod clock;
mod coils;
mod dial;
mod error;
#[cfg(feature = "hal")]
mod hal_coils;
mod phase;
mod profile;
mod scheduler;
mod utils;

pub use crate::clock::*;
pub use crate::coils::*;
pub use crate::dial::Dial;
pub use crate::error::{Fault, ProfileError};
#[cfg(feature = "hal")]
pub use crate::hal_coils::FourWire;
pub use crate::phase::{Phase, PHASE_PATTERNS};
pub use crate::profile::{AccelerationProfile, Entry};
pub use crate::scheduler::{Motion, Switec, DEFAULT_RESET_STEP_INTERVAL};
