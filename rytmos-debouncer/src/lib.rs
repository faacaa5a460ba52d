//! Debouncing for digital inputs that are sampled by polling.
//!
//! A [`Debouncer`](debouncer::Debouncer) turns a chattering boolean sample into a stable value
//! with rise/fall edges and stability durations. A [`Button`](button::Button) sits on top of
//! it and classifies the stable edges into short-click bursts and long presses.
//!
//! Both are driven by calling `update` from the owner's polling loop, often enough relative
//! to the debounce interval and the click windows to observe every transition.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod button;
pub mod clock;
pub mod debouncer;
pub mod error;

pub use button::{Button, ButtonSettings};
pub use clock::{Clock, Duration, Instant, ManualClock};
pub use debouncer::{Debouncer, DebouncerSettings};
pub use error::ConfigError;

#[cfg(feature = "std")]
pub use clock::StdClock;
