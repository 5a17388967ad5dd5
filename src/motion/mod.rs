//! Motion module for plotter-motion.
//!
//! Provides velocity ramp calculation and step interleaving for
//! coordinated moves.

mod interleave;
mod profile;

pub use interleave::{LineInterleaver, StepAxis};
pub use profile::{Direction, RampProfile};

use std::time::Instant;

/// Block until the monotonic deadline has passed.
///
/// Sleeps rather than spinning; a deadline already in the past returns
/// immediately.
pub(crate) fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        std::thread::sleep(deadline - now);
    }
}
