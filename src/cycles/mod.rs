//! Dependency cycle detection.
//!
//! [`CycleDetector`] searches the dependency edges for closed paths and
//! collects them as [`Cycle`] values, shortest first.

mod cycle;
mod detector;

pub use cycle::{Cycle, CycleError};
pub use detector::CycleDetector;
