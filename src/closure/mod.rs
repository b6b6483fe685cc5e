//! Transitive closure over dependency edges.
//!
//! [`TransitiveClosureEngine`] grows a closure one layer at a time in a
//! single direction. [`TransitiveClosure`] combines an inbound and an
//! outbound run with independent [`Depth`] bounds to slice the graph around
//! a seed set.

mod engine;
mod selectors;
mod slice;

pub use engine::TransitiveClosureEngine;
pub use selectors::{ClosureDirection, ClosureLayerSelector, ClosureStartSelector};
pub use slice::{Depth, TransitiveClosure};
