//! depscope - dependency graph engine
//!
//! This crate models a program as packages, classes and features linked by
//! dependency edges, and provides the traversals and transforms that work on
//! such graphs: selective copies, roll-up summaries, link maximization and
//! minimization, cycle detection and transitive closures.

pub mod closure;
pub mod config;
pub mod cycles;
pub mod export;
pub mod graph;
pub mod loader;
pub mod selection;
pub mod transform;
pub mod visitor;
