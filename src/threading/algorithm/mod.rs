//! Email threading algorithm implementation
//!
//! This module implements the JWZ (Jamie Zawinski) threading algorithm
//! for organizing email messages into conversation threads.
//!
//! ## Main Entry Point
//!
//! Use [`thread`] or a configured [`Threader`] to thread a collection of records.

mod container_builder;
mod cycle_detection;
mod flush;
mod jwz_threading;
mod pruning;
mod reversal;
mod root_set;
mod subject_merge;
mod tree_traversal;

pub use jwz_threading::{Threader, thread};
