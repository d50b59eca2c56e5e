//! Email threading module
//!
//! This module implements the JWZ (Jamie Zawinski) threading algorithm for organizing
//! email messages into conversation threads. The implementation is based on the algorithm
//! from https://www.jwz.org/doc/threading.html.
//!
//! ## Threading Strategy
//!
//! 1. **References Header**: The primary method - uses the full chain of message IDs from
//!    the References header to build parent-child relationships
//! 2. **Subject Gathering**: Root-level threads with the same simplified subject are
//!    merged when no References chain connects them
//!
//! Malformed input (self references, reference loops, duplicate Message-IDs) never
//! fails a run: offending links are skipped and duplicates are kept apart.
//!
//! ## Module Structure
//!
//! - `record`: The [`Threadable`] trait records implement
//! - `container`: Arena of working containers
//! - `algorithm`: Pipeline stages and the [`Threader`] entry point
//! - `subject_matching`: Subject simplification for record adapters
//! - `config`, `stats`: Run configuration and counters

pub mod algorithm;
pub mod config;
pub mod container;
pub mod record;
pub mod stats;
pub mod subject_matching;

// Re-export main types and functions
pub use algorithm::{Threader, thread};
pub use config::ThreadingConfig;
pub use record::Threadable;
pub use stats::ThreadStats;
pub use subject_matching::{SimplifiedSubject, simplify_subject};
