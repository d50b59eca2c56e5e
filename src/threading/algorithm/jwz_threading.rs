//! Core JWZ (Jamie Zawinski) threading algorithm implementation
//!
//! Implements the standard email threading algorithm as described at:
//! https://www.jwz.org/doc/threading.html
//!
//! ## Algorithm Overview
//!
//! 1. **Build Containers**: one container per record and per referenced id,
//!    linked along every References chain
//! 2. **Find Roots**: gather parentless containers under a synthetic root
//! 3. **Prune**: drop or promote phantoms that carry no information
//! 4. **Reverse**: put every child list back into input order
//! 5. **Gather Subjects**: merge root threads with the same simplified subject
//! 6. **Flush**: copy the tree shape onto the records and discard the containers
//!
//! The run is synchronous and single-threaded. All working state is owned by
//! one call and dropped before it returns.

use super::super::config::ThreadingConfig;
use super::super::record::Threadable;
use super::super::stats::ThreadStats;
use super::container_builder::build_containers;
use super::flush::flush;
use super::pruning::prune_empty_containers;
use super::reversal::reverse_children;
use super::root_set::find_root_set;
use super::subject_merge::gather_subjects;

/// Thread `records` with the default configuration.
///
/// Returns the first root of the output forest; the rest of the forest hangs
/// off it through the records' child and next links.
pub fn thread<R, I>(records: I) -> Option<R>
where
    R: Threadable,
    I: IntoIterator<Item = R>,
{
    Threader::default().thread(records)
}

/// Reusable threading entry point carrying a [`ThreadingConfig`].
///
/// A `Threader` holds no state between runs; each call builds and discards its
/// own containers.
#[derive(Debug, Clone, Default)]
pub struct Threader {
    config: ThreadingConfig,
}

impl Threader {
    pub fn new(config: ThreadingConfig) -> Self {
        Threader { config }
    }

    pub fn config(&self) -> &ThreadingConfig {
        &self.config
    }

    pub fn thread<R, I>(&self, records: I) -> Option<R>
    where
        R: Threadable,
        I: IntoIterator<Item = R>,
    {
        self.thread_with_stats(records).0
    }

    /// Thread `records` and report what the run did.
    pub fn thread_with_stats<R, I>(&self, records: I) -> (Option<R>, ThreadStats)
    where
        R: Threadable,
        I: IntoIterator<Item = R>,
    {
        let mut stats = ThreadStats::default();

        // Step 1: Build containers from References chains
        let mut arena = build_containers(records, &mut stats);

        // Step 2: Find root set
        let root = find_root_set(&mut arena);

        // Step 3: Prune empty containers
        prune_empty_containers(&mut arena, root, &mut stats);

        // Step 4: Restore input order
        if self.config.reverse_children {
            reverse_children(&mut arena, root);
        }

        // Step 5: Gather root threads by subject
        stats.roots_before_merge = arena.children(root).count();
        if self.config.gather_subjects {
            gather_subjects(&mut arena, root, &mut stats);
        }
        stats.roots = arena.children(root).count();

        // Step 6: Copy the result onto the records
        let result = flush(arena, root, &mut stats);

        log::debug!(
            "threaded {} records into {} threads ({} duplicate ids, {} cycles refused, {} subject merges)",
            stats.records,
            stats.roots,
            stats.duplicate_ids,
            stats.links_rejected,
            stats.subject_merges
        );

        (result, stats)
    }
}
