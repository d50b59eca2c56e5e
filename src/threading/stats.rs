use serde::Serialize;

/// Counters collected during one threading run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadStats {
    /// Records accepted as input
    pub records: usize,
    /// Input records that were already placeholders and were dropped
    pub dummies_skipped: usize,
    /// Records whose identity was already claimed by an earlier record
    pub duplicate_ids: usize,
    /// Phantom containers created (references to unseen messages and subject merges)
    pub placeholders: usize,
    /// Parent links refused because they would have created a cycle
    pub links_rejected: usize,
    /// Childless phantoms removed
    pub pruned: usize,
    /// Phantoms replaced by their children
    pub promoted: usize,
    /// Root set size after pruning
    pub roots_before_merge: usize,
    /// Root set members folded into another thread by subject
    pub subject_merges: usize,
    /// Placeholder records manufactured for the output
    pub dummies_materialized: usize,
    /// Threads in the output forest
    pub roots: usize,
}
