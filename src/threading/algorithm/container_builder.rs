//! Container construction from reference chains
//!
//! Every record gets a container keyed by its identity; every referenced
//! identity gets a container too, phantom until a record claims it. The
//! References chain of each record is then linked parent → child, oldest
//! first, followed by the record itself under its last reference.

use std::collections::HashMap;

use super::super::container::{Container, ContainerArena, ContainerKey, NodeId};
use super::super::record::Threadable;
use super::super::stats::ThreadStats;
use super::cycle_detection::{child_on_path, detect_cycle_in_ancestry};

/// Identity index plus the arena it points into.
pub struct ContainerBuilder<R: Threadable> {
    arena: ContainerArena<R>,
    id_table: HashMap<ContainerKey<R::Id>, NodeId>,
    bogus_id_count: u64,
}

impl<R: Threadable> Default for ContainerBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Threadable> ContainerBuilder<R> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Builder sized for about `records` input records
    pub fn with_capacity(records: usize) -> Self {
        ContainerBuilder {
            arena: ContainerArena::with_capacity(records),
            id_table: HashMap::with_capacity(records),
            bogus_id_count: 0,
        }
    }

    /// Container currently indexed under `id`
    #[cfg(test)]
    pub fn lookup(&self, id: &R::Id) -> Option<NodeId> {
        self.id_table
            .get(&ContainerKey::Message(id.clone()))
            .copied()
    }

    #[cfg(test)]
    pub fn arena(&self) -> &ContainerArena<R> {
        &self.arena
    }

    /// Finish building; the identity index is dropped here.
    pub fn into_arena(self) -> ContainerArena<R> {
        self.arena
    }

    /// Add one record and link its References chain.
    ///
    /// ## Example
    ///
    /// ```text
    /// Record M has References: <msg1> <msg2> <msg3>
    ///
    /// Creates links (where still allowed):
    ///   msg1 (parent) → msg2 (child)
    ///   msg2 (parent) → msg3 (child)
    ///   msg3 (parent) → M (child)
    /// ```
    ///
    /// The chain links are only added to containers that have no parent yet.
    /// The final link always replaces whatever parent M had before: a record's
    /// own References outrank what other records implied about it.
    pub fn add_record(&mut self, record: R, stats: &mut ThreadStats) {
        stats.records += 1;

        let message_id = record.message_id().clone();
        let references = record.references().to_vec();
        let container = self.claim_container(message_id, record, stats);

        let mut parent_ref: Option<NodeId> = None;
        for reference in references {
            let ref_container = self.container_for_reference(reference, stats);

            if let Some(prev) = parent_ref {
                self.link_reference(prev, ref_container, stats);
            }

            parent_ref = Some(ref_container);
        }

        let last_ref = parent_ref;
        let parent_ref = last_ref.filter(|&parent| {
            let cycle = detect_cycle_in_ancestry(&self.arena, container, parent);
            if cycle {
                stats.links_rejected += 1;
                log::trace!("not linking {container:?} under {parent:?}: would create a cycle");
            }
            !cycle
        });

        if let (None, Some(last_ref)) = (parent_ref, last_ref) {
            self.break_contradiction(container, last_ref);
        }

        if self.arena[container].parent.is_some() {
            self.arena.detach(container);
        }

        if let Some(parent) = parent_ref {
            self.arena.push_child(parent, container);
        }
    }

    /// `container` refused to go under `last_ref` because `last_ref` already
    /// sits below it. Cut the branch leading down to `last_ref` as well, so two
    /// records claiming each other as ancestors both end up as roots.
    fn break_contradiction(&mut self, container: NodeId, last_ref: NodeId) {
        if let Some(branch) = child_on_path(&self.arena, container, last_ref) {
            log::trace!("cutting {branch:?} from {container:?}: contradicting references");
            self.arena.detach(branch);
        }
    }

    /// Find or create the container that will hold `record`.
    ///
    /// If the identity already holds a different record, this occurrence is
    /// indexed under a fresh bogus key instead of being merged.
    fn claim_container(
        &mut self,
        message_id: R::Id,
        record: R,
        stats: &mut ThreadStats,
    ) -> NodeId {
        let key = ContainerKey::Message(message_id);

        match self.id_table.get(&key).copied() {
            Some(existing) if self.arena[existing].is_phantom() => {
                self.arena[existing].record = Some(record);
                existing
            }
            Some(_) => {
                let bogus = ContainerKey::Bogus(self.bogus_id_count);
                self.bogus_id_count += 1;
                stats.duplicate_ids += 1;
                log::debug!("duplicate message id {key:?}, tracking this occurrence as {bogus:?}");

                let container = self.arena.alloc(Container::new_with_record(record));
                self.id_table.insert(bogus, container);
                container
            }
            None => {
                let container = self.arena.alloc(Container::new_with_record(record));
                self.id_table.insert(key, container);
                container
            }
        }
    }

    /// Find or create the (possibly phantom) container for a referenced id
    fn container_for_reference(&mut self, reference: R::Id, stats: &mut ThreadStats) -> NodeId {
        let key = ContainerKey::Message(reference);
        if let Some(&existing) = self.id_table.get(&key) {
            return existing;
        }

        stats.placeholders += 1;
        let container = self.arena.alloc(Container::new_phantom());
        self.id_table.insert(key, container);
        container
    }

    /// Link `child` under `parent` if the child is still parentless and the
    /// link cannot close a loop.
    fn link_reference(&mut self, parent: NodeId, child: NodeId, stats: &mut ThreadStats) {
        if parent == child || self.arena[child].parent.is_some() {
            return;
        }

        if detect_cycle_in_ancestry(&self.arena, child, parent) {
            stats.links_rejected += 1;
            log::trace!("not linking reference {child:?} under {parent:?}: would create a cycle");
            return;
        }

        self.arena.push_child(parent, child);
    }
}

/// Build the container graph for every non-placeholder record.
pub fn build_containers<R, I>(records: I, stats: &mut ThreadStats) -> ContainerArena<R>
where
    R: Threadable,
    I: IntoIterator<Item = R>,
{
    let records = records.into_iter();
    let mut builder = ContainerBuilder::with_capacity(records.size_hint().0);

    for record in records {
        if record.is_dummy() {
            stats.dummies_skipped += 1;
            continue;
        }
        builder.add_record(record, stats);
    }

    builder.into_arena()
}
